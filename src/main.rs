//! fluxdb CLI entry point.

use clap::Parser;
use fluxdb::cli::commands;
use fluxdb::cli::{Cli, Commands, OutputFormat};
use fluxdb::config::resolve_addons;
use fluxdb::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dry_run {
        fluxdb::DRY_RUN.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.format == OutputFormat::Csv {
        fluxdb::CSV_OUTPUT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR --format json OR non-TTY stdout
    let json = cli.json
        || cli.format == OutputFormat::Json
        || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let db = cli.db.as_deref();

    match &cli.command {
        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(shell),

        Commands::Init { force } => {
            commands::init::execute(db, &resolve_addons(&cli.addons)?, *force, json)
        }
        Commands::Migrate => commands::migrate::execute(db, &resolve_addons(&cli.addons)?, json),
        Commands::Reset { force } => {
            commands::reset::execute(db, &resolve_addons(&cli.addons)?, *force, json)
        }
        Commands::Status => commands::status::execute(db, &resolve_addons(&cli.addons)?, json),

        Commands::Schema { table, canonical } => commands::schema::execute(
            db,
            &resolve_addons(&cli.addons)?,
            table.as_deref(),
            *canonical,
            json,
        ),
        Commands::Steps { from } => {
            commands::steps::execute(&resolve_addons(&cli.addons)?, *from, json)
        }

        // WooCommerce order list
        Commands::Orders { site, now } => commands::orders::execute(
            db,
            &resolve_addons(&cli.addons)?,
            *site,
            now.as_deref(),
            json,
        ),
    }
}
