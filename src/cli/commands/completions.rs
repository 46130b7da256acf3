//! Shell completions for `fluxdb`.

use crate::cli::{Cli, Shell};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::Shell as Target;
use std::io::{self, Write};

const BIN_NAME: &str = "fluxdb";

impl From<&Shell> for Target {
    fn from(shell: &Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

/// Print the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn execute(shell: &Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_script(shell, &mut out);
    out.flush()?;
    Ok(())
}

fn write_script(shell: &Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(Target::from(shell), &mut cmd, BIN_NAME, out);
}
