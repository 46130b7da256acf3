//! Orders command implementation.

use crate::cli::commands::existing_db_path;
use crate::error::{Error, Result};
use crate::model::{parse_iso8601, AddOnSet, OrderListItem};
use crate::storage::FluxDatabase;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct OrdersOutput {
    site: i64,
    now: DateTime<Utc>,
    count: usize,
    items: Vec<OrderListItem>,
}

/// Execute the orders command.
///
/// # Errors
///
/// Returns `AddOnRequired` without the WooCommerce add-on,
/// `InvalidArgument` for a malformed `--now`, or a database error.
pub fn execute(
    db_path: Option<&Path>,
    addons: &AddOnSet,
    site: i64,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    let now = match now {
        Some(s) => parse_iso8601(s)
            .ok_or_else(|| Error::InvalidArgument(format!("Invalid --now timestamp '{s}'")))?,
        None => Utc::now(),
    };

    let db_path = existing_db_path(db_path)?;
    let db = FluxDatabase::open(&db_path, addons.clone())?;
    let items = db.order_list(site, now)?;

    if crate::is_csv() {
        println!("type,group,remote_order_id,number,status,name,total");
        for item in &items {
            match item {
                OrderListItem::SectionHeader { group } => {
                    println!("section,{},,,,,", group.label());
                }
                OrderListItem::Order(row) => println!(
                    "order,,{},{},{},{},{}",
                    row.remote_order_id,
                    crate::csv_escape(&row.number),
                    crate::csv_escape(&row.status),
                    crate::csv_escape(&row.name),
                    crate::csv_escape(&row.total)
                ),
                OrderListItem::Loading { remote_order_id } => {
                    println!("loading,,{remote_order_id},,,,");
                }
            }
        }
    } else if json {
        let output = OrdersOutput {
            site,
            now,
            count: items.len(),
            items,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if items.is_empty() {
        println!("No orders for site {site}.");
    } else {
        for item in &items {
            match item {
                OrderListItem::SectionHeader { group } => {
                    println!("{}", group.label().bold());
                }
                OrderListItem::Order(row) => println!(
                    "  #{:<8} {:<12} {:<24} {}",
                    row.number, row.status, row.name, row.total
                ),
                OrderListItem::Loading { remote_order_id } => {
                    let label = format!("({remote_order_id}) loading");
                    println!("  {}", label.as_str().dimmed());
                }
            }
        }
    }

    Ok(())
}
