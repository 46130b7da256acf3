//! Domain models for fluxdb.
//!
//! - `AddOn` / `AddOnSet`: optional feature modules gating the schema
//! - Order list grouping: `TimeGroup`, `OrderSummary`, `OrderListEntry`

pub mod addon;
pub mod order;

pub use addon::{AddOn, AddOnSet};
pub use order::{
    group_orders, parse_iso8601, OrderListEntry, OrderListItem, OrderRow, OrderSummary, TimeGroup,
};
