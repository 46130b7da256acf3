//! Order list grouping for the WooCommerce order list.
//!
//! Order summaries are bucketed by creation date relative to an explicit
//! `now`, then flattened into a list of section headers and order ids.
//! Resolving ids against cached orders happens in storage.

use chrono::{DateTime, Days, Months, NaiveDateTime, Utc};
use serde::Serialize;

/// How long ago an order was created, as shown in list section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGroup {
    Today,
    Yesterday,
    OlderTwoDays,
    OlderWeek,
    OlderMonth,
}

impl TimeGroup {
    /// Groups in the order they appear in the list.
    pub const ORDERED: [TimeGroup; 5] = [
        TimeGroup::Today,
        TimeGroup::Yesterday,
        TimeGroup::OlderTwoDays,
        TimeGroup::OlderWeek,
        TimeGroup::OlderMonth,
    ];

    /// Bucket `date` relative to `now`.
    ///
    /// Strict comparisons are checked oldest first, then calendar-day
    /// matches (UTC) for the two most recent days.
    #[must_use]
    pub fn for_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
        let week_ago = now.checked_sub_days(Days::new(7)).unwrap_or(now);
        let two_days_ago = now.checked_sub_days(Days::new(2)).unwrap_or(now);
        let yesterday = now.checked_sub_days(Days::new(1)).unwrap_or(now);

        if date < month_ago {
            Self::OlderMonth
        } else if date < week_ago {
            Self::OlderWeek
        } else if date < two_days_ago || date.date_naive() == two_days_ago.date_naive() {
            Self::OlderTwoDays
        } else if date.date_naive() == yesterday.date_naive() {
            Self::Yesterday
        } else {
            Self::Today
        }
    }

    /// Bucket an ISO-8601 timestamp. Unparseable input counts as `now`.
    #[must_use]
    pub fn for_iso8601(date: &str, now: DateTime<Utc>) -> Self {
        Self::for_date(parse_iso8601(date).unwrap_or(now), now)
    }

    /// Human-readable section title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::OlderTwoDays => "Older than 2 days",
            Self::OlderWeek => "Older than a week",
            Self::OlderMonth => "Older than a month",
        }
    }
}

/// Parse an ISO-8601 timestamp as UTC.
///
/// Accepts RFC 3339 with an offset, or a bare `YYYY-MM-DDTHH:MM:SS`
/// which is taken to be UTC.
#[must_use]
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// One row of `WCOrderSummaryModel`: an order's id and creation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub remote_order_id: i64,
    pub date_created: String,
}

/// Grouped list identifiers, before orders are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OrderListEntry {
    SectionHeader(TimeGroup),
    Order(i64),
}

/// A cached order, reduced to what the list displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    pub remote_order_id: i64,
    pub number: String,
    pub status: String,
    /// Billing first and last name joined by a space.
    pub name: String,
    pub total: String,
}

/// A resolved list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderListItem {
    SectionHeader { group: TimeGroup },
    Order(OrderRow),
    /// Known from the summary list but not cached yet.
    Loading { remote_order_id: i64 },
}

/// Group summaries into sections.
///
/// Each non-empty group contributes a header followed by its order ids,
/// in `TimeGroup::ORDERED` order. Input order is kept within a group.
#[must_use]
pub fn group_orders(summaries: &[OrderSummary], now: DateTime<Utc>) -> Vec<OrderListEntry> {
    let mut buckets: [Vec<i64>; 5] = Default::default();

    for summary in summaries {
        let group = TimeGroup::for_iso8601(&summary.date_created, now);
        let slot = TimeGroup::ORDERED
            .iter()
            .position(|g| *g == group)
            .unwrap_or(0);
        buckets[slot].push(summary.remote_order_id);
    }

    let mut entries = Vec::with_capacity(summaries.len() + TimeGroup::ORDERED.len());
    for (group, ids) in TimeGroup::ORDERED.iter().zip(buckets) {
        if ids.is_empty() {
            continue;
        }
        entries.push(OrderListEntry::SectionHeader(*group));
        entries.extend(ids.into_iter().map(OrderListEntry::Order));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 3, 15, 12, 0, 0).unwrap()
    }

    fn summary(id: i64, date: &str) -> OrderSummary {
        OrderSummary {
            remote_order_id: id,
            date_created: date.to_string(),
        }
    }

    #[test]
    fn test_time_group_boundaries() {
        let now = now();
        let at = |y, m, d, h| Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();

        assert_eq!(TimeGroup::for_date(at(2019, 3, 15, 1), now), TimeGroup::Today);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 15, 23), now), TimeGroup::Today);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 14, 0), now), TimeGroup::Yesterday);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 14, 23), now), TimeGroup::Yesterday);
        // Same calendar day as two days ago, on either side of the instant
        assert_eq!(TimeGroup::for_date(at(2019, 3, 13, 18), now), TimeGroup::OlderTwoDays);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 13, 1), now), TimeGroup::OlderTwoDays);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 9, 12), now), TimeGroup::OlderTwoDays);
        assert_eq!(TimeGroup::for_date(at(2019, 3, 8, 11), now), TimeGroup::OlderWeek);
        assert_eq!(TimeGroup::for_date(at(2019, 2, 15, 13), now), TimeGroup::OlderWeek);
        assert_eq!(TimeGroup::for_date(at(2019, 2, 15, 11), now), TimeGroup::OlderMonth);
    }

    #[test]
    fn test_unparseable_date_is_today() {
        assert_eq!(TimeGroup::for_iso8601("not a date", now()), TimeGroup::Today);
        assert_eq!(TimeGroup::for_iso8601("", now()), TimeGroup::Today);
    }

    #[test]
    fn test_parse_iso8601_variants() {
        let expected = Utc.with_ymd_and_hms(2019, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2019-03-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_iso8601("2019-03-01T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_iso8601("2019-03-01T08:30:00"), Some(expected));
        assert_eq!(parse_iso8601("2019-03-01 08:30:00"), Some(expected));
        assert_eq!(parse_iso8601("03/01/2019"), None);
    }

    #[test]
    fn test_group_orders_headers_and_order() {
        let summaries = vec![
            summary(10, "2019-03-15T09:00:00Z"),
            summary(9, "2019-03-14T09:00:00Z"),
            summary(8, "2019-03-15T08:00:00Z"),
            summary(7, "2019-01-01T00:00:00Z"),
        ];

        let entries = group_orders(&summaries, now());
        assert_eq!(
            entries,
            vec![
                OrderListEntry::SectionHeader(TimeGroup::Today),
                OrderListEntry::Order(10),
                OrderListEntry::Order(8),
                OrderListEntry::SectionHeader(TimeGroup::Yesterday),
                OrderListEntry::Order(9),
                OrderListEntry::SectionHeader(TimeGroup::OlderMonth),
                OrderListEntry::Order(7),
            ]
        );
    }

    #[test]
    fn test_group_orders_empty() {
        assert!(group_orders(&[], now()).is_empty());
    }
}
