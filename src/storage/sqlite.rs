//! SQLite storage implementation.
//!
//! [`FluxDatabase`] owns the connection to the `wp-fluxc` database and
//! brings it to [`DB_VERSION`] on open: fresh files are created from the
//! catalog, older files are upgraded through the step table, and newer
//! files are refused.

use crate::config::{prefs_dir, PreferenceStores};
use crate::error::{Error, Result};
use crate::model::{
    group_orders, parse_iso8601, AddOn, AddOnSet, OrderListEntry, OrderListItem, OrderRow,
    OrderSummary,
};
use crate::storage::migrations::{user_version, MigrationContext, Migrator, UpgradeReport};
use crate::storage::schema::{self, SchemaSnapshot, DB_VERSION};
use crate::storage::steps::STEPS;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, TransactionBehavior};
use serde::Serialize;
use std::cmp::Reverse;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// How long a connection waits on a locked file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// What opening the database did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OpenOutcome {
    /// Empty file: every active catalog table was created.
    Created { version: u32, tables: usize },
    Upgraded(UpgradeReport),
    /// Already at the latest version.
    Current { version: u32 },
}

/// Read-only view of a database file, taken without upgrading it.
#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub version: u32,
    pub snapshot: SchemaSnapshot,
}

/// The `wp-fluxc` database, open at [`DB_VERSION`].
#[derive(Debug)]
pub struct FluxDatabase {
    conn: Connection,
    addons: AddOnSet,
    prefs: PreferenceStores,
    opened: OpenOutcome,
}

impl FluxDatabase {
    /// Open (creating or upgrading) the database at `path`.
    ///
    /// Preference stores are read from `prefs/` beside the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established, a
    /// migration fails, or the file is newer than [`DB_VERSION`].
    pub fn open(path: &Path, addons: AddOnSet) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let prefs = PreferenceStores::open(&prefs_dir(path))?;
        Self::from_connection(conn, addons, prefs)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory(addons: AddOnSet) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, addons, PreferenceStores::in_memory())
    }

    /// Bring an existing connection to [`DB_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns `Downgrade` if the stored version is newer than
    /// [`DB_VERSION`], or `Migration` if an upgrade step fails.
    pub fn from_connection(
        mut conn: Connection,
        addons: AddOnSet,
        prefs: PreferenceStores,
    ) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let current = user_version(&conn)?;
        let (opened, prefs) = match current {
            0 => {
                let tables = create_fresh(&mut conn, &addons)?;
                info!(version = DB_VERSION, tables, addons = %addons, "Created database");
                (OpenOutcome::Created { version: DB_VERSION, tables }, prefs)
            }
            v if v < DB_VERSION => {
                let migrator = Migrator::new(STEPS)?;
                let mut ctx = MigrationContext::with_preferences(addons.clone(), prefs);
                let report = migrator.run(&mut conn, v, DB_VERSION, &mut ctx)?;
                (OpenOutcome::Upgraded(report), ctx.prefs)
            }
            v if v == DB_VERSION => (OpenOutcome::Current { version: v }, prefs),
            v => {
                warn!(found = v, supported = DB_VERSION, "Refusing to downgrade database");
                return Err(Error::Downgrade {
                    found: v,
                    supported: DB_VERSION,
                });
            }
        };

        Ok(Self {
            conn,
            addons,
            prefs,
            opened,
        })
    }

    /// Read the version and schema of a database file without changing it.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if the file does not exist.
    pub fn inspect(path: &Path) -> Result<DatabaseInfo> {
        if !path.exists() {
            return Err(Error::NotInitialized);
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(DatabaseInfo {
            version: user_version(&conn)?,
            snapshot: schema::snapshot(&conn)?,
        })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    #[must_use]
    pub fn addons(&self) -> &AddOnSet {
        &self.addons
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceStores {
        &self.prefs
    }

    /// What the open did: create, upgrade, or nothing.
    #[must_use]
    pub fn opened(&self) -> &OpenOutcome {
        &self.opened
    }

    /// Stored schema version. Always [`DB_VERSION`] after a successful open.
    ///
    /// # Errors
    ///
    /// Returns an error if the pragma cannot be read.
    pub fn schema_version(&self) -> Result<u32> {
        user_version(&self.conn)
    }

    /// Table/column set of the open database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read.
    pub fn snapshot(&self) -> Result<SchemaSnapshot> {
        schema::snapshot(&self.conn)
    }

    /// SHA-256 of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read.
    pub fn fingerprint(&self) -> Result<String> {
        self.snapshot()?.fingerprint()
    }

    /// Drop and recreate every active catalog table. All data is lost.
    ///
    /// Runs in one transaction with foreign keys off, so parent tables
    /// can be dropped before their children. The schema version is left
    /// as is. Tables outside the catalog are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is changed then.
    pub fn reset(&mut self) -> Result<usize> {
        info!(addons = %self.addons, "Resetting database");

        self.conn.pragma_update(None, "foreign_keys", "OFF")?;
        let result = reset_tables(&mut self.conn, &self.addons);
        self.conn.pragma_update(None, "foreign_keys", "ON")?;

        let count = result?;
        info!(tables = count, "Reset complete");
        Ok(count)
    }

    // ==================
    // Order list
    // ==================

    /// Order summaries for a site, newest first.
    ///
    /// Rows are ordered by the instant of `DATE_CREATED`, so timestamps
    /// stored with different offsets still sort correctly. A NULL remote
    /// id reads as 0.
    ///
    /// # Errors
    ///
    /// Returns `AddOnRequired` without WooCommerce, or a query error.
    pub fn order_summaries(&self, local_site_id: i64) -> Result<Vec<OrderSummary>> {
        self.require(AddOn::WooCommerce)?;

        let mut stmt = self.conn.prepare(
            "SELECT REMOTE_ORDER_ID, DATE_CREATED FROM WCOrderSummaryModel
             WHERE LOCAL_SITE_ID = ?1
             ORDER BY DATE_CREATED DESC, _id DESC",
        )?;
        let mut rows = stmt
            .query_map([local_site_id], |row| {
                Ok(OrderSummary {
                    remote_order_id: row.get::<_, Option<i64>>(0)?.unwrap_or(0),
                    date_created: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Stable: equal instants keep the `_id DESC` order from the query.
        rows.sort_by_cached_key(|s| Reverse(parse_iso8601(&s.date_created)));
        Ok(rows)
    }

    /// The sectioned order list for a site.
    ///
    /// Orders cached in `WCOrderModel` become rows; the rest are
    /// placeholders to be fetched.
    ///
    /// # Errors
    ///
    /// Returns `AddOnRequired` without WooCommerce, or a query error.
    pub fn order_list(&self, local_site_id: i64, now: DateTime<Utc>) -> Result<Vec<OrderListItem>> {
        let summaries = self.order_summaries(local_site_id)?;
        let entries = group_orders(&summaries, now);

        let mut stmt = self.conn.prepare(
            "SELECT REMOTE_ORDER_ID, NUMBER, STATUS, BILLING_FIRST_NAME, BILLING_LAST_NAME, TOTAL
             FROM WCOrderModel
             WHERE LOCAL_SITE_ID = ?1 AND REMOTE_ORDER_ID = ?2",
        )?;

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let item = match entry {
                OrderListEntry::SectionHeader(group) => OrderListItem::SectionHeader { group },
                OrderListEntry::Order(remote_order_id) => stmt
                    .query_row(params![local_site_id, remote_order_id], |row| {
                        let first: String = row.get(3)?;
                        let last: String = row.get(4)?;
                        Ok(OrderRow {
                            remote_order_id: row.get(0)?,
                            number: row.get(1)?,
                            status: row.get(2)?,
                            name: format!("{first} {last}"),
                            total: row.get(5)?,
                        })
                    })
                    .optional()?
                    .map_or(OrderListItem::Loading { remote_order_id }, OrderListItem::Order),
            };
            items.push(item);
        }
        Ok(items)
    }

    fn require(&self, addon: AddOn) -> Result<()> {
        if self.addons.contains(addon) {
            Ok(())
        } else {
            Err(Error::AddOnRequired {
                addon: addon.name().to_string(),
            })
        }
    }
}

fn create_fresh(conn: &mut Connection, addons: &AddOnSet) -> Result<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let tables = schema::create_tables(&tx, addons)?;
    tx.pragma_update(None, "user_version", DB_VERSION)?;
    tx.commit()?;
    Ok(tables)
}

fn reset_tables(conn: &mut Connection, addons: &AddOnSet) -> Result<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut count = 0;
    for table in schema::active_catalog(addons) {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", table.name))?;
        tx.execute_batch(table.create)?;
        count += 1;
    }
    tx.commit()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preferences, ACCOUNT_TOKEN_PREF_KEY, FLUXC_PREFS_FILE};
    use crate::model::TimeGroup;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn baseline_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_baseline(&conn).unwrap();
        conn
    }

    #[test]
    fn test_open_file_waits_on_locks() {
        let dir = TempDir::new().unwrap();
        let db = FluxDatabase::open(&dir.path().join("wp-fluxc.db"), AddOnSet::none()).unwrap();

        let timeout: i64 = db
            .conn()
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }

    #[test]
    fn test_open_memory_is_latest() {
        let db = FluxDatabase::open_memory(AddOnSet::none()).unwrap();
        assert_eq!(db.schema_version().unwrap(), DB_VERSION);
        assert!(matches!(db.opened(), OpenOutcome::Created { version: DB_VERSION, .. }));
        assert!(db.snapshot().unwrap().columns("WCOrderModel").is_none());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = FluxDatabase::open_memory(AddOnSet::none()).unwrap();
        let fk_enabled: i32 = db
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_upgrade_from_baseline_matches_fresh() {
        for addons in [AddOnSet::none(), AddOnSet::all()] {
            let fresh = FluxDatabase::open_memory(addons.clone()).unwrap();
            let upgraded = FluxDatabase::from_connection(
                baseline_conn(),
                addons.clone(),
                PreferenceStores::in_memory(),
            )
            .unwrap();

            assert_eq!(upgraded.schema_version().unwrap(), DB_VERSION);
            assert_eq!(
                upgraded.snapshot().unwrap(),
                fresh.snapshot().unwrap(),
                "addons: {addons}"
            );
            assert_eq!(upgraded.fingerprint().unwrap(), fresh.fingerprint().unwrap());
        }
    }

    #[test]
    fn test_upgrade_report_covers_every_step() {
        let db = FluxDatabase::from_connection(
            baseline_conn(),
            AddOnSet::none(),
            PreferenceStores::in_memory(),
        )
        .unwrap();

        let OpenOutcome::Upgraded(report) = db.opened() else {
            panic!("expected an upgrade, got {:?}", db.opened());
        };
        assert_eq!(report.from, 1);
        assert_eq!(report.to, DB_VERSION);
        assert_eq!(report.applied.len() + report.skipped.len(), STEPS.len());
        assert!(report.skipped.iter().all(|s| s.addon == Some(AddOn::WooCommerce)));
    }

    #[test]
    fn test_reopen_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");

        let first = FluxDatabase::open(&path, AddOnSet::all()).unwrap();
        let fingerprint = first.fingerprint().unwrap();
        drop(first);

        let second = FluxDatabase::open(&path, AddOnSet::all()).unwrap();
        assert_eq!(second.opened(), &OpenOutcome::Current { version: DB_VERSION });
        assert_eq!(second.fingerprint().unwrap(), fingerprint);
    }

    #[test]
    fn test_refuses_downgrade() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", DB_VERSION + 2).unwrap();

        let err =
            FluxDatabase::from_connection(conn, AddOnSet::none(), PreferenceStores::in_memory())
                .unwrap_err();
        assert!(matches!(
            err,
            Error::Downgrade { found, supported }
                if found == DB_VERSION + 2 && supported == DB_VERSION
        ));
    }

    #[test]
    fn test_reset_after_upgrade_matches_fresh() {
        let addons = AddOnSet::all();
        let mut db = FluxDatabase::from_connection(
            baseline_conn(),
            addons.clone(),
            PreferenceStores::in_memory(),
        )
        .unwrap();
        db.conn()
            .execute("INSERT INTO SiteModel (SITE_ID, URL) VALUES (1, 'https://example.com')", [])
            .unwrap();

        let count = db.reset().unwrap();
        assert_eq!(count, schema::CATALOG.len());
        assert_eq!(db.schema_version().unwrap(), DB_VERSION);

        let fresh = FluxDatabase::open_memory(addons).unwrap();
        assert_eq!(db.snapshot().unwrap(), fresh.snapshot().unwrap());

        let sites: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM SiteModel", [], |row| row.get(0))
            .unwrap();
        assert_eq!(sites, 0);
    }

    #[test]
    fn test_reset_leaves_unknown_tables() {
        let mut db = FluxDatabase::open_memory(AddOnSet::none()).unwrap();
        db.conn().execute_batch("CREATE TABLE Leftover (X TEXT)").unwrap();

        db.reset().unwrap();
        assert!(db.snapshot().unwrap().columns("Leftover").is_some());
    }

    #[test]
    fn test_upgrade_moves_account_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        {
            let conn = Connection::open(&path).unwrap();
            schema::create_baseline(&conn).unwrap();
        }
        let mut defaults = Preferences::load(prefs_dir(&path).join("default.json")).unwrap();
        defaults.put(ACCOUNT_TOKEN_PREF_KEY, "token-123").unwrap();

        let db = FluxDatabase::open(&path, AddOnSet::none()).unwrap();
        assert_eq!(db.preferences().fluxc.get(ACCOUNT_TOKEN_PREF_KEY), Some("token-123"));

        let on_disk = Preferences::load(prefs_dir(&path).join(FLUXC_PREFS_FILE)).unwrap();
        assert_eq!(on_disk.get(ACCOUNT_TOKEN_PREF_KEY), Some("token-123"));
        let defaults = Preferences::load(prefs_dir(&path).join("default.json")).unwrap();
        assert!(defaults.get(ACCOUNT_TOKEN_PREF_KEY).is_none());
    }

    #[test]
    fn test_inspect_does_not_upgrade() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        {
            let conn = Connection::open(&path).unwrap();
            schema::create_baseline(&conn).unwrap();
        }

        let info = FluxDatabase::inspect(&path).unwrap();
        assert_eq!(info.version, 1);
        assert_eq!(info.snapshot.len(), schema::BASELINE.len());

        assert!(matches!(
            FluxDatabase::inspect(&dir.path().join("missing.db")),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_order_list_requires_woocommerce() {
        let db = FluxDatabase::open_memory(AddOnSet::none()).unwrap();
        let err = db.order_list(1, Utc::now()).unwrap_err();
        assert!(matches!(err, Error::AddOnRequired { ref addon } if addon == "WC"));
    }

    #[test]
    fn test_order_list_groups_and_resolves() {
        let db = FluxDatabase::open_memory(AddOnSet::all()).unwrap();
        let conn = db.conn();
        conn.execute("INSERT INTO SiteModel (_id, SITE_ID) VALUES (1, 100)", [])
            .unwrap();
        for (remote_id, date) in [
            (501, "2019-03-15T10:00:00Z"),
            (502, "2019-03-14T10:00:00Z"),
            (503, "2019-03-15T11:00:00Z"),
        ] {
            conn.execute(
                "INSERT INTO WCOrderSummaryModel (LOCAL_SITE_ID, REMOTE_ORDER_ID, DATE_CREATED)
                 VALUES (1, ?1, ?2)",
                params![remote_id, date],
            )
            .unwrap();
        }
        conn.execute(
            "INSERT INTO WCOrderModel (LOCAL_SITE_ID, REMOTE_ORDER_ID, NUMBER, STATUS, CURRENCY,
                DATE_CREATED, TOTAL, TOTAL_TAX, SHIPPING_TOTAL, PAYMENT_METHOD, PAYMENT_METHOD_TITLE,
                CUSTOMER_NOTE, DISCOUNT_TOTAL, DISCOUNT_CODES, BILLING_FIRST_NAME, BILLING_LAST_NAME,
                BILLING_COMPANY, BILLING_ADDRESS1, BILLING_ADDRESS2, BILLING_CITY, BILLING_STATE,
                BILLING_POSTCODE, BILLING_COUNTRY, BILLING_EMAIL, BILLING_PHONE, SHIPPING_FIRST_NAME,
                SHIPPING_LAST_NAME, SHIPPING_COMPANY, SHIPPING_ADDRESS1, SHIPPING_ADDRESS2,
                SHIPPING_CITY, SHIPPING_STATE, SHIPPING_POSTCODE, SHIPPING_COUNTRY, LINE_ITEMS)
             VALUES (1, 503, '1003', 'processing', 'USD', '2019-03-15T11:00:00Z', '25.00', '0',
                '0', '', '', '', '0', '', 'Ada', 'Lovelace', '', '', '', '', '', '', '', '', '',
                '', '', '', '', '', '', '', '', '', '[]')",
            [],
        )
        .unwrap();

        let now = Utc.with_ymd_and_hms(2019, 3, 15, 12, 0, 0).unwrap();
        let items = db.order_list(1, now).unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(items[0], OrderListItem::SectionHeader { group: TimeGroup::Today });
        match &items[1] {
            OrderListItem::Order(row) => {
                assert_eq!(row.remote_order_id, 503);
                assert_eq!(row.number, "1003");
                assert_eq!(row.name, "Ada Lovelace");
                assert_eq!(row.total, "25.00");
            }
            other => panic!("expected a cached order, got {other:?}"),
        }
        assert_eq!(items[2], OrderListItem::Loading { remote_order_id: 501 });
        assert_eq!(items[3], OrderListItem::SectionHeader { group: TimeGroup::Yesterday });
        assert_eq!(items[4], OrderListItem::Loading { remote_order_id: 502 });
    }

    fn insert_summaries(db: &FluxDatabase, rows: &[(Option<i64>, &str)]) {
        let conn = db.conn();
        conn.execute("INSERT INTO SiteModel (_id, SITE_ID) VALUES (1, 100)", [])
            .unwrap();
        for (remote_id, date) in rows {
            conn.execute(
                "INSERT INTO WCOrderSummaryModel (LOCAL_SITE_ID, REMOTE_ORDER_ID, DATE_CREATED)
                 VALUES (1, ?1, ?2)",
                params![remote_id, date],
            )
            .unwrap();
        }
    }

    #[test]
    fn test_order_list_reads_null_remote_id_as_zero() {
        let db = FluxDatabase::open_memory(AddOnSet::all()).unwrap();
        insert_summaries(
            &db,
            &[(Some(7), "2019-03-15T10:00:00Z"), (None, "2019-03-15T09:00:00Z")],
        );

        let now = Utc.with_ymd_and_hms(2019, 3, 15, 12, 0, 0).unwrap();
        let items = db.order_list(1, now).unwrap();

        assert_eq!(
            items,
            vec![
                OrderListItem::SectionHeader { group: TimeGroup::Today },
                OrderListItem::Loading { remote_order_id: 7 },
                OrderListItem::Loading { remote_order_id: 0 },
            ]
        );
    }

    #[test]
    fn test_order_summaries_sort_by_instant() {
        let db = FluxDatabase::open_memory(AddOnSet::all()).unwrap();
        // 09:30Z is later than 10:00+02:00 (08:00Z), though it sorts lower as text.
        insert_summaries(
            &db,
            &[
                (Some(1), "2019-03-15T10:00:00+02:00"),
                (Some(2), "2019-03-15T09:30:00Z"),
                (Some(3), "2019-03-15T08:45:00Z"),
            ],
        );

        let ids: Vec<i64> = db
            .order_summaries(1)
            .unwrap()
            .iter()
            .map(|s| s.remote_order_id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
