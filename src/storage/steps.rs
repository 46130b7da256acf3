//! The `wp-fluxc` migration step table.
//!
//! Statements are kept exactly as they were first shipped: existing
//! databases in the field were upgraded with this SQL, so edits here
//! would fork the schema. Add new steps at the end and bump
//! [`DB_VERSION`](super::schema::DB_VERSION).

use rusqlite::Transaction;
use tracing::debug;

use crate::config::ACCOUNT_TOKEN_PREF_KEY;
use crate::error::Result;
use crate::model::AddOn;
use crate::storage::migrations::{MigrationContext, MigrationStep};

/// Every registered step, sorted by version.
pub static STEPS: &[MigrationStep] = &[
    MigrationStep::sql(1, &[
        "alter table SiteModel add ICON_URL text",
    ]),
    MigrationStep::sql(2, &[
        "alter table SiteModel add FRAME_NONCE text",
    ]),
    MigrationStep::sql(3, &[
        "alter table AccountModel add EMAIL_VERIFIED boolean",
    ]),
    MigrationStep::sql(4, &[
        "alter table SiteModel add ORIGIN integer",
    ]),
    MigrationStep::sql(5, &[
        "alter table SiteModel add HAS_FREE_PLAN boolean",
    ]),
    MigrationStep::sql(6, &[
        "alter table SiteModel add UNMAPPED_URL text",
    ]),
    MigrationStep::sql(7, &[
        concat!(
            "CREATE TABLE IF NOT EXISTS MediaModel (",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "MEDIA_ID INTEGER,",
            "POST_ID INTEGER,",
            "AUTHOR_ID INTEGER,",
            "GUID TEXT,",
            "UPLOAD_DATE TEXT,",
            "URL TEXT,",
            "THUMBNAIL_URL TEXT,",
            "FILE_NAME TEXT,",
            "FILE_PATH TEXT,",
            "FILE_EXTENSION TEXT,",
            "MIME_TYPE TEXT,",
            "TITLE TEXT,",
            "CAPTION TEXT,",
            "DESCRIPTION TEXT,",
            "ALT TEXT,",
            "WIDTH INTEGER,",
            "HEIGHT INTEGER,",
            "LENGTH INTEGER,",
            "VIDEO_PRESS_GUID TEXT,",
            "VIDEO_PRESS_PROCESSING_DONE INTEGER,",
            "BLOG_ID INTEGER,",
            "HORIZONTAL_ALIGNMENT INTEGER,",
            "VERTICAL_ALIGNMENT INTEGER,",
            "FEATURED INTEGER,",
            "FEATURED_IN_POST INTEGER)",
        ),
        "alter table MediaModel add LOCAL_POST_ID integer",
    ]),
    MigrationStep::sql(8, &[
        "alter table MediaModel add FILE_URL_MEDIUM_SIZE text",
        "alter table MediaModel add FILE_URL_MEDIUM_LARGE_SIZE text",
        "alter table MediaModel add FILE_URL_LARGE_SIZE text",
    ]),
    MigrationStep::sql(9, &[
        "alter table SiteModel add MAX_UPLOAD_SIZE integer",
    ]),
    MigrationStep::sql(10, &[
        "alter table SiteModel add MEMORY_LIMIT integer",
    ]),
    MigrationStep::sql(11, &[
        concat!(
            "CREATE TABLE RoleModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,",
            "NAME TEXT,DISPLAY_NAME TEXT)",
        ),
    ]),
    MigrationStep::sql(12, &[
        concat!(
            "CREATE TABLE PluginModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "NAME TEXT,DISPLAY_NAME TEXT,PLUGIN_URL TEXT,VERSION TEXT,SLUG TEXT,DESCRIPTION TEXT,",
            "AUTHOR_NAME TEXT,AUTHOR_URL TEXT,IS_ACTIVE INTEGER,IS_AUTO_UPDATE_ENABLED INTEGER)",
        ),
    ]),
    MigrationStep::sql(13, &[
        concat!(
            "CREATE TABLE PluginInfoModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "NAME TEXT,SLUG TEXT,VERSION TEXT,RATING TEXT,ICON TEXT)",
        ),
    ]),
    MigrationStep::sql(14, &[
        concat!(
            "CREATE TABLE MediaUploadModel (_id INTEGER PRIMARY KEY,UPLOAD_STATE INTEGER,",
            "PROGRESS REAL,ERROR_TYPE TEXT,ERROR_MESSAGE TEXT,FOREIGN KEY(_id) REFERENCES ",
            "MediaModel(_id) ON DELETE CASCADE)",
        ),
        concat!(
            "CREATE TABLE PostUploadModel (_id INTEGER PRIMARY KEY,UPLOAD_STATE INTEGER,",
            "ASSOCIATED_MEDIA_IDS TEXT,ERROR_TYPE TEXT,ERROR_MESSAGE TEXT,",
            "FOREIGN KEY(_id) REFERENCES PostModel(_id) ON DELETE CASCADE)",
        ),
    ]),
    MigrationStep::sql(15, &[
        concat!(
            "CREATE TABLE ThemeModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "THEME_ID TEXT,NAME TEXT,DESCRIPTION TEXT,SLUG TEXT,VERSION TEXT,AUTHOR_NAME TEXT,",
            "AUTHOR_URL TEXT,THEME_URL TEXT,SCREENSHOT_URL TEXT,DEMO_URL TEXT,DOWNLOAD_URL TEXT,",
            "STYLESHEET TEXT,CURRENCY TEXT,PRICE REAL,ACTIVE INTEGER,AUTO_UPDATE INTEGER,",
            "AUTO_UPDATE_TRANSLATION INTEGER,IS_WP_COM_THEME INTEGER)",
        ),
    ]),
    MigrationStep::sql(16, &[
        "alter table ThemeModel add FREE integer",
        "alter table ThemeModel add PRICE_TEXT integer",
    ]),
    MigrationStep::sql(17, &[
        "alter table SiteModel add EMAIL text",
        "alter table SiteModel add DISPLAY_NAME text",
    ]),
    MigrationStep::sql(18, &[
        "alter table SiteModel add JETPACK_VERSION text",
    ]),
    MigrationStep::sql(19, &[
        concat!(
            "CREATE TABLE IF NOT EXISTS TermModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "REMOTE_TERM_ID INTEGER,",
            "TAXONOMY TEXT,",
            "NAME TEXT,",
            "SLUG TEXT,",
            "DESCRIPTION TEXT,",
            "PARENT_REMOTE_ID INTEGER)",
        ),
        "alter table TermModel add POST_COUNT integer",
    ]),
    MigrationStep::sql(20, &[
        "alter table PluginModel rename to SitePluginModel",
        "alter table PluginInfoModel rename to WPOrgPluginModel",
    ]),
    MigrationStep::sql(21, &[
        "alter table SitePluginModel add SETTINGS_URL text",
        "alter table WPOrgPluginModel add AUTHOR_AS_HTML TEXT",
        "alter table WPOrgPluginModel add BANNER TEXT",
        "alter table WPOrgPluginModel add DESCRIPTION_AS_HTML TEXT",
        "alter table WPOrgPluginModel add FAQ_AS_HTML TEXT",
        "alter table WPOrgPluginModel add HOMEPAGE_URL TEXT",
        "alter table WPOrgPluginModel add INSTALLATION_INSTRUCTIONS_AS_HTML TEXT",
        "alter table WPOrgPluginModel add LAST_UPDATED TEXT",
        "alter table WPOrgPluginModel add REQUIRED_WORD_PRESS_VERSION TEXT",
        "alter table WPOrgPluginModel add WHATS_NEW_AS_HTML TEXT",
        "alter table WPOrgPluginModel add DOWNLOAD_COUNT INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS_OF_ONE INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS_OF_TWO INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS_OF_THREE INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS_OF_FOUR INTEGER",
        "alter table WPOrgPluginModel add NUMBER_OF_RATINGS_OF_FIVE INTEGER",
    ]),
    MigrationStep::sql(22, &[
        "alter table ThemeModel add MOBILE_FRIENDLY_CATEGORY_SLUG text",
    ]),
    MigrationStep::sql(23, &[
        concat!(
            "CREATE TABLE PluginDirectoryModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "SLUG TEXT,DIRECTORY_TYPE TEXT,PAGE INTEGER)",
        ),
    ]),
    MigrationStep::sql(24, &[
        "DELETE FROM PluginDirectoryModel",
        "DROP TABLE IF EXISTS SitePluginModel",
        "DROP TABLE IF EXISTS WPOrgPluginModel",
        concat!(
            "CREATE TABLE SitePluginModel (",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "NAME TEXT,DISPLAY_NAME TEXT,PLUGIN_URL TEXT,VERSION TEXT,SLUG TEXT,DESCRIPTION TEXT,",
            "AUTHOR_NAME TEXT,AUTHOR_URL TEXT,SETTINGS_URL TEXT,IS_ACTIVE INTEGER,",
            "IS_AUTO_UPDATE_ENABLED INTEGER,UNIQUE (SLUG, LOCAL_SITE_ID))",
        ),
        concat!(
            "CREATE TABLE WPOrgPluginModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "AUTHOR_AS_HTML TEXT,AUTHOR_NAME TEXT,BANNER TEXT,DESCRIPTION_AS_HTML TEXT,",
            "DISPLAY_NAME TEXT,FAQ_AS_HTML TEXT,HOMEPAGE_URL TEXT,ICON TEXT,",
            "INSTALLATION_INSTRUCTIONS_AS_HTML TEXT,LAST_UPDATED TEXT,RATING TEXT,",
            "REQUIRED_WORD_PRESS_VERSION TEXT,SLUG TEXT,VERSION TEXT,WHATS_NEW_AS_HTML TEXT,",
            "DOWNLOAD_COUNT INTEGER,NUMBER_OF_RATINGS INTEGER,NUMBER_OF_RATINGS_OF_ONE INTEGER,",
            "NUMBER_OF_RATINGS_OF_TWO INTEGER,NUMBER_OF_RATINGS_OF_THREE INTEGER,",
            "NUMBER_OF_RATINGS_OF_FOUR INTEGER,NUMBER_OF_RATINGS_OF_FIVE INTEGER,UNIQUE (SLUG))",
        ),
    ]),
    MigrationStep::sql(25, &[
        "alter table SiteModel add SPACE_AVAILABLE INTEGER",
        "alter table SiteModel add SPACE_ALLOWED INTEGER",
        "alter table SiteModel add SPACE_USED INTEGER",
        "alter table SiteModel add SPACE_PERCENT_USED REAL",
    ]),
    MigrationStep::sql(26, &[
        "ALTER TABLE SiteModel ADD IS_WP_COM_STORE INTEGER",
        "ALTER TABLE SiteModel ADD HAS_WOO_COMMERCE INTEGER",
    ]),
    MigrationStep::sql(27, &[
        "alter table AccountModel add TRACKS_OPT_OUT boolean",
    ]),
    MigrationStep::sql(28, &[
        concat!(
            "CREATE TABLE ActivityLogModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,ACTIVITY_ID TEXT NOT NULL,",
            "SUMMARY TEXT NOT NULL,TEXT TEXT NOT NULL,NAME TEXT,TYPE TEXT,GRIDICON TEXT,",
            "STATUS TEXT,REWINDABLE INTEGER,REWIND_ID TEXT,PUBLISHED TEXT NOT NULL,",
            "DISCARDED INTEGER,DISPLAY_NAME TEXT,ACTOR_TYPE TEXT,WPCOM_USER_ID INTEGER,",
            "AVATAR_URL TEXT,ROLE TEXT)",
        ),
        concat!(
            "CREATE TABLE RewindStatus (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,REWIND_STATE TEXT,REASON TEXT,RESTORE_ID TEXT,",
            "RESTORE_STATE TEXT,RESTORE_PROGRESS INTEGER,RESTORE_MESSAGE TEXT,",
            "RESTORE_ERROR_CODE TEXT,RESTORE_FAILURE_REASON TEXT)",
        ),
    ]),
    MigrationStep::sql(29, &[
        concat!(
            "CREATE TABLE SubscriptionModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "SUBSCRIPTION_ID TEXT,BLOG_ID TEXT,BLOG_NAME TEXT,FEED_ID TEXT,URL TEXT,",
            "SHOULD_NOTIFY_POSTS INTEGER,SHOULD_EMAIL_POSTS INTEGER,",
            "EMAIL_POSTS_FREQUENCY TEXT,SHOULD_EMAIL_COMMENTS INTEGER)",
        ),
    ]),
    MigrationStep::sql(30, &[
        "DROP TABLE IF EXISTS ActivityLogModel",
        concat!(
            "CREATE TABLE IF NOT EXISTS ActivityLog (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,ACTIVITY_ID TEXT NOT NULL,",
            "SUMMARY TEXT NOT NULL,TEXT TEXT NOT NULL,NAME TEXT,TYPE TEXT,GRIDICON TEXT,",
            "STATUS TEXT,REWINDABLE INTEGER,REWIND_ID TEXT,PUBLISHED INTEGER,DISCARDED INTEGER,",
            "DISPLAY_NAME TEXT,ACTOR_TYPE TEXT,WPCOM_USER_ID INTEGER,AVATAR_URL TEXT,ROLE TEXT)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 31, &[
        "DROP TABLE IF EXISTS WCOrderModel",
        "DROP TABLE IF EXISTS WCOrderNoteModel",
        concat!(
            "CREATE TABLE WCOrderModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_ORDER_ID INTEGER,NUMBER TEXT NOT NULL,",
            "STATUS TEXT NOT NULL,CURRENCY TEXT NOT NULL,DATE_CREATED TEXT NOT NULL,",
            "TOTAL TEXT NOT NULL,TOTAL_TAX TEXT NOT NULL,SHIPPING_TOTAL TEXT NOT NULL,",
            "PAYMENT_METHOD TEXT NOT NULL,PAYMENT_METHOD_TITLE TEXT NOT NULL,",
            "PRICES_INCLUDE_TAX INTEGER,CUSTOMER_NOTE TEXT NOT NULL,DISCOUNT_TOTAL TEXT NOT NULL,",
            "DISCOUNT_CODES TEXT NOT NULL,REFUND_TOTAL REAL,BILLING_FIRST_NAME TEXT NOT NULL,",
            "BILLING_LAST_NAME TEXT NOT NULL,BILLING_COMPANY TEXT NOT NULL,",
            "BILLING_ADDRESS1 TEXT NOT NULL,BILLING_ADDRESS2 TEXT NOT NULL,",
            "BILLING_CITY TEXT NOT NULL,BILLING_STATE TEXT NOT NULL,",
            "BILLING_POSTCODE TEXT NOT NULL,BILLING_COUNTRY TEXT NOT NULL,",
            "BILLING_EMAIL TEXT NOT NULL,BILLING_PHONE TEXT NOT NULL,",
            "SHIPPING_FIRST_NAME TEXT NOT NULL,SHIPPING_LAST_NAME TEXT NOT NULL,",
            "SHIPPING_COMPANY TEXT NOT NULL,SHIPPING_ADDRESS1 TEXT NOT NULL,",
            "SHIPPING_ADDRESS2 TEXT NOT NULL,SHIPPING_CITY TEXT NOT NULL,",
            "SHIPPING_STATE TEXT NOT NULL,SHIPPING_POSTCODE TEXT NOT NULL,",
            "SHIPPING_COUNTRY TEXT NOT NULL,LINE_ITEMS TEXT NOT NULL)",
        ),
        concat!(
            "CREATE TABLE WCOrderNoteModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,LOCAL_ORDER_ID INTEGER,REMOTE_NOTE_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,NOTE TEXT NOT NULL,IS_CUSTOMER_NOTE INTEGER)",
        ),
    ]),
    MigrationStep::sql(32, &[
        "DROP TABLE IF EXISTS RewindStatus",
        concat!(
            "CREATE TABLE RewindStatus (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,STATE TEXT NOT NULL,",
            "LAST_UPDATED INTEGER,REASON TEXT,CAN_AUTOCONFIGURE INTEGER,REWIND_ID TEXT,",
            "REWIND_STATUS TEXT,REWIND_STARTED_AT INTEGER,REWIND_PROGRESS INTEGER,",
            "REWIND_REASON TEXT)",
        ),
        concat!(
            "CREATE TABLE RewindStatusCredentials (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REWIND_STATE_ID INTEGER,TYPE TEXT NOT NULL,ROLE TEXT NOT NULL,STILL_VALID INTEGER,",
            "HOST TEXT,PORT INTEGER)",
        ),
    ]),
    MigrationStep::sql(33, &[
        "DROP TABLE IF EXISTS RewindStatusCredentials",
        concat!(
            "CREATE TABLE RewindStatusCredentials (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,REWIND_STATE_ID INTEGER,",
            "TYPE TEXT NOT NULL,ROLE TEXT NOT NULL,STILL_VALID INTEGER,HOST TEXT,PORT INTEGER)",
        ),
    ]),
    MigrationStep::sql(34, &[
        "DROP TABLE IF EXISTS RewindStatus",
        concat!(
            "CREATE TABLE RewindStatus (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,STATE TEXT NOT NULL,",
            "LAST_UPDATED INTEGER,REASON TEXT,CAN_AUTOCONFIGURE INTEGER,REWIND_ID TEXT,",
            "REWIND_STATUS TEXT,REWIND_PROGRESS INTEGER,REWIND_REASON TEXT)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 35, &[
        concat!(
            "CREATE TABLE WCOrderStatsModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,UNIT TEXT NOT NULL,FIELDS TEXT NOT NULL,DATA TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(36, &[
        "DROP TABLE IF EXISTS RewindStatus",
        concat!(
            "CREATE TABLE RewindStatus (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,STATE TEXT NOT NULL,",
            "LAST_UPDATED INTEGER,REASON TEXT,CAN_AUTOCONFIGURE INTEGER,REWIND_ID TEXT,",
            "RESTORE_ID INTEGER,REWIND_STATUS TEXT,REWIND_PROGRESS INTEGER,REWIND_REASON TEXT)",
        ),
    ]),
    MigrationStep::sql(37, &[
        "DROP TABLE IF EXISTS QuickStartModel",
        concat!(
            "CREATE TABLE QuickStartTaskModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "SITE_ID INTEGER,TASK_NAME TEXT,IS_DONE INTEGER,IS_SHOWN INTEGER)",
        ),
        concat!(
            "CREATE TABLE QuickStartStatusModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "SITE_ID INTEGER,IS_COMPLETED INTEGER,IS_NOTIFICATION_RECEIVED INTEGER)",
        ),
    ]),
    MigrationStep::run(38, move_account_token),
    MigrationStep::sql(39, &[
        "DROP TABLE IF EXISTS QuickStartModel",
        concat!(
            "CREATE TABLE IF NOT EXISTS QuickStartTaskModel (",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,TASK_NAME TEXT,",
            "IS_DONE INTEGER,IS_SHOWN INTEGER)",
        ),
        concat!(
            "CREATE TABLE IF NOT EXISTS QuickStartStatusModel (",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,IS_COMPLETED INTEGER,",
            "IS_NOTIFICATION_RECEIVED INTEGER)",
        ),
    ]),
    MigrationStep::sql(40, &[
        "DROP TABLE IF EXISTS ActivityLog",
        concat!(
            "CREATE TABLE ActivityLog (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,ACTIVITY_ID TEXT NOT NULL,SUMMARY TEXT NOT NULL,",
            "FORMATTABLE_CONTENT TEXT NOT NULL,NAME TEXT,TYPE TEXT,GRIDICON TEXT,STATUS TEXT,",
            "REWINDABLE INTEGER,REWIND_ID TEXT,PUBLISHED INTEGER,DISCARDED INTEGER,",
            "DISPLAY_NAME TEXT,ACTOR_TYPE TEXT,WPCOM_USER_ID INTEGER,AVATAR_URL TEXT,ROLE TEXT)",
        ),
    ]),
    MigrationStep::sql(41, &[
        concat!(
            "CREATE TABLE LocalDiffModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REVISION_ID INTEGER,POST_ID INTEGER,SITE_ID INTEGER,OPERATION TEXT,VALUE TEXT,",
            "DIFF_TYPE TEXT)",
        ),
        concat!(
            "CREATE TABLE LocalRevisionModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REVISION_ID INTEGER,POST_ID INTEGER,SITE_ID INTEGER,DIFF_FROM_VERSION INTEGER,",
            "TOTAL_ADDITIONS INTEGER,TOTAL_DELETIONS INTEGER,POST_CONTENT TEXT,",
            "POST_EXCERPT TEXT,POST_TITLE TEXT,POST_DATE_GMT TEXT,POST_MODIFIED_GMT TEXT,",
            "POST_AUTHOR_ID TEXT)",
        ),
    ]),
    MigrationStep::sql(42, &[
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,TYPE TEXT NOT NULL,JSON TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(43, &[
        concat!(
            "CREATE TABLE ListModel (LAST_MODIFIED TEXT,",
            "DESCRIPTOR_UNIQUE_IDENTIFIER_DB_VALUE INTEGER,",
            "DESCRIPTOR_TYPE_IDENTIFIER_DB_VALUE INTEGER,STATE_DB_VALUE INTEGER,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
        concat!(
            "CREATE TABLE ListItemModel (LIST_ID INTEGER,REMOTE_ITEM_ID INTEGER,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LIST_ID) REFERENCES ListModel(_id) ON DELETE CASCADE,",
            "UNIQUE(LIST_ID, REMOTE_ITEM_ID) ON CONFLICT IGNORE)",
        ),
        "ALTER TABLE PostModel ADD LAST_MODIFIED TEXT",
    ]),
    MigrationStep::sql(44, &[
        "DROP TABLE IF EXISTS StatsBlock",
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,JSON TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 45, &[
        "ALTER TABLE WCOrderNoteModel ADD IS_SYSTEM_NOTE INTEGER",
    ]),
    MigrationStep::sql(45, &[
        concat!(
            "CREATE TABLE NotificationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REMOTE_NOTE_ID INTEGER,LOCAL_SITE_ID INTEGER,NOTE_HASH INTEGER,TYPE TEXT,",
            "SUBTYPE TEXT,READ INTEGER,ICON TEXT,NOTICON TEXT,TIMESTAMP TEXT,URL TEXT,",
            "TITLE TEXT,FORMATTABLE_BODY TEXT,FORMATTABLE_SUBJECT TEXT,FORMATTABLE_META TEXT)",
        ),
    ]),
    MigrationStep::sql(46, &[
        "DROP TABLE IF EXISTS StatsBlock",
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT NOT NULL,",
            "JSON TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(47, &[
        "DROP TABLE IF EXISTS StatsBlock",
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT NOT NULL,",
            "JSON TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(48, &[
        "ALTER TABLE PostModel ADD REMOTE_LAST_MODIFIED TEXT",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 49, &[
        concat!(
            "CREATE TABLE WCSettingsModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,CURRENCY_CODE TEXT NOT NULL,CURRENCY_POSITION TEXT NOT NULL,",
            "CURRENCY_THOUSAND_SEPARATOR TEXT NOT NULL,CURRENCY_DECIMAL_SEPARATOR TEXT NOT NULL,",
            "CURRENCY_DECIMAL_NUMBER INTEGER)",
        ),
    ]),
    MigrationStep::sql(50, &[
        concat!(
            "CREATE TABLE PlanOffers (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "INTERNAL_PLAN_ID INTEGER,NAME TEXT,SHORT_NAME TEXT,TAGLINE TEXT,",
            "DESCRIPTION TEXT,ICON TEXT)",
        ),
        concat!(
            "CREATE TABLE PlanOffersId (_id INTEGER PRIMARY KEY AUTOINCREMENT,PRODUCT_ID INTEGER,",
            "INTERNAL_PLAN_ID INTEGER)",
        ),
        concat!(
            "CREATE TABLE PlanOffersFeature (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "INTERNAL_PLAN_ID INTEGER,STRING_ID TEXT UNIQUE,NAME TEXT,DESCRIPTION TEXT)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 51, &[
        concat!(
            "CREATE TABLE WCOrderStatusModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,STATUS_KEY TEXT NOT NULL,LABEL TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(52, &[
        concat!(
            "CREATE TABLE PlanOffersFeatureTemp (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "INTERNAL_PLAN_ID INTEGER,STRING_ID TEXT,NAME TEXT,DESCRIPTION TEXT)",
        ),
        "INSERT INTO PlanOffersFeatureTemp SELECT * FROM PlanOffersFeature",
        "DROP TABLE PlanOffersFeature",
        "ALTER TABLE PlanOffersFeatureTemp RENAME TO PlanOffersFeature",
    ]),
    MigrationStep::sql(53, &[
        "ALTER TABLE QuickStartTaskModel ADD TASK_TYPE TEXT",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 54, &[
        "ALTER TABLE WCOrderStatsModel ADD IS_CUSTOM_FIELD INTEGER",
        "ALTER TABLE WCOrderStatsModel ADD DATE TEXT",
        "ALTER TABLE WCOrderStatsModel ADD ENDDATE TEXT",
        "ALTER TABLE WCOrderStatsModel ADD STARTDATE TEXT",
        "ALTER TABLE WCOrderStatsModel ADD QUANTITY TEXT",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 55, &[
        "DROP TABLE IF EXISTS WCOrderStatsModel",
        concat!(
            "CREATE TABLE WCOrderStatsModel(",
            "LOCAL_SITE_ID INTEGER,",
            "UNIT TEXT NOT NULL,",
            "DATE TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,",
            "END_DATE TEXT NOT NULL,",
            "QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,",
            "FIELDS TEXT NOT NULL,",
            "DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 56, &[
        "DROP TABLE IF EXISTS WCProductModel",
        concat!(
            "CREATE TABLE WCProductModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_PRODUCT_ID INTEGER,",
            "NAME TEXT NOT NULL,SLUG TEXT NOT NULL,PERMALINK TEXT NOT NULL,",
            "DATE_CREATED TEXT NOT NULL,DATE_MODIFIED TEXT NOT NULL,",
            "TYPE TEXT NOT NULL,STATUS TEXT NOT NULL,FEATURED INTEGER,",
            "CATALOG_VISIBILITY TEXT NOT NULL,DESCRIPTION TEXT NOT NULL,",
            "SHORT_DESCRIPTION TEXT NOT NULL,SKU TEXT NOT NULL,",
            "PRICE TEXT NOT NULL,REGULAR_PRICE TEXT NOT NULL, SALE_PRICE TEXT NOT NULL,",
            "ON_SALE INTEGER,TOTAL_SALES INTEGER,VIRTUAL INTEGER,DOWNLOADABLE INTEGER,",
            "TAX_STATUS TEXT NOT NULL,TAX_CLASS TEXT NOT NULL,",
            "MANAGE_STOCK INTEGER,STOCK_QUANTITY INTEGER,STOCK_STATUS TEXT NOT NULL,",
            "BACKORDERS TEXT NOT NULL,BACKORDERS_ALLOWED INTEGER,BACKORDERED INTEGER,",
            "SOLD_INDIVIDUALLY INTEGER,WEIGHT TEXT NOT NULL,LENGTH TEXT NOT NULL,",
            "WIDTH TEXT NOT NULL,HEIGHT TEXT NOT NULL,SHIPPING_REQUIRED INTEGER,",
            "SHIPPING_TAXABLE INTEGER,SHIPPING_CLASS TEXT NOT NULL,",
            "SHIPPING_CLASS_ID INTEGER,REVIEWS_ALLOWED INTEGER,AVERAGE_RATING TEXT NOT NULL,",
            "RATING_COUNT INTEGER,PARENT_ID INTEGER,PURCHASE_NOTE TEXT NOT NULL,",
            "CATEGORIES TEXT NOT NULL,TAGS TEXT NOT NULL,",
            "IMAGES TEXT NOT NULL,ATTRIBUTES TEXT NOT NULL,",
            "VARIATIONS TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 57, &[
        "DELETE FROM WCOrderStatsModel",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 58, &[
        "DROP TABLE IF EXISTS WCProductVariationModel",
        concat!(
            "CREATE TABLE WCProductVariationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "REMOTE_PRODUCT_ID INTEGER,",
            "REMOTE_VARIATION_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,",
            "DATE_MODIFIED TEXT NOT NULL,",
            "DESCRIPTION TEXT NOT NULL,",
            "PERMALINK TEXT NOT NULL,",
            "SKU TEXT NOT NULL,",
            "STATUS TEXT NOT NULL,",
            "PRICE TEXT NOT NULL,",
            "REGULAR_PRICE TEXT NOT NULL,",
            "SALE_PRICE TEXT NOT NULL,",
            "ON_SALE INTEGER,",
            "PURCHASABLE INTEGER,",
            "VIRTUAL INTEGER,",
            "DOWNLOADABLE INTEGER,",
            "MANAGE_STOCK INTEGER,",
            "STOCK_QUANTITY INTEGER,",
            "STOCK_STATUS TEXT NOT NULL,",
            "IMAGE_URL TEXT NOT NULL,",
            "WEIGHT TEXT NOT NULL,",
            "LENGTH TEXT NOT NULL,",
            "WIDTH TEXT NOT NULL,",
            "HEIGHT TEXT NOT NULL,",
            "ATTRIBUTES TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(59, &[
        "DROP TABLE IF EXISTS StatsBlock",
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT,POST_ID INTEGER,",
            "JSON TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(60, &[
        "DROP TABLE StatsBlock",
        concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT,POST_ID INTEGER,",
            "JSON TEXT NOT NULL)",
        ),
        concat!(
            "CREATE TABLE StatsRequest (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,",
            "DATE TEXT,TIME_STAMP INTEGER,REQUESTED_ITEMS INTEGER)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 61, &[
        "DROP TABLE IF EXISTS WCProductModel",
        concat!(
            "CREATE TABLE WCProductModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "REMOTE_PRODUCT_ID INTEGER,",
            "NAME TEXT NOT NULL,",
            "SLUG TEXT NOT NULL,",
            "PERMALINK TEXT NOT NULL,",
            "DATE_CREATED TEXT NOT NULL,",
            "DATE_MODIFIED TEXT NOT NULL,",
            "TYPE TEXT NOT NULL,",
            "STATUS TEXT NOT NULL,",
            "FEATURED INTEGER,",
            "CATALOG_VISIBILITY TEXT NOT NULL,",
            "DESCRIPTION TEXT NOT NULL,",
            "SHORT_DESCRIPTION TEXT NOT NULL,",
            "SKU TEXT NOT NULL,",
            "PRICE TEXT NOT NULL,",
            "REGULAR_PRICE TEXT NOT NULL,",
            "SALE_PRICE TEXT NOT NULL,",
            "ON_SALE INTEGER,",
            "TOTAL_SALES INTEGER,",
            "VIRTUAL INTEGER,",
            "DOWNLOADABLE INTEGER,",
            "DOWNLOAD_LIMIT INTEGER,",
            "DOWNLOAD_EXPIRY INTEGER,",
            "DOWNLOADS TEXT NOT NULL,",
            "EXTERNAL_URL TEXT NOT NULL,",
            "TAX_STATUS TEXT NOT NULL,",
            "TAX_CLASS TEXT NOT NULL,",
            "MANAGE_STOCK INTEGER,",
            "STOCK_QUANTITY INTEGER,",
            "STOCK_STATUS TEXT NOT NULL,",
            "BACKORDERS TEXT NOT NULL,",
            "BACKORDERS_ALLOWED INTEGER,",
            "BACKORDERED INTEGER,",
            "SOLD_INDIVIDUALLY INTEGER,",
            "WEIGHT TEXT NOT NULL,",
            "LENGTH TEXT NOT NULL,",
            "WIDTH TEXT NOT NULL,",
            "HEIGHT TEXT NOT NULL,",
            "SHIPPING_REQUIRED INTEGER,",
            "SHIPPING_TAXABLE INTEGER,",
            "SHIPPING_CLASS TEXT NOT NULL,",
            "SHIPPING_CLASS_ID INTEGER,",
            "REVIEWS_ALLOWED INTEGER,",
            "AVERAGE_RATING TEXT NOT NULL,",
            "RATING_COUNT INTEGER,",
            "PARENT_ID INTEGER,",
            "PURCHASE_NOTE TEXT NOT NULL,",
            "CATEGORIES TEXT NOT NULL,",
            "TAGS TEXT NOT NULL,",
            "IMAGES TEXT NOT NULL,",
            "ATTRIBUTES TEXT NOT NULL,",
            "RELATED_IDS TEXT NOT NULL,",
            "CROSS_SELL_IDS TEXT NOT NULL,",
            "UPSELL_IDS TEXT NOT NULL,",
            "VARIATIONS TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(61, &[
        "DROP TABLE StatsRequest",
        concat!(
            "CREATE TABLE StatsRequest (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,",
            "DATE TEXT,POST_ID INTEGER,TIME_STAMP INTEGER,REQUESTED_ITEMS INTEGER)",
        ),
    ]),
    MigrationStep::sql(62, &[
        "DROP TABLE StatsRequest",
        concat!(
            "CREATE TABLE StatsRequest (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,",
            "DATE TEXT,POST_ID INTEGER,TIME_STAMP INTEGER,REQUESTED_ITEMS INTEGER)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 63, &[
        concat!(
            "CREATE TABLE WCProductSettingsModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "WEIGHT_UNIT TEXT NOT NULL,",
            "DIMENSION_UNIT TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 64, &[
        concat!(
            "CREATE TABLE WCOrderShipmentTrackingModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "LOCAL_ORDER_ID INTEGER,",
            "REMOTE_TRACKING_ID TEXT NOT NULL,",
            "TRACKING_NUMBER TEXT NOT NULL,",
            "TRACKING_PROVIDER TEXT NOT NULL,",
            "TRACKING_LINK TEXT NOT NULL,",
            "DATE_SHIPPED TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 65, &[
        concat!(
            "CREATE TABLE WCOrderShipmentProviderModel (",
            "LOCAL_SITE_ID INTEGER,",
            "COUNTRY TEXT NOT NULL,",
            "CARRIER_NAME TEXT NOT NULL,",
            "CARRIER_LINK TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    ]),
    MigrationStep::sql(66, &[
        concat!(
            "CREATE TABLE InsightTypes (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,INSIGHT_TYPE TEXT NOT NULL,",
            "POSITION INTEGER,STATUS TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 67, &[
        "ALTER TABLE WCSettingsModel ADD COUNTRY_CODE TEXT",
    ]),
    MigrationStep::sql(68, &[
        "DROP TABLE IF EXISTS NotificationModel",
        concat!(
            "CREATE TABLE NotificationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REMOTE_NOTE_ID INTEGER,LOCAL_SITE_ID INTEGER,NOTE_HASH INTEGER,TYPE TEXT,",
            "SUBTYPE TEXT,READ INTEGER,ICON TEXT,NOTICON TEXT,TIMESTAMP TEXT,URL TEXT,",
            "TITLE TEXT,FORMATTABLE_BODY TEXT,FORMATTABLE_SUBJECT TEXT,FORMATTABLE_META TEXT,",
            "FOREIGN KEY(LOCAL_SITE_ID) REFERENCES SiteModel(_id) ON DELETE CASCADE)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 69, &[
        "ALTER TABLE WCOrderModel ADD DATE_MODIFIED TEXT",
        concat!(
            "CREATE TABLE WCOrderSummaryModel (LOCAL_SITE_ID INTEGER,REMOTE_ORDER_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LOCAL_SITE_ID) REFERENCES SiteModel(_id) ON DELETE CASCADE,",
            "UNIQUE (REMOTE_ORDER_ID, LOCAL_SITE_ID) ON CONFLICT REPLACE)",
        ),
    ]),
    MigrationStep::sql(70, &[
        "DROP TABLE IF EXISTS NotificationModel",
        concat!(
            "CREATE TABLE NotificationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REMOTE_NOTE_ID INTEGER,LOCAL_SITE_ID INTEGER,NOTE_HASH INTEGER,TYPE TEXT,",
            "SUBTYPE TEXT,READ INTEGER,ICON TEXT,NOTICON TEXT,TIMESTAMP TEXT,URL TEXT,",
            "TITLE TEXT,FORMATTABLE_BODY TEXT,FORMATTABLE_SUBJECT TEXT,FORMATTABLE_META TEXT)",
        ),
    ]),
    MigrationStep::sql(71, &[
        "ALTER TABLE MediaModel ADD MARKED_LOCALLY_AS_FEATURED INTEGER",
    ]),
    MigrationStep::sql(72, &[
        "ALTER TABLE PostUploadModel ADD NUMBER_OF_UPLOAD_ERRORS_OR_CANCELLATIONS INTEGER",
    ]),
    MigrationStep::sql(73, &[
        "DROP TABLE IF EXISTS NotificationModel",
        concat!(
            "CREATE TABLE NotificationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REMOTE_NOTE_ID INTEGER,REMOTE_SITE_ID INTEGER,NOTE_HASH INTEGER,TYPE TEXT,",
            "SUBTYPE TEXT,READ INTEGER,ICON TEXT,NOTICON TEXT,TIMESTAMP TEXT,URL TEXT,",
            "TITLE TEXT,FORMATTABLE_BODY TEXT,FORMATTABLE_SUBJECT TEXT,FORMATTABLE_META TEXT)",
        ),
    ]),
    MigrationStep::sql(74, &[
        "alter table SiteModel add WEB_EDITOR TEXT",
        "alter table SiteModel add MOBILE_EDITOR TEXT",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 75, &[
        concat!(
            "CREATE TABLE WCRevenueStatsModel(",
            "LOCAL_SITE_ID INTEGER,",
            "INTERVAL TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,",
            "END_DATE TEXT NOT NULL,",
            "DATA TEXT NOT NULL,",
            "TOTAL TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    ]),
    MigrationStep::sql(76, &[
        concat!(
            "CREATE TABLE PostSchedulingReminder (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "POST_ID INTEGER,SCHEDULED_TIME TEXT NOT NULL)",
        ),
    ]),
    MigrationStep::sql(77, &[
        "alter table PostModel add AUTHOR_ID INTEGER",
        "alter table PostModel add AUTHOR_DISPLAY_NAME TEXT",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 78, &[
        concat!(
            "CREATE TABLE WCVisitorStatsModel(",
            "LOCAL_SITE_ID INTEGER,",
            "UNIT TEXT NOT NULL,",
            "DATE TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,",
            "END_DATE TEXT NOT NULL,",
            "QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,",
            "FIELDS TEXT NOT NULL,",
            "DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    ]),
    MigrationStep::sql(79, &[
        "alter table PostModel add CHANGES_CONFIRMED_CONTENT_HASHCODE INTEGER",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 80, &[
        concat!(
            "CREATE TABLE WCNewVisitorStatsModel(",
            "LOCAL_SITE_ID INTEGER,",
            "GRANULARITY TEXT NOT NULL,",
            "DATE TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,",
            "END_DATE TEXT NOT NULL,",
            "QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,",
            "FIELDS TEXT NOT NULL,",
            "DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 81, &[
        concat!(
            "CREATE TABLE WCProductReviewModel (",
            "LOCAL_SITE_ID INTEGER,",
            "REMOTE_PRODUCT_REVIEW_ID INTEGER,",
            "REMOTE_PRODUCT_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,",
            "STATUS TEXT NOT NULL,",
            "REVIEWER_NAME TEXT NOT NULL,",
            "REVIEWER_EMAIL TEXT NOT NULL,",
            "REVIEW TEXT NOT NULL,",
            "RATING INTEGER,",
            "VERIFIED INTEGER,",
            "REVIEWER_AVATARS_JSON TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LOCAL_SITE_ID) REFERENCES SiteModel(_id) ON DELETE CASCADE,",
            "UNIQUE (REMOTE_PRODUCT_REVIEW_ID, REMOTE_PRODUCT_ID, LOCAL_SITE_ID) ",
            "ON CONFLICT REPLACE)",
        ),
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 82, &[
        "ALTER TABLE WCOrderModel ADD COLUMN DATE_PAID TEXT NOT NULL DEFAULT ''",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 83, &[
        "ALTER TABLE WCOrderStatusModel ADD STATUS_COUNT INTEGER",
    ]),
    MigrationStep::sql(84, &[
        "ALTER TABLE AccountModel ADD USERNAME_CAN_BE_CHANGED boolean",
    ]),
    MigrationStep::sql(85, &[
        "ALTER TABLE PostModel ADD AUTO_SAVE_REVISION_ID INTEGER",
        "ALTER TABLE PostModel ADD AUTO_SAVE_MODIFIED TEXT",
        "ALTER TABLE PostModel ADD REMOTE_AUTO_SAVE_MODIFIED TEXT",
        "ALTER TABLE PostModel ADD AUTO_SAVE_PREVIEW_URL TEXT",
        "ALTER TABLE PostModel ADD AUTO_SAVE_TITLE TEXT",
        "ALTER TABLE PostModel ADD AUTO_SAVE_CONTENT TEXT",
        "ALTER TABLE PostModel ADD AUTO_SAVE_EXCERPT TEXT",
    ]),
    MigrationStep::sql(86, &[
        "ALTER TABLE PostUploadModel ADD NUMBER_OF_AUTO_UPLOAD_ATTEMPTS INTEGER",
    ]),
    MigrationStep::addon(AddOn::WooCommerce, 87, &[
        "DROP TABLE IF EXISTS WCRefunds",
        concat!(
            "CREATE TABLE WCRefunds (",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,",
            "ORDER_ID INTEGER,",
            "REFUND_ID INTEGER,",
            "DATA TEXT NOT NULL)",
        ),
    ]),
];

/// Version 38: move the account token out of the default preferences.
fn move_account_token(_tx: &Transaction<'_>, ctx: &mut MigrationContext) -> Result<()> {
    let token = match ctx.prefs.default.get(ACCOUNT_TOKEN_PREF_KEY) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => return Ok(()),
    };

    debug!("Migrating token to fluxc-preferences");
    ctx.prefs.fluxc.put(ACCOUNT_TOKEN_PREF_KEY, &token)?;
    ctx.prefs.default.remove(ACCOUNT_TOKEN_PREF_KEY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddOnSet;
    use crate::storage::migrations::{Migrator, Mutation};
    use crate::storage::schema::DB_VERSION;
    use rusqlite::Connection;

    #[test]
    fn test_table_is_sorted_and_below_latest() {
        let migrator = Migrator::new(STEPS).unwrap();
        assert_eq!(migrator.steps().first().map(|s| s.version), Some(1));
        assert_eq!(migrator.last_version(), Some(DB_VERSION - 1));
    }

    #[test]
    fn test_every_version_has_a_step() {
        let migrator = Migrator::new(STEPS).unwrap();
        for version in 1..DB_VERSION {
            assert!(!migrator.steps_at(version).is_empty(), "no step at {version}");
        }
    }

    #[test]
    fn test_mixed_gating_versions() {
        let migrator = Migrator::new(STEPS).unwrap();
        for version in [45, 61] {
            let addons: Vec<Option<AddOn>> =
                migrator.steps_at(version).iter().map(|s| s.addon).collect();
            assert_eq!(addons.len(), 2, "version {version}");
            assert!(addons.contains(&None));
            assert!(addons.contains(&Some(AddOn::WooCommerce)));
        }
    }

    #[test]
    fn test_token_backfill_is_a_run_step() {
        let migrator = Migrator::new(STEPS).unwrap();
        let at_38 = migrator.steps_at(38);
        assert_eq!(at_38.len(), 1);
        assert!(matches!(at_38[0].mutation, Mutation::Run(_)));
        assert_eq!(at_38[0].addon, None);
    }

    #[test]
    fn test_run_30_to_32_without_addons() {
        let mut conn = Connection::open_in_memory().unwrap();
        let mut ctx = MigrationContext::new(AddOnSet::none());
        let report = Migrator::new(STEPS)
            .unwrap()
            .run(&mut conn, 30, 32, &mut ctx)
            .unwrap();

        let applied: Vec<u32> = report.applied.iter().map(|s| s.version).collect();
        let skipped: Vec<u32> = report.skipped.iter().map(|s| s.version).collect();
        assert_eq!(applied, vec![30, 32]);
        assert_eq!(skipped, vec![31]);

        let version: u32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 32);

        let snap = crate::storage::schema::snapshot(&conn).unwrap();
        assert!(snap.columns("ActivityLog").is_some());
        assert!(snap.columns("RewindStatus").unwrap().contains(&"REWIND_REASON".to_string()));
        assert!(snap.columns("WCOrderModel").is_none());
    }

    #[test]
    fn test_move_account_token() {
        let mut conn = Connection::open_in_memory().unwrap();
        let mut ctx = MigrationContext::new(AddOnSet::none());
        ctx.prefs.default.put(ACCOUNT_TOKEN_PREF_KEY, "secret").unwrap();
        ctx.prefs.default.put("other", "kept").unwrap();

        let tx = conn.transaction().unwrap();
        move_account_token(&tx, &mut ctx).unwrap();
        tx.commit().unwrap();

        assert_eq!(ctx.prefs.fluxc.get(ACCOUNT_TOKEN_PREF_KEY), Some("secret"));
        assert!(ctx.prefs.default.get(ACCOUNT_TOKEN_PREF_KEY).is_none());
        assert_eq!(ctx.prefs.default.get("other"), Some("kept"));
    }

    #[test]
    fn test_empty_token_is_left_alone() {
        let mut conn = Connection::open_in_memory().unwrap();
        let mut ctx = MigrationContext::new(AddOnSet::none());
        ctx.prefs.default.put(ACCOUNT_TOKEN_PREF_KEY, "").unwrap();

        let tx = conn.transaction().unwrap();
        move_account_token(&tx, &mut ctx).unwrap();

        assert_eq!(ctx.prefs.default.get(ACCOUNT_TOKEN_PREF_KEY), Some(""));
        assert!(ctx.prefs.fluxc.is_empty());
    }
}
