//! Canonical schema of the `wp-fluxc` database.
//!
//! [`CATALOG`] holds one `CREATE TABLE` per table as it looks at
//! [`DB_VERSION`]. A fresh database is built from it directly, and a full
//! reset drops and recreates from it. [`BASELINE`] is the schema as of
//! version 1, the oldest version the step table upgrades from.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::model::{AddOn, AddOnSet};

/// Latest schema version. Stored in `PRAGMA user_version`.
pub const DB_VERSION: u32 = 88;

/// Database name; the file is `wp-fluxc.db`.
pub const DB_NAME: &str = "wp-fluxc";

/// One table's canonical latest-version definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    /// Add-on the table belongs to; `None` for core tables.
    pub addon: Option<AddOn>,
    pub create: &'static str,
}

/// Every table at [`DB_VERSION`], in creation order.
pub static CATALOG: &[TableDef] = &[
    TableDef {
        name: "SiteModel",
        addon: None,
        create: concat!(
            "CREATE TABLE SiteModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,URL TEXT,",
            "ADMIN_URL TEXT,LOGIN_URL TEXT,XMLRPC_URL TEXT,NAME TEXT,DESCRIPTION TEXT,IS_WPCOM INTEGER,",
            "IS_FEATURED_IMAGE_SUPPORTED INTEGER,DEFAULT_COMMENT_STATUS TEXT,TIMEZONE TEXT,USERNAME TEXT,",
            "PASSWORD TEXT,SELF_HOSTED_SITE_ID INTEGER,IS_JETPACK_INSTALLED INTEGER,",
            "IS_JETPACK_CONNECTED INTEGER,IS_AUTOMATED_TRANSFER INTEGER,IS_VISIBLE INTEGER,",
            "IS_PRIVATE INTEGER,IS_VIDEO_PRESS_SUPPORTED INTEGER,PLAN_ID INTEGER,PLAN_SHORT_NAME TEXT,",
            "SOFTWARE_VERSION TEXT,ICON_URL TEXT,FRAME_NONCE TEXT,ORIGIN INTEGER,HAS_FREE_PLAN INTEGER,",
            "UNMAPPED_URL TEXT,MAX_UPLOAD_SIZE INTEGER,MEMORY_LIMIT INTEGER,EMAIL TEXT,DISPLAY_NAME TEXT,",
            "JETPACK_VERSION TEXT,SPACE_AVAILABLE INTEGER,SPACE_ALLOWED INTEGER,SPACE_USED INTEGER,",
            "SPACE_PERCENT_USED REAL,IS_WP_COM_STORE INTEGER,HAS_WOO_COMMERCE INTEGER,WEB_EDITOR TEXT,",
            "MOBILE_EDITOR TEXT)",
        ),
    },
    TableDef {
        name: "AccountModel",
        addon: None,
        create: concat!(
            "CREATE TABLE AccountModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,USER_NAME TEXT,",
            "USER_ID INTEGER,DISPLAY_NAME TEXT,PROFILE_URL TEXT,AVATAR_URL TEXT,PRIMARY_SITE_ID INTEGER,",
            "SITE_COUNT INTEGER,VISIBLE_SITE_COUNT INTEGER,EMAIL TEXT,FIRST_NAME TEXT,LAST_NAME TEXT,",
            "ABOUT_ME TEXT,DATE TEXT,NEW_EMAIL TEXT,PENDING_EMAIL_CHANGE INTEGER,WEB_ADDRESS TEXT,",
            "HAS_UNSEEN_NOTES INTEGER,EMAIL_VERIFIED INTEGER,TRACKS_OPT_OUT INTEGER,",
            "USERNAME_CAN_BE_CHANGED INTEGER)",
        ),
    },
    TableDef {
        name: "PostModel",
        addon: None,
        create: concat!(
            "CREATE TABLE PostModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,REMOTE_POST_ID INTEGER,TITLE TEXT,CONTENT TEXT,DATE_CREATED TEXT,",
            "CATEGORY_IDS TEXT,CUSTOM_FIELDS TEXT,LINK TEXT,EXCERPT TEXT,TAG_NAMES TEXT,STATUS TEXT,",
            "PASSWORD TEXT,FEATURED_IMAGE_ID INTEGER,POST_FORMAT TEXT,SLUG TEXT,LATITUDE REAL,",
            "LONGITUDE REAL,IS_PAGE INTEGER,PARENT_ID INTEGER,PARENT_TITLE TEXT,IS_LOCAL_DRAFT INTEGER,",
            "IS_LOCALLY_CHANGED INTEGER,DATE_LOCALLY_CHANGED TEXT,",
            "LAST_KNOWN_REMOTE_FEATURED_IMAGE_ID INTEGER,HAS_CAPABILITY_PUBLISH_POST INTEGER,",
            "HAS_CAPABILITY_EDIT_POST INTEGER,HAS_CAPABILITY_DELETE_POST INTEGER,LAST_MODIFIED TEXT,",
            "REMOTE_LAST_MODIFIED TEXT,AUTHOR_ID INTEGER,AUTHOR_DISPLAY_NAME TEXT,",
            "CHANGES_CONFIRMED_CONTENT_HASHCODE INTEGER,AUTO_SAVE_REVISION_ID INTEGER,",
            "AUTO_SAVE_MODIFIED TEXT,REMOTE_AUTO_SAVE_MODIFIED TEXT,AUTO_SAVE_PREVIEW_URL TEXT,",
            "AUTO_SAVE_TITLE TEXT,AUTO_SAVE_CONTENT TEXT,AUTO_SAVE_EXCERPT TEXT)",
        ),
    },
    TableDef {
        name: "MediaModel",
        addon: None,
        create: concat!(
            "CREATE TABLE MediaModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,MEDIA_ID INTEGER,",
            "POST_ID INTEGER,AUTHOR_ID INTEGER,GUID TEXT,UPLOAD_DATE TEXT,URL TEXT,THUMBNAIL_URL TEXT,",
            "FILE_NAME TEXT,FILE_PATH TEXT,FILE_EXTENSION TEXT,MIME_TYPE TEXT,TITLE TEXT,CAPTION TEXT,",
            "DESCRIPTION TEXT,ALT TEXT,WIDTH INTEGER,HEIGHT INTEGER,LENGTH INTEGER,VIDEO_PRESS_GUID TEXT,",
            "VIDEO_PRESS_PROCESSING_DONE INTEGER,BLOG_ID INTEGER,HORIZONTAL_ALIGNMENT INTEGER,",
            "VERTICAL_ALIGNMENT INTEGER,FEATURED INTEGER,FEATURED_IN_POST INTEGER,LOCAL_POST_ID INTEGER,",
            "FILE_URL_MEDIUM_SIZE TEXT,FILE_URL_MEDIUM_LARGE_SIZE TEXT,FILE_URL_LARGE_SIZE TEXT,",
            "MARKED_LOCALLY_AS_FEATURED INTEGER)",
        ),
    },
    TableDef {
        name: "RoleModel",
        addon: None,
        create: concat!(
            "CREATE TABLE RoleModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,NAME TEXT,",
            "DISPLAY_NAME TEXT)",
        ),
    },
    TableDef {
        name: "MediaUploadModel",
        addon: None,
        create: concat!(
            "CREATE TABLE MediaUploadModel (_id INTEGER PRIMARY KEY,UPLOAD_STATE INTEGER,PROGRESS REAL,",
            "ERROR_TYPE TEXT,ERROR_MESSAGE TEXT,",
            "FOREIGN KEY(_id) REFERENCES MediaModel(_id) ON DELETE CASCADE)",
        ),
    },
    TableDef {
        name: "PostUploadModel",
        addon: None,
        create: concat!(
            "CREATE TABLE PostUploadModel (_id INTEGER PRIMARY KEY,UPLOAD_STATE INTEGER,",
            "ASSOCIATED_MEDIA_IDS TEXT,ERROR_TYPE TEXT,ERROR_MESSAGE TEXT,",
            "NUMBER_OF_UPLOAD_ERRORS_OR_CANCELLATIONS INTEGER,NUMBER_OF_AUTO_UPLOAD_ATTEMPTS INTEGER,",
            "FOREIGN KEY(_id) REFERENCES PostModel(_id) ON DELETE CASCADE)",
        ),
    },
    TableDef {
        name: "ThemeModel",
        addon: None,
        create: concat!(
            "CREATE TABLE ThemeModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "THEME_ID TEXT,NAME TEXT,DESCRIPTION TEXT,SLUG TEXT,VERSION TEXT,AUTHOR_NAME TEXT,",
            "AUTHOR_URL TEXT,THEME_URL TEXT,SCREENSHOT_URL TEXT,DEMO_URL TEXT,DOWNLOAD_URL TEXT,",
            "STYLESHEET TEXT,CURRENCY TEXT,PRICE REAL,ACTIVE INTEGER,AUTO_UPDATE INTEGER,",
            "AUTO_UPDATE_TRANSLATION INTEGER,IS_WP_COM_THEME INTEGER,FREE INTEGER,PRICE_TEXT INTEGER,",
            "MOBILE_FRIENDLY_CATEGORY_SLUG TEXT)",
        ),
    },
    TableDef {
        name: "TermModel",
        addon: None,
        create: concat!(
            "CREATE TABLE TermModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_TERM_ID INTEGER,TAXONOMY TEXT,NAME TEXT,SLUG TEXT,DESCRIPTION TEXT,",
            "PARENT_REMOTE_ID INTEGER,POST_COUNT INTEGER)",
        ),
    },
    TableDef {
        name: "SitePluginModel",
        addon: None,
        create: concat!(
            "CREATE TABLE SitePluginModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "NAME TEXT,DISPLAY_NAME TEXT,PLUGIN_URL TEXT,VERSION TEXT,SLUG TEXT,DESCRIPTION TEXT,",
            "AUTHOR_NAME TEXT,AUTHOR_URL TEXT,SETTINGS_URL TEXT,IS_ACTIVE INTEGER,",
            "IS_AUTO_UPDATE_ENABLED INTEGER,UNIQUE (SLUG,LOCAL_SITE_ID))",
        ),
    },
    TableDef {
        name: "WPOrgPluginModel",
        addon: None,
        create: concat!(
            "CREATE TABLE WPOrgPluginModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,AUTHOR_AS_HTML TEXT,",
            "AUTHOR_NAME TEXT,BANNER TEXT,DESCRIPTION_AS_HTML TEXT,DISPLAY_NAME TEXT,FAQ_AS_HTML TEXT,",
            "HOMEPAGE_URL TEXT,ICON TEXT,INSTALLATION_INSTRUCTIONS_AS_HTML TEXT,LAST_UPDATED TEXT,",
            "RATING TEXT,REQUIRED_WORD_PRESS_VERSION TEXT,SLUG TEXT,VERSION TEXT,WHATS_NEW_AS_HTML TEXT,",
            "DOWNLOAD_COUNT INTEGER,NUMBER_OF_RATINGS INTEGER,NUMBER_OF_RATINGS_OF_ONE INTEGER,",
            "NUMBER_OF_RATINGS_OF_TWO INTEGER,NUMBER_OF_RATINGS_OF_THREE INTEGER,",
            "NUMBER_OF_RATINGS_OF_FOUR INTEGER,NUMBER_OF_RATINGS_OF_FIVE INTEGER,UNIQUE (SLUG))",
        ),
    },
    TableDef {
        name: "PluginDirectoryModel",
        addon: None,
        create: concat!(
            "CREATE TABLE PluginDirectoryModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SLUG TEXT,",
            "DIRECTORY_TYPE TEXT,PAGE INTEGER)",
        ),
    },
    TableDef {
        name: "RewindStatus",
        addon: None,
        create: concat!(
            "CREATE TABLE RewindStatus (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,STATE TEXT NOT NULL,LAST_UPDATED INTEGER,REASON TEXT,",
            "CAN_AUTOCONFIGURE INTEGER,REWIND_ID TEXT,RESTORE_ID INTEGER,REWIND_STATUS TEXT,",
            "REWIND_PROGRESS INTEGER,REWIND_REASON TEXT)",
        ),
    },
    TableDef {
        name: "SubscriptionModel",
        addon: None,
        create: concat!(
            "CREATE TABLE SubscriptionModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SUBSCRIPTION_ID TEXT,",
            "BLOG_ID TEXT,BLOG_NAME TEXT,FEED_ID TEXT,URL TEXT,SHOULD_NOTIFY_POSTS INTEGER,",
            "SHOULD_EMAIL_POSTS INTEGER,EMAIL_POSTS_FREQUENCY TEXT,SHOULD_EMAIL_COMMENTS INTEGER)",
        ),
    },
    TableDef {
        name: "ActivityLog",
        addon: None,
        create: concat!(
            "CREATE TABLE ActivityLog (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,ACTIVITY_ID TEXT NOT NULL,SUMMARY TEXT NOT NULL,",
            "FORMATTABLE_CONTENT TEXT NOT NULL,NAME TEXT,TYPE TEXT,GRIDICON TEXT,STATUS TEXT,",
            "REWINDABLE INTEGER,REWIND_ID TEXT,PUBLISHED INTEGER,DISCARDED INTEGER,DISPLAY_NAME TEXT,",
            "ACTOR_TYPE TEXT,WPCOM_USER_ID INTEGER,AVATAR_URL TEXT,ROLE TEXT)",
        ),
    },
    TableDef {
        name: "WCOrderModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_ORDER_ID INTEGER,NUMBER TEXT NOT NULL,STATUS TEXT NOT NULL,CURRENCY TEXT NOT NULL,",
            "DATE_CREATED TEXT NOT NULL,TOTAL TEXT NOT NULL,TOTAL_TAX TEXT NOT NULL,",
            "SHIPPING_TOTAL TEXT NOT NULL,PAYMENT_METHOD TEXT NOT NULL,",
            "PAYMENT_METHOD_TITLE TEXT NOT NULL,PRICES_INCLUDE_TAX INTEGER,CUSTOMER_NOTE TEXT NOT NULL,",
            "DISCOUNT_TOTAL TEXT NOT NULL,DISCOUNT_CODES TEXT NOT NULL,REFUND_TOTAL REAL,",
            "BILLING_FIRST_NAME TEXT NOT NULL,BILLING_LAST_NAME TEXT NOT NULL,",
            "BILLING_COMPANY TEXT NOT NULL,BILLING_ADDRESS1 TEXT NOT NULL,BILLING_ADDRESS2 TEXT NOT NULL,",
            "BILLING_CITY TEXT NOT NULL,BILLING_STATE TEXT NOT NULL,BILLING_POSTCODE TEXT NOT NULL,",
            "BILLING_COUNTRY TEXT NOT NULL,BILLING_EMAIL TEXT NOT NULL,BILLING_PHONE TEXT NOT NULL,",
            "SHIPPING_FIRST_NAME TEXT NOT NULL,SHIPPING_LAST_NAME TEXT NOT NULL,",
            "SHIPPING_COMPANY TEXT NOT NULL,SHIPPING_ADDRESS1 TEXT NOT NULL,",
            "SHIPPING_ADDRESS2 TEXT NOT NULL,SHIPPING_CITY TEXT NOT NULL,SHIPPING_STATE TEXT NOT NULL,",
            "SHIPPING_POSTCODE TEXT NOT NULL,SHIPPING_COUNTRY TEXT NOT NULL,LINE_ITEMS TEXT NOT NULL,",
            "DATE_MODIFIED TEXT,DATE_PAID TEXT NOT NULL DEFAULT '')",
        ),
    },
    TableDef {
        name: "WCOrderNoteModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderNoteModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "LOCAL_ORDER_ID INTEGER,REMOTE_NOTE_ID INTEGER,DATE_CREATED TEXT NOT NULL,NOTE TEXT NOT NULL,",
            "IS_CUSTOMER_NOTE INTEGER,IS_SYSTEM_NOTE INTEGER)",
        ),
    },
    TableDef {
        name: "RewindStatusCredentials",
        addon: None,
        create: concat!(
            "CREATE TABLE RewindStatusCredentials (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_SITE_ID INTEGER,REWIND_STATE_ID INTEGER,TYPE TEXT NOT NULL,",
            "ROLE TEXT NOT NULL,STILL_VALID INTEGER,HOST TEXT,PORT INTEGER)",
        ),
    },
    TableDef {
        name: "WCOrderStatsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderStatsModel(LOCAL_SITE_ID INTEGER,UNIT TEXT NOT NULL,DATE TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,END_DATE TEXT NOT NULL,QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,FIELDS TEXT NOT NULL,DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "QuickStartStatusModel",
        addon: None,
        create: concat!(
            "CREATE TABLE QuickStartStatusModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,",
            "IS_COMPLETED INTEGER,IS_NOTIFICATION_RECEIVED INTEGER)",
        ),
    },
    TableDef {
        name: "QuickStartTaskModel",
        addon: None,
        create: concat!(
            "CREATE TABLE QuickStartTaskModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,",
            "TASK_NAME TEXT,IS_DONE INTEGER,IS_SHOWN INTEGER,TASK_TYPE TEXT)",
        ),
    },
    TableDef {
        name: "LocalDiffModel",
        addon: None,
        create: concat!(
            "CREATE TABLE LocalDiffModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,REVISION_ID INTEGER,",
            "POST_ID INTEGER,SITE_ID INTEGER,OPERATION TEXT,VALUE TEXT,DIFF_TYPE TEXT)",
        ),
    },
    TableDef {
        name: "LocalRevisionModel",
        addon: None,
        create: concat!(
            "CREATE TABLE LocalRevisionModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,REVISION_ID INTEGER,",
            "POST_ID INTEGER,SITE_ID INTEGER,DIFF_FROM_VERSION INTEGER,TOTAL_ADDITIONS INTEGER,",
            "TOTAL_DELETIONS INTEGER,POST_CONTENT TEXT,POST_EXCERPT TEXT,POST_TITLE TEXT,",
            "POST_DATE_GMT TEXT,POST_MODIFIED_GMT TEXT,POST_AUTHOR_ID TEXT)",
        ),
    },
    TableDef {
        name: "StatsBlock",
        addon: None,
        create: concat!(
            "CREATE TABLE StatsBlock (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT,POST_ID INTEGER,",
            "JSON TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "ListItemModel",
        addon: None,
        create: concat!(
            "CREATE TABLE ListItemModel (LIST_ID INTEGER,REMOTE_ITEM_ID INTEGER,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LIST_ID) REFERENCES ListModel(_id) ON DELETE CASCADE,UNIQUE(LIST_ID,",
            "REMOTE_ITEM_ID) ON CONFLICT IGNORE)",
        ),
    },
    TableDef {
        name: "ListModel",
        addon: None,
        create: concat!(
            "CREATE TABLE ListModel (LAST_MODIFIED TEXT,DESCRIPTOR_UNIQUE_IDENTIFIER_DB_VALUE INTEGER,",
            "DESCRIPTOR_TYPE_IDENTIFIER_DB_VALUE INTEGER,STATE_DB_VALUE INTEGER,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "NotificationModel",
        addon: None,
        create: concat!(
            "CREATE TABLE NotificationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "REMOTE_NOTE_ID INTEGER,REMOTE_SITE_ID INTEGER,NOTE_HASH INTEGER,TYPE TEXT,SUBTYPE TEXT,",
            "READ INTEGER,ICON TEXT,NOTICON TEXT,TIMESTAMP TEXT,URL TEXT,TITLE TEXT,",
            "FORMATTABLE_BODY TEXT,FORMATTABLE_SUBJECT TEXT,FORMATTABLE_META TEXT)",
        ),
    },
    TableDef {
        name: "WCSettingsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCSettingsModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "CURRENCY_CODE TEXT NOT NULL,CURRENCY_POSITION TEXT NOT NULL,",
            "CURRENCY_THOUSAND_SEPARATOR TEXT NOT NULL,CURRENCY_DECIMAL_SEPARATOR TEXT NOT NULL,",
            "CURRENCY_DECIMAL_NUMBER INTEGER,COUNTRY_CODE TEXT)",
        ),
    },
    TableDef {
        name: "PlanOffers",
        addon: None,
        create: concat!(
            "CREATE TABLE PlanOffers (_id INTEGER PRIMARY KEY AUTOINCREMENT,INTERNAL_PLAN_ID INTEGER,",
            "NAME TEXT,SHORT_NAME TEXT,TAGLINE TEXT,DESCRIPTION TEXT,ICON TEXT)",
        ),
    },
    TableDef {
        name: "PlanOffersFeature",
        addon: None,
        create: concat!(
            "CREATE TABLE PlanOffersFeature (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "INTERNAL_PLAN_ID INTEGER,STRING_ID TEXT,NAME TEXT,DESCRIPTION TEXT)",
        ),
    },
    TableDef {
        name: "PlanOffersId",
        addon: None,
        create: concat!(
            "CREATE TABLE PlanOffersId (_id INTEGER PRIMARY KEY AUTOINCREMENT,PRODUCT_ID INTEGER,",
            "INTERNAL_PLAN_ID INTEGER)",
        ),
    },
    TableDef {
        name: "WCOrderStatusModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderStatusModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,STATUS_KEY TEXT NOT NULL,LABEL TEXT NOT NULL,STATUS_COUNT INTEGER)",
        ),
    },
    TableDef {
        name: "WCProductModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCProductModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_PRODUCT_ID INTEGER,NAME TEXT NOT NULL,SLUG TEXT NOT NULL,PERMALINK TEXT NOT NULL,",
            "DATE_CREATED TEXT NOT NULL,DATE_MODIFIED TEXT NOT NULL,TYPE TEXT NOT NULL,",
            "STATUS TEXT NOT NULL,FEATURED INTEGER,CATALOG_VISIBILITY TEXT NOT NULL,",
            "DESCRIPTION TEXT NOT NULL,SHORT_DESCRIPTION TEXT NOT NULL,SKU TEXT NOT NULL,",
            "PRICE TEXT NOT NULL,REGULAR_PRICE TEXT NOT NULL,SALE_PRICE TEXT NOT NULL,ON_SALE INTEGER,",
            "TOTAL_SALES INTEGER,VIRTUAL INTEGER,DOWNLOADABLE INTEGER,DOWNLOAD_LIMIT INTEGER,",
            "DOWNLOAD_EXPIRY INTEGER,DOWNLOADS TEXT NOT NULL,EXTERNAL_URL TEXT NOT NULL,",
            "TAX_STATUS TEXT NOT NULL,TAX_CLASS TEXT NOT NULL,MANAGE_STOCK INTEGER,",
            "STOCK_QUANTITY INTEGER,STOCK_STATUS TEXT NOT NULL,BACKORDERS TEXT NOT NULL,",
            "BACKORDERS_ALLOWED INTEGER,BACKORDERED INTEGER,SOLD_INDIVIDUALLY INTEGER,",
            "WEIGHT TEXT NOT NULL,LENGTH TEXT NOT NULL,WIDTH TEXT NOT NULL,HEIGHT TEXT NOT NULL,",
            "SHIPPING_REQUIRED INTEGER,SHIPPING_TAXABLE INTEGER,SHIPPING_CLASS TEXT NOT NULL,",
            "SHIPPING_CLASS_ID INTEGER,REVIEWS_ALLOWED INTEGER,AVERAGE_RATING TEXT NOT NULL,",
            "RATING_COUNT INTEGER,PARENT_ID INTEGER,PURCHASE_NOTE TEXT NOT NULL,CATEGORIES TEXT NOT NULL,",
            "TAGS TEXT NOT NULL,IMAGES TEXT NOT NULL,ATTRIBUTES TEXT NOT NULL,RELATED_IDS TEXT NOT NULL,",
            "CROSS_SELL_IDS TEXT NOT NULL,UPSELL_IDS TEXT NOT NULL,VARIATIONS TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "WCProductVariationModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCProductVariationModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,REMOTE_PRODUCT_ID INTEGER,REMOTE_VARIATION_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,DATE_MODIFIED TEXT NOT NULL,DESCRIPTION TEXT NOT NULL,",
            "PERMALINK TEXT NOT NULL,SKU TEXT NOT NULL,STATUS TEXT NOT NULL,PRICE TEXT NOT NULL,",
            "REGULAR_PRICE TEXT NOT NULL,SALE_PRICE TEXT NOT NULL,ON_SALE INTEGER,PURCHASABLE INTEGER,",
            "VIRTUAL INTEGER,DOWNLOADABLE INTEGER,MANAGE_STOCK INTEGER,STOCK_QUANTITY INTEGER,",
            "STOCK_STATUS TEXT NOT NULL,IMAGE_URL TEXT NOT NULL,WEIGHT TEXT NOT NULL,",
            "LENGTH TEXT NOT NULL,WIDTH TEXT NOT NULL,HEIGHT TEXT NOT NULL,ATTRIBUTES TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "StatsRequest",
        addon: None,
        create: concat!(
            "CREATE TABLE StatsRequest (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "BLOCK_TYPE TEXT NOT NULL,STATS_TYPE TEXT NOT NULL,DATE TEXT,POST_ID INTEGER,",
            "TIME_STAMP INTEGER,REQUESTED_ITEMS INTEGER)",
        ),
    },
    TableDef {
        name: "WCProductSettingsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCProductSettingsModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,WEIGHT_UNIT TEXT NOT NULL,DIMENSION_UNIT TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "WCOrderShipmentTrackingModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderShipmentTrackingModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "LOCAL_SITE_ID INTEGER,LOCAL_ORDER_ID INTEGER,REMOTE_TRACKING_ID TEXT NOT NULL,",
            "TRACKING_NUMBER TEXT NOT NULL,TRACKING_PROVIDER TEXT NOT NULL,TRACKING_LINK TEXT NOT NULL,",
            "DATE_SHIPPED TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "WCOrderShipmentProviderModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderShipmentProviderModel (LOCAL_SITE_ID INTEGER,COUNTRY TEXT NOT NULL,",
            "CARRIER_NAME TEXT NOT NULL,CARRIER_LINK TEXT NOT NULL,_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "InsightTypes",
        addon: None,
        create: concat!(
            "CREATE TABLE InsightTypes (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,INSIGHT_TYPE TEXT NOT NULL,POSITION INTEGER,STATUS TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "WCOrderSummaryModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCOrderSummaryModel (LOCAL_SITE_ID INTEGER,REMOTE_ORDER_ID INTEGER,",
            "DATE_CREATED TEXT NOT NULL,_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LOCAL_SITE_ID) REFERENCES SiteModel(_id) ON DELETE CASCADE,",
            "UNIQUE (REMOTE_ORDER_ID,LOCAL_SITE_ID) ON CONFLICT REPLACE)",
        ),
    },
    TableDef {
        name: "WCRevenueStatsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCRevenueStatsModel(LOCAL_SITE_ID INTEGER,INTERVAL TEXT NOT NULL,",
            "START_DATE TEXT NOT NULL,END_DATE TEXT NOT NULL,DATA TEXT NOT NULL,TOTAL TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "PostSchedulingReminder",
        addon: None,
        create: concat!(
            "CREATE TABLE PostSchedulingReminder (_id INTEGER PRIMARY KEY AUTOINCREMENT,POST_ID INTEGER,",
            "SCHEDULED_TIME TEXT NOT NULL)",
        ),
    },
    TableDef {
        name: "WCVisitorStatsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCVisitorStatsModel(LOCAL_SITE_ID INTEGER,UNIT TEXT NOT NULL,",
            "DATE TEXT NOT NULL,START_DATE TEXT NOT NULL,END_DATE TEXT NOT NULL,QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,FIELDS TEXT NOT NULL,DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "WCNewVisitorStatsModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCNewVisitorStatsModel(LOCAL_SITE_ID INTEGER,GRANULARITY TEXT NOT NULL,",
            "DATE TEXT NOT NULL,START_DATE TEXT NOT NULL,END_DATE TEXT NOT NULL,QUANTITY TEXT NOT NULL,",
            "IS_CUSTOM_FIELD INTEGER,FIELDS TEXT NOT NULL,DATA TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ),
    },
    TableDef {
        name: "WCProductReviewModel",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCProductReviewModel (LOCAL_SITE_ID INTEGER,REMOTE_PRODUCT_REVIEW_ID INTEGER,",
            "REMOTE_PRODUCT_ID INTEGER,DATE_CREATED TEXT NOT NULL,STATUS TEXT NOT NULL,",
            "REVIEWER_NAME TEXT NOT NULL,REVIEWER_EMAIL TEXT NOT NULL,REVIEW TEXT NOT NULL,",
            "RATING INTEGER,VERIFIED INTEGER,REVIEWER_AVATARS_JSON TEXT NOT NULL,",
            "_id INTEGER PRIMARY KEY AUTOINCREMENT,",
            "FOREIGN KEY(LOCAL_SITE_ID) REFERENCES SiteModel(_id) ON DELETE CASCADE,",
            "UNIQUE (REMOTE_PRODUCT_REVIEW_ID,REMOTE_PRODUCT_ID,LOCAL_SITE_ID) ON CONFLICT REPLACE)",
        ),
    },
    TableDef {
        name: "WCRefunds",
        addon: Some(AddOn::WooCommerce),
        create: concat!(
            "CREATE TABLE WCRefunds (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "ORDER_ID INTEGER,REFUND_ID INTEGER,DATA TEXT NOT NULL)",
        ),
    },
];

/// Core tables as of schema version 1.
pub static BASELINE: &[TableDef] = &[
    TableDef {
        name: "SiteModel",
        addon: None,
        create: concat!(
            "CREATE TABLE SiteModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,SITE_ID INTEGER,URL TEXT,",
            "ADMIN_URL TEXT,LOGIN_URL TEXT,XMLRPC_URL TEXT,NAME TEXT,DESCRIPTION TEXT,IS_WPCOM INTEGER,",
            "IS_FEATURED_IMAGE_SUPPORTED INTEGER,DEFAULT_COMMENT_STATUS TEXT,TIMEZONE TEXT,USERNAME TEXT,",
            "PASSWORD TEXT,SELF_HOSTED_SITE_ID INTEGER,IS_JETPACK_INSTALLED INTEGER,",
            "IS_JETPACK_CONNECTED INTEGER,IS_AUTOMATED_TRANSFER INTEGER,IS_VISIBLE INTEGER,",
            "IS_PRIVATE INTEGER,IS_VIDEO_PRESS_SUPPORTED INTEGER,PLAN_ID INTEGER,PLAN_SHORT_NAME TEXT,",
            "SOFTWARE_VERSION TEXT)",
        ),
    },
    TableDef {
        name: "AccountModel",
        addon: None,
        create: concat!(
            "CREATE TABLE AccountModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,USER_NAME TEXT,",
            "USER_ID INTEGER,DISPLAY_NAME TEXT,PROFILE_URL TEXT,AVATAR_URL TEXT,PRIMARY_SITE_ID INTEGER,",
            "SITE_COUNT INTEGER,VISIBLE_SITE_COUNT INTEGER,EMAIL TEXT,FIRST_NAME TEXT,LAST_NAME TEXT,",
            "ABOUT_ME TEXT,DATE TEXT,NEW_EMAIL TEXT,PENDING_EMAIL_CHANGE INTEGER,WEB_ADDRESS TEXT,",
            "HAS_UNSEEN_NOTES INTEGER)",
        ),
    },
    TableDef {
        name: "PostModel",
        addon: None,
        create: concat!(
            "CREATE TABLE PostModel (_id INTEGER PRIMARY KEY AUTOINCREMENT,LOCAL_SITE_ID INTEGER,",
            "REMOTE_SITE_ID INTEGER,REMOTE_POST_ID INTEGER,TITLE TEXT,CONTENT TEXT,DATE_CREATED TEXT,",
            "CATEGORY_IDS TEXT,CUSTOM_FIELDS TEXT,LINK TEXT,EXCERPT TEXT,TAG_NAMES TEXT,STATUS TEXT,",
            "PASSWORD TEXT,FEATURED_IMAGE_ID INTEGER,POST_FORMAT TEXT,SLUG TEXT,LATITUDE REAL,",
            "LONGITUDE REAL,IS_PAGE INTEGER,PARENT_ID INTEGER,PARENT_TITLE TEXT,IS_LOCAL_DRAFT INTEGER,",
            "IS_LOCALLY_CHANGED INTEGER,DATE_LOCALLY_CHANGED TEXT,",
            "LAST_KNOWN_REMOTE_FEATURED_IMAGE_ID INTEGER,HAS_CAPABILITY_PUBLISH_POST INTEGER,",
            "HAS_CAPABILITY_EDIT_POST INTEGER,HAS_CAPABILITY_DELETE_POST INTEGER)",
        ),
    },
];

/// Catalog tables enabled by `addons`, in creation order.
pub fn active_catalog(addons: &AddOnSet) -> impl Iterator<Item = &'static TableDef> + '_ {
    CATALOG.iter().filter(|t| addons.allows(t.addon))
}

/// Look up a catalog table by name, ignoring case.
#[must_use]
pub fn find_table(name: &str) -> Option<&'static TableDef> {
    CATALOG.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Create every catalog table enabled by `addons`.
///
/// # Errors
///
/// Returns an error if any table already exists or a statement fails.
pub fn create_tables(conn: &Connection, addons: &AddOnSet) -> Result<usize> {
    let mut created = 0;
    for table in active_catalog(addons) {
        conn.execute_batch(table.create)?;
        created += 1;
    }
    Ok(created)
}

/// Create the version 1 baseline tables and stamp `user_version = 1`.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn create_baseline(conn: &Connection) -> Result<()> {
    for table in BASELINE {
        conn.execute_batch(table.create)?;
    }
    conn.pragma_update(None, "user_version", 1)?;
    Ok(())
}

// ── Snapshots ────────────────────────────────────────────────

/// Table name to sorted column names, for every non-internal table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot(BTreeMap<String, Vec<String>>);

impl SchemaSnapshot {
    #[must_use]
    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.0.get(table).map(Vec::as_slice)
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(t, c)| (t.as_str(), c.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 hex digest of the snapshot's JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn fingerprint(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Capture the table/column set of a database.
///
/// # Errors
///
/// Returns an error if `sqlite_master` or `table_info` cannot be read.
pub fn snapshot(conn: &Connection) -> Result<SchemaSnapshot> {
    let mut tables = BTreeMap::new();
    for table in table_names(conn)? {
        let mut columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info(?1)")?
            .query_map([&table], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;
        columns.sort();
        tables.insert(table, columns);
    }
    Ok(SchemaSnapshot(tables))
}

/// Names of all non-internal tables, sorted.
///
/// # Errors
///
/// Returns an error if `sqlite_master` cannot be read.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let names = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<_, _>>()?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_create_tables_core_only() {
        let conn = Connection::open_in_memory().unwrap();
        let created = create_tables(&conn, &AddOnSet::none()).unwrap();

        let snap = snapshot(&conn).unwrap();
        assert_eq!(snap.len(), created);
        assert!(snap.columns("SiteModel").is_some());
        assert!(snap.tables().all(|t| !t.starts_with("WC")));
    }

    #[test]
    fn test_create_tables_with_woocommerce() {
        let conn = Connection::open_in_memory().unwrap();
        let created = create_tables(&conn, &AddOnSet::all()).unwrap();

        assert_eq!(created, CATALOG.len());
        let snap = snapshot(&conn).unwrap();
        let orders = snap.columns("WCOrderSummaryModel").unwrap();
        assert!(orders.contains(&"DATE_CREATED".to_string()));
    }

    #[test]
    fn test_every_table_declares_its_name() {
        for table in CATALOG {
            let head = table.create.split('(').next().unwrap().trim();
            assert!(head.ends_with(table.name), "{} vs {}", head, table.name);
        }
    }

    #[test]
    fn test_find_table_ignores_case() {
        assert_eq!(find_table("sitemodel").map(|t| t.name), Some("SiteModel"));
        assert!(find_table("NoSuchModel").is_none());
    }

    #[test]
    fn test_baseline_stamps_version_one() {
        let conn = Connection::open_in_memory().unwrap();
        create_baseline(&conn).unwrap();

        let version: u32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
        assert_eq!(table_names(&conn).unwrap(), vec!["AccountModel", "PostModel", "SiteModel"]);
    }

    #[test]
    fn test_fingerprint_tracks_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE T (_id INTEGER PRIMARY KEY)").unwrap();
        let before = snapshot(&conn).unwrap().fingerprint().unwrap();
        assert_eq!(before.len(), 64);

        conn.execute_batch("ALTER TABLE T ADD NAME TEXT").unwrap();
        let after = snapshot(&conn).unwrap().fingerprint().unwrap();
        assert_ne!(before, after);
    }
}
