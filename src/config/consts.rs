// src/config/consts.rs

// Export
pub const DEFAULT_OUT_PATH: &str = "./site-content/swims.geojson";
pub const JSON_INDENT: &[u8] = b"    ";

// TSV source
pub const TAB_DELIMITER: u8 = b'\t';

// Environment
pub const ENV_SPREADSHEET_ID: &str = "DAVID_SWIMS_SPREADSHEET_ID";
pub const ENV_DATA_RANGE: &str = "DAVID_SWIMS_DATA_RANGE";
pub const ENV_SERVICE_ACCOUNT_JSON: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";
pub const ENV_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

// Google APIs
pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Tokens
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
