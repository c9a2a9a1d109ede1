//! Shared constants used across DPB crates.

/// Default base URL of the paste store API.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:12345";

/// Default base URL used to build share links for published pastes.
pub const DEFAULT_SHARE_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Expiration sentinel meaning "never expires".
pub const EXPIRATION_NEVER_SECS: u64 = 0;
/// One hour expiration preset.
pub const EXPIRATION_HOUR_SECS: u64 = 3_600;
/// One day expiration preset.
pub const EXPIRATION_DAY_SECS: u64 = 86_400;
/// One week expiration preset, also the exclusive upper bound for custom values.
pub const EXPIRATION_WEEK_SECS: u64 = 604_800;

/// Reason used when an error body carries no `reason` field.
pub const UNKNOWN_REASON: &str = "UNKNOWN_REASON";
/// Message used when an error body carries no `message` field.
pub const UNKNOWN_MESSAGE: &str = "Unknown error occurred.";

/// Reason string for missing pastes.
pub const REASON_NOT_FOUND: &str = "ERR_NOT_FOUND";
/// Reason string for rejected requests.
pub const REASON_INVALID_REQUEST: &str = "ERR_INVALID_REQUEST";
/// Reason string for store-side failures.
pub const REASON_INTERNAL_SERVER_ERROR: &str = "ERR_INTERNAL_SERVER_ERROR";

/// Error body codes paired with the reasons above.
pub const CODE_NOT_FOUND: i64 = 1;
pub const CODE_INVALID_REQUEST: i64 = 2;
pub const CODE_INTERNAL_SERVER_ERROR: i64 = 3;

/// Suffix appended to page titles.
pub const PAGE_TITLE_SUFFIX: &str = " - DPB";
