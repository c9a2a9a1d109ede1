//! Expiration presets offered at creation time and their validation.

use crate::constants::{
    EXPIRATION_DAY_SECS, EXPIRATION_HOUR_SECS, EXPIRATION_NEVER_SECS, EXPIRATION_WEEK_SECS,
};
use crate::error::ValidationIssue;

/// Expiration option selected in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpirationChoice {
    Hour,
    #[default]
    Day,
    Week,
    Never,
    /// Use the free-form seconds field.
    Custom,
}

/// A validated expiration ready to send to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    Never,
    After { seconds: u64 },
}

impl Expiration {
    /// Wire value for the `expiration` field (`0` = never).
    pub fn as_seconds(self) -> u64 {
        match self {
            Self::Never => EXPIRATION_NEVER_SECS,
            Self::After { seconds } => seconds,
        }
    }
}

impl ExpirationChoice {
    /// Seconds for the fixed presets; `None` for [`ExpirationChoice::Custom`].
    pub fn preset_seconds(self) -> Option<u64> {
        match self {
            Self::Hour => Some(EXPIRATION_HOUR_SECS),
            Self::Day => Some(EXPIRATION_DAY_SECS),
            Self::Week => Some(EXPIRATION_WEEK_SECS),
            Self::Never => Some(EXPIRATION_NEVER_SECS),
            Self::Custom => None,
        }
    }

    /// Resolve the selection, reading `custom_field` only for `Custom`.
    pub fn resolve(self, custom_field: &str) -> Result<Expiration, ValidationIssue> {
        match self {
            Self::Never => Ok(Expiration::Never),
            Self::Custom => parse_custom_seconds(custom_field)
                .map(|seconds| Expiration::After { seconds }),
            preset => Ok(Expiration::After {
                seconds: preset.preset_seconds().unwrap_or(EXPIRATION_DAY_SECS),
            }),
        }
    }
}

/// Parse the custom expiration field.
///
/// The value must be a whole number of seconds in the open interval
/// `(0, 604800)`. Surrounding whitespace is ignored.
pub fn parse_custom_seconds(raw: &str) -> Result<u64, ValidationIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationIssue::EmptyCustomExpiration);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationIssue::CustomExpirationNotANumber)?;
    if value.is_nan() {
        return Err(ValidationIssue::CustomExpirationNotANumber);
    }
    if value <= 0.0 || value >= EXPIRATION_WEEK_SECS as f64 {
        return Err(ValidationIssue::CustomExpirationOutOfRange);
    }
    if value.fract() != 0.0 {
        return Err(ValidationIssue::CustomExpirationNotANumber);
    }
    Ok(value as u64)
}
