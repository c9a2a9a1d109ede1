//! Error types for transport classification and client-side validation.
use thiserror::Error;

/// Typed outcome of a non-2xx response from the paste store.
///
/// Every variant keeps the store's `reason` and `message` so callers can show
/// or log them without re-reading the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    #[error("{reason}: {message}")]
    NotFound { reason: String, message: String },

    #[error("{reason}: {message}")]
    InvalidRequest { reason: String, message: String },

    #[error("{reason}: {message}")]
    InternalError { reason: String, message: String },

    #[error("{reason}: {message}")]
    Unknown { reason: String, message: String },
}

impl ClassifiedError {
    /// Machine-readable reason code reported by the store.
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound { reason, .. }
            | Self::InvalidRequest { reason, .. }
            | Self::InternalError { reason, .. }
            | Self::Unknown { reason, .. } => reason,
        }
    }

    /// Human-readable message reported by the store.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::InvalidRequest { message, .. }
            | Self::InternalError { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InternalError { .. } => "internal_error",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Anything that can go wrong while talking to the paste store.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The store answered with a non-2xx status.
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    /// No usable HTTP response (connect failure, timeout, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl TransportError {
    /// The classification, when the store produced one.
    pub fn classification(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(classified) => Some(classified),
            _ => None,
        }
    }
}

/// One rejected field in a paste draft.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("Content cannot be empty.")]
    EmptyContent,

    #[error("Custom expiration cannot be empty.")]
    EmptyCustomExpiration,

    #[error("Custom expiration must be a whole number of seconds.")]
    CustomExpirationNotANumber,

    #[error("Custom expiration must be between 0 and 604800 seconds (exclusive).")]
    CustomExpirationOutOfRange,
}

/// All issues found in a draft, in check order. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_issues(.issues))]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ValidationFailure {
    /// Human-readable messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_error_displays_reason_and_message() {
        let err = ClassifiedError::NotFound {
            reason: "ERR_NOT_FOUND".to_string(),
            message: "Resource not found".to_string(),
        };
        assert_eq!(err.to_string(), "ERR_NOT_FOUND: Resource not found");
        assert_eq!(err.reason(), "ERR_NOT_FOUND");
        assert_eq!(err.message(), "Resource not found");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn transport_error_exposes_classification_only_when_classified() {
        let classified = TransportError::from(ClassifiedError::Unknown {
            reason: "UNKNOWN_REASON".to_string(),
            message: "teapot".to_string(),
        });
        assert!(classified.classification().is_some());
        assert_eq!(classified.to_string(), "UNKNOWN_REASON: teapot");

        let invalid = TransportError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(invalid.classification().is_none());
    }

    #[test]
    fn validation_failure_joins_messages_in_order() {
        let failure = ValidationFailure {
            issues: vec![ValidationIssue::EmptyTitle, ValidationIssue::EmptyContent],
        };
        assert_eq!(
            failure.messages(),
            vec!["Title cannot be empty.", "Content cannot be empty."]
        );
        assert_eq!(
            failure.to_string(),
            "Title cannot be empty. Content cannot be empty."
        );
    }
}
