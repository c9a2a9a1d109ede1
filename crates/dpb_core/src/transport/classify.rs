//! Mapping of store error responses onto [`ClassifiedError`].

use crate::constants::{
    CODE_INTERNAL_SERVER_ERROR, CODE_INVALID_REQUEST, CODE_NOT_FOUND,
    REASON_INTERNAL_SERVER_ERROR, REASON_INVALID_REQUEST, REASON_NOT_FOUND,
};
use crate::error::ClassifiedError;
use crate::models::ErrorBody;
use serde_json::Value;

/// Classify a response by HTTP status and parsed body.
///
/// # Returns
/// `None` for 2xx statuses. Otherwise the matching classification, with
/// [`ClassifiedError::Unknown`] for any non-2xx status whose
/// `(status, code, reason)` triple is not one of the three recognized ones.
pub fn classify(status: u16, body: &Value) -> Option<ClassifiedError> {
    if (200..300).contains(&status) {
        return None;
    }
    let ErrorBody {
        code,
        reason,
        message,
    } = ErrorBody::from_value(body);

    let classified = match (status, code, reason.as_str()) {
        (404, Some(CODE_NOT_FOUND), REASON_NOT_FOUND) => {
            ClassifiedError::NotFound { reason, message }
        }
        (400, Some(CODE_INVALID_REQUEST), REASON_INVALID_REQUEST) => {
            ClassifiedError::InvalidRequest { reason, message }
        }
        (500, Some(CODE_INTERNAL_SERVER_ERROR), REASON_INTERNAL_SERVER_ERROR) => {
            ClassifiedError::InternalError { reason, message }
        }
        _ => ClassifiedError::Unknown { reason, message },
    };
    Some(classified)
}
