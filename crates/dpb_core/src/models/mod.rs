//! Data models shared by the transport client and lifecycle controllers.

/// Expiration presets and validated expirations.
pub mod expiration;
/// Paste documents and store wire payloads.
pub mod paste;

pub use expiration::{Expiration, ExpirationChoice};
pub use paste::{AddRequest, AddResponse, ErrorBody, PasteDocument, QueryResponse, Timestamp};
