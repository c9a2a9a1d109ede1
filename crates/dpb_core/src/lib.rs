//! Core library for the DPB paste client (rendering, transport, lifecycle).

/// Client configuration loading and defaults.
pub mod config;
/// Shared constants (defaults, wire codes, expiration presets).
pub mod constants;
/// Transport classification and validation error types.
pub mod error;
/// Create and view state machines.
pub mod lifecycle;
/// Paste documents and store payloads.
pub mod models;
/// Markdown + math to sanitized HTML.
pub mod render;
/// Scoped `DPB_*` environment overrides for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
/// HTTP client for the paste store.
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClassifiedError, TransportError, ValidationFailure, ValidationIssue};
pub use lifecycle::{
    CreateController, CreateOutcome, Navigation, PasteDraft, PasteStore, ViewController,
    ViewOutcome,
};
pub use models::{ExpirationChoice, PasteDocument};
pub use render::{render, RenderedHtml, Renderer};
pub use transport::TransportClient;
