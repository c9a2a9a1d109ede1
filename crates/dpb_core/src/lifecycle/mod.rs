//! Paste lifecycle controllers for the create and view paths.
//!
//! Both controllers are plain state machines. Each network round-trip is split
//! into a `begin`/`finish` pair so the caller owns the await point, and an
//! async driver (`submit` / `load`) runs both halves against a [`PasteStore`].

/// Create path: editing, validation, submission, publication.
pub mod create;
/// Timestamp and expiry labels shown alongside rendered pastes.
pub mod display;
/// View path: loading, rendering, redirecting.
pub mod view;

pub use create::{CreateController, CreateOutcome, CreatePhase, PasteDraft, SubmitStart};
pub use view::{FetchTicket, RenderedPaste, ViewController, ViewOutcome, ViewPhase};

use crate::error::TransportError;
use crate::models::{AddRequest, AddResponse, QueryResponse};
use crate::transport::TransportClient;

/// Where the UI should go after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the paste stored under `key`.
    ViewPaste { key: String },
    /// Back to the paste creation page.
    CreatePage,
}

/// The two store operations the lifecycle needs.
#[allow(async_fn_in_trait)]
pub trait PasteStore {
    async fn create(&self, request: &AddRequest) -> Result<AddResponse, TransportError>;
    async fn fetch(&self, key: &str) -> Result<QueryResponse, TransportError>;
}

impl PasteStore for TransportClient {
    async fn create(&self, request: &AddRequest) -> Result<AddResponse, TransportError> {
        self.create_paste(request).await
    }

    async fn fetch(&self, key: &str) -> Result<QueryResponse, TransportError> {
        self.query_paste(key).await
    }
}
