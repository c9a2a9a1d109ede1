use tracing::{debug, info, warn};

use super::{Navigation, PasteStore};
use crate::error::{TransportError, ValidationFailure, ValidationIssue};
use crate::models::{AddRequest, AddResponse, ExpirationChoice};

/// Editor fields for a paste that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteDraft {
    pub title: String,
    pub content: String,
    pub expiration: ExpirationChoice,
    /// Raw text of the custom-seconds field, read only for `Custom`.
    pub custom_seconds: String,
}

impl PasteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_expiration(mut self, expiration: ExpirationChoice) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn with_custom_seconds(mut self, raw: impl Into<String>) -> Self {
        self.expiration = ExpirationChoice::Custom;
        self.custom_seconds = raw.into();
        self
    }

    /// Check every field and build the store request.
    ///
    /// Title and content are checked for length only; whitespace is kept as typed.
    ///
    /// # Errors
    /// Every violation found, in field order: title, content, expiration.
    pub fn validate(&self) -> Result<AddRequest, ValidationFailure> {
        let mut issues = Vec::new();
        if self.title.is_empty() {
            issues.push(ValidationIssue::EmptyTitle);
        }
        if self.content.is_empty() {
            issues.push(ValidationIssue::EmptyContent);
        }
        let expiration = match self.expiration.resolve(&self.custom_seconds) {
            Ok(expiration) => Some(expiration),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        match expiration {
            Some(expiration) if issues.is_empty() => Ok(AddRequest {
                title: self.title.clone(),
                content: self.content.clone(),
                expiration: expiration.as_seconds(),
            }),
            _ => Err(ValidationFailure { issues }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePhase {
    Editing,
    Submitting,
    Published { key: String },
}

/// Result of [`CreateController::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation passed; send this request and report back via `finish_submit`.
    Ready(AddRequest),
    Rejected(ValidationFailure),
    AlreadyInFlight,
    AlreadyPublished { key: String },
}

/// Where a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Published {
        key: String,
        navigation: Navigation,
    },
    Rejected(ValidationFailure),
    /// The store call failed; the controller is back in `Editing`.
    Failed { message: String },
    AlreadyInFlight,
    AlreadyPublished { key: String },
    /// A completion arrived while no submit was pending.
    Ignored,
}

/// State machine for the create path.
#[derive(Debug, Clone)]
pub struct CreateController {
    draft: PasteDraft,
    phase: CreatePhase,
    last_error: Option<String>,
}

impl Default for CreateController {
    fn default() -> Self {
        Self::new(PasteDraft::default())
    }
}

impl CreateController {
    pub fn new(draft: PasteDraft) -> Self {
        Self {
            draft,
            phase: CreatePhase::Editing,
            last_error: None,
        }
    }

    pub fn phase(&self) -> &CreatePhase {
        &self.phase
    }

    pub fn draft(&self) -> &PasteDraft {
        &self.draft
    }

    /// Mutable access to the draft, only while editing.
    pub fn draft_mut(&mut self) -> Option<&mut PasteDraft> {
        match self.phase {
            CreatePhase::Editing => Some(&mut self.draft),
            _ => None,
        }
    }

    /// Message from the last rejected or failed submit, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, CreatePhase::Submitting)
    }

    pub fn published_key(&self) -> Option<&str> {
        match &self.phase {
            CreatePhase::Published { key } => Some(key),
            _ => None,
        }
    }

    /// Validate the draft and, when it passes, enter `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitStart {
        match &self.phase {
            CreatePhase::Submitting => {
                debug!("submit ignored: request already in flight");
                return SubmitStart::AlreadyInFlight;
            }
            CreatePhase::Published { key } => {
                return SubmitStart::AlreadyPublished { key: key.clone() };
            }
            CreatePhase::Editing => {}
        }

        self.last_error = None;
        match self.draft.validate() {
            Ok(request) => {
                debug!(expiration = request.expiration, "draft valid; submitting");
                self.phase = CreatePhase::Submitting;
                SubmitStart::Ready(request)
            }
            Err(failure) => {
                debug!(issues = failure.issues.len(), "draft rejected");
                self.last_error = Some(failure.to_string());
                SubmitStart::Rejected(failure)
            }
        }
    }

    /// Apply the store's answer to a pending submit.
    pub fn finish_submit(&mut self, result: Result<AddResponse, TransportError>) -> CreateOutcome {
        if !self.is_in_flight() {
            debug!("submit completion ignored: nothing in flight");
            return CreateOutcome::Ignored;
        }

        match result {
            Ok(AddResponse { key }) => {
                info!(key = %key, "paste published");
                self.phase = CreatePhase::Published { key: key.clone() };
                CreateOutcome::Published {
                    navigation: Navigation::ViewPaste { key: key.clone() },
                    key,
                }
            }
            Err(err) => {
                warn!(error = %err, "paste submit failed");
                let message = err.to_string();
                self.phase = CreatePhase::Editing;
                self.last_error = Some(message.clone());
                CreateOutcome::Failed { message }
            }
        }
    }

    /// Run a full submit against `store`.
    pub async fn submit<S: PasteStore>(&mut self, store: &S) -> CreateOutcome {
        let request = match self.begin_submit() {
            SubmitStart::Ready(request) => request,
            SubmitStart::Rejected(failure) => return CreateOutcome::Rejected(failure),
            SubmitStart::AlreadyInFlight => return CreateOutcome::AlreadyInFlight,
            SubmitStart::AlreadyPublished { key } => {
                return CreateOutcome::AlreadyPublished { key }
            }
        };
        let result = store.create(&request).await;
        self.finish_submit(result)
    }

    /// Start over with an empty draft.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
