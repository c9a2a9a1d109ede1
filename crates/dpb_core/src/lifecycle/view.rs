use chrono::Local;
use tracing::{debug, warn};

use super::display;
use super::{Navigation, PasteStore};
use crate::error::TransportError;
use crate::models::{PasteDocument, QueryResponse};
use crate::render::{MathBackend, MathmlBackend, RenderedHtml, Renderer};

/// A fetched paste with everything the viewer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPaste {
    pub document: PasteDocument,
    pub html: RenderedHtml,
    /// `"{title} - DPB"`.
    pub page_title: String,
    pub created_label: String,
    pub expiry_label: String,
}

impl RenderedPaste {
    fn build<M: MathBackend>(document: PasteDocument, renderer: &Renderer<M>) -> Self {
        let html = renderer.render(&document.content);
        Self {
            page_title: display::page_title(&document.title),
            created_label: display::created_label(&document.created_at, &Local),
            expiry_label: display::expiry_label(document.expire_at.as_ref(), &Local),
            html,
            document,
        }
    }

    /// Standalone HTML page: title, timestamp line and the rendered body.
    pub fn to_page(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n<p>{} · {}</p>\n{}\n</body>\n</html>\n",
            ammonia::clean_text(&self.page_title),
            ammonia::clean_text(&self.document.title),
            self.created_label,
            self.expiry_label,
            self.html,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading { key: String },
    Rendered(Box<RenderedPaste>),
    Redirected,
}

/// Handle for one fetch. Only the ticket from the latest `open` is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: String,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Rendered,
    Redirected(Navigation),
    /// The ticket was superseded; the result was dropped.
    Stale,
}

/// State machine for the view path.
pub struct ViewController<M = MathmlBackend> {
    renderer: Renderer<M>,
    phase: ViewPhase,
    generation: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self::with_renderer(Renderer::new())
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MathBackend> ViewController<M> {
    pub fn with_renderer(renderer: Renderer<M>) -> Self {
        Self {
            renderer,
            phase: ViewPhase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn rendered(&self) -> Option<&RenderedPaste> {
        match &self.phase {
            ViewPhase::Rendered(paste) => Some(paste.as_ref()),
            _ => None,
        }
    }

    fn current_key(&self) -> Option<&str> {
        match &self.phase {
            ViewPhase::Loading { key } => Some(key),
            ViewPhase::Rendered(paste) => Some(&paste.document.key),
            ViewPhase::Idle | ViewPhase::Redirected => None,
        }
    }

    /// Start loading `key`.
    ///
    /// # Returns
    /// A ticket to fetch with, or `None` when `key` is empty or is already
    /// loading or shown.
    pub fn open(&mut self, key: &str) -> Option<FetchTicket> {
        if key.is_empty() {
            return None;
        }
        if self.current_key() == Some(key) {
            debug!(key, "view already open");
            return None;
        }

        self.generation += 1;
        self.phase = ViewPhase::Loading {
            key: key.to_string(),
        };
        debug!(key, generation = self.generation, "loading paste");
        Some(FetchTicket {
            key: key.to_string(),
            generation: self.generation,
        })
    }

    /// Apply a fetch result.
    ///
    /// Any error redirects to the create page; the detail is only logged.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<QueryResponse, TransportError>,
    ) -> ViewOutcome {
        let current = ticket.generation == self.generation
            && matches!(&self.phase, ViewPhase::Loading { key } if *key == ticket.key);
        if !current {
            debug!(
                key = %ticket.key,
                generation = ticket.generation,
                latest = self.generation,
                "dropping stale fetch result"
            );
            return ViewOutcome::Stale;
        }

        match result {
            Ok(response) => {
                let document = response.into_document(ticket.key);
                self.phase =
                    ViewPhase::Rendered(Box::new(RenderedPaste::build(document, &self.renderer)));
                ViewOutcome::Rendered
            }
            Err(err) => {
                warn!(
                    key = %ticket.key,
                    kind = err.classification().map_or("transport", |c| c.kind()),
                    error = %err,
                    "paste unavailable; redirecting to create page"
                );
                self.phase = ViewPhase::Redirected;
                ViewOutcome::Redirected(Navigation::CreatePage)
            }
        }
    }

    /// Open `key` and fetch it from `store`. `None` when `open` declined.
    pub async fn load<S: PasteStore>(&mut self, store: &S, key: &str) -> Option<ViewOutcome> {
        let ticket = self.open(key)?;
        let result = store.fetch(ticket.key()).await;
        Some(self.complete(ticket, result))
    }

    /// Back to `Idle`. Tickets issued before the reset become stale.
    pub fn reset(&mut self) {
        self.phase = ViewPhase::Idle;
    }
}
