//! Contract between the job pipeline and the embedded rendering engine.
//!
//! The pipeline needs three things from an engine: an isolated page handle
//! per job, a navigation call that blocks until the load is terminal, and
//! release of the handle when the job is done. Release is modeled as
//! `Drop`, so a handle can never leak past its job regardless of how the
//! load ended.

use crate::Result;

/// A rendering engine capable of producing isolated page handles.
///
/// One engine instance is shared by all jobs for the lifetime of the
/// process; each job borrows a fresh page handle from it and must not
/// retain the handle afterward.
pub trait RenderEngine: Send + Sync {
    /// Acquire a fresh page handle for one job.
    fn open_page(&self) -> Result<Box<dyn Page>>;
}

/// A single page handle, exclusively owned by one job.
pub trait Page: Send {
    /// Navigate to `url` and block until the load reaches a terminal
    /// state. Returns the rendered page content (the engine's DOM
    /// serialization) on success.
    fn load(&mut self, url: &str) -> Result<String>;
}

/// Terminal result of a render attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The page loaded; `content` is the rendered document.
    Success { content: String },
    /// The load failed; `reason` is logged internally, never sent to
    /// callers.
    Failure { reason: String },
}

impl RenderOutcome {
    /// Whether this outcome carries rendered content.
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success { .. })
    }
}
