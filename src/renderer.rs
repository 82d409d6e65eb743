//! Render context management: one page handle per job, outcome delivered
//! exactly once.
//!
//! The `Renderer` owns the shared engine instance for the lifetime of the
//! process. Each render borrows a fresh page handle, drives it to a
//! terminal state on the blocking pool, and hands the outcome back through
//! a one-shot channel so the HTTP handler can stay suspended without
//! holding a runtime thread.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::oneshot;
use tokio::task;

use crate::engine::{Page, RenderEngine, RenderOutcome};
use crate::{Error, RendererConfig};

/// Lifecycle of a page handle bound to one job.
#[derive(Debug)]
enum ContextState {
    Created,
    Loading,
    Completed { success: bool },
}

/// One engine-owned page handle bound 1:1 to a job.
///
/// The handle is released when the context drops, which happens on every
/// path out of `load` — including a panicking engine backend — so no
/// handle outlives its job.
struct RenderContext {
    page: Box<dyn Page>,
    state: ContextState,
}

impl RenderContext {
    fn new(page: Box<dyn Page>) -> Self {
        Self {
            page,
            state: ContextState::Created,
        }
    }

    /// Drive the page to a terminal state, consuming the context.
    fn load(mut self, url: &str) -> RenderOutcome {
        self.state = ContextState::Loading;
        debug!("render context loading {}", url);

        let outcome = match self.page.load(url) {
            Ok(content) => RenderOutcome::Success { content },
            Err(err) => RenderOutcome::Failure {
                reason: err.to_string(),
            },
        };

        self.state = ContextState::Completed {
            success: outcome.is_success(),
        };
        debug!("render context for {} reached {:?}", url, self.state);
        outcome
    }
}

/// Owns the shared engine and runs one render per job.
pub struct Renderer {
    engine: Arc<dyn RenderEngine>,
    deadline: Duration,
}

impl Renderer {
    pub fn new<E: RenderEngine + 'static>(engine: E, config: &RendererConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            deadline: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Render `url` with a fresh page handle and return the terminal
    /// outcome.
    ///
    /// Exactly one outcome is produced per call. The page handle is
    /// released before the outcome is observed; when the deadline expires
    /// first, the call resolves to `Failure` and the handle is released
    /// as soon as the engine returns. No retries: one load attempt per
    /// job.
    pub async fn render(&self, url: &str) -> RenderOutcome {
        let (tx, rx) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        let target = url.to_string();

        task::spawn_blocking(move || {
            let outcome = match engine.open_page() {
                Ok(page) => RenderContext::new(page).load(&target),
                Err(err) => RenderOutcome::Failure {
                    reason: format!("could not open page: {}", err),
                },
            };
            // The receiver may have given up on the deadline already; the
            // handle is released either way.
            let _ = tx.send(outcome);
        });

        match tokio::time::timeout(self.deadline, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => RenderOutcome::Failure {
                reason: "render worker dropped before completion".to_string(),
            },
            Err(_) => {
                warn!(
                    "render of {} exceeded the {}ms deadline",
                    url,
                    self.deadline.as_millis()
                );
                RenderOutcome::Failure {
                    reason: Error::Timeout(self.deadline.as_millis() as u64).to_string(),
                }
            }
        }
    }
}
