//! rfrenderd — an HTTP render-job service.
//!
//! A long-running process that accepts render jobs over HTTP and answers
//! with fully rendered page content. A job is a JSON object carrying a
//! `URL` field plus arbitrary caller metadata; the service loads the URL
//! with an embedded rendering engine and echoes the job back with the
//! rendered content attached as `Result`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rfrenderd::{AppState, FetchEngine, Renderer, RendererConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RendererConfig {
//!     user_agent: "RFox/1.0".to_string(),
//!     timeout_ms: 30000,
//!     ..Default::default()
//! };
//!
//! let engine = FetchEngine::new(&config)?;
//! let state = AppState {
//!     renderer: Arc::new(Renderer::new(engine, &config)),
//!     max_body_bytes: config.max_body_bytes,
//! };
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:1337").await?;
//! rfrenderd::serve(listener, state).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

// Job model: the data shapes exchanged with callers
pub mod job;
pub use job::Job;

// Contract between the job pipeline and the rendering engine
pub mod engine;
pub use engine::{Page, RenderEngine, RenderOutcome};

// Default engine backend (HTTP fetch + DOM serialization, no JS)
pub mod fetch;
pub use fetch::FetchEngine;

// Render context management: one page handle per job
pub mod renderer;
pub use renderer::Renderer;

// HTTP surface: validation, dispatch, and response mapping
pub mod service;
pub use service::{router, serve, AppState};

/// Configuration for the render service
///
/// The defaults are chosen to be conservative and safe:
/// - `user_agent` is set to a Firefox-compatible string that identifies RFOX
/// - a 30 second load deadline bounds every render, so a hung navigation
///   never keeps a connection open forever
///
/// # Examples
///
/// ```
/// let cfg = rfrenderd::RendererConfig::default();
/// assert!(cfg.user_agent.contains("RFOX"));
/// ```
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// User agent string to send with engine requests
    pub user_agent: String,
    /// Deadline for a single page load in milliseconds
    pub timeout_ms: u64,
    /// Custom HTTP headers sent with every engine request
    pub headers: HashMap<String, String>,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/115.0 RFOX/0.3"
                .to_string(),
            timeout_ms: 30000,
            headers: HashMap::new(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RendererConfig::default();
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert!(config.headers.is_empty());
    }
}
