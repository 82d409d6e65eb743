//! A lightweight, browser-less engine backend that fetches HTML over HTTP.
//!
//! This backend is intentionally minimal: it performs an HTTP GET, parses
//! the document, and returns its DOM serialization as the rendered
//! content. JavaScript execution is not provided; dynamic pages render as
//! served.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use scraper::{Html, Selector};
use url::Url;

use crate::engine::{Page, RenderEngine};
use crate::{Error, RendererConfig, Result};

/// A fetch-based rendering engine.
///
/// The engine holds one HTTP client (connection pool, user agent, default
/// headers, request timeout); each page handle shares the pool but is
/// otherwise independent.
pub struct FetchEngine {
    client: Client,
}

impl FetchEngine {
    pub fn new(config: &RendererConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::ConfigError(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::ConfigError(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl RenderEngine for FetchEngine {
    fn open_page(&self) -> Result<Box<dyn Page>> {
        Ok(Box::new(FetchPage {
            client: self.client.clone(),
        }))
    }
}

/// One page handle backed by the shared HTTP client.
struct FetchPage {
    client: Client,
}

impl Page for FetchPage {
    fn load(&mut self, url: &str) -> Result<String> {
        let target =
            Url::parse(url).map_err(|e| Error::LoadError(format!("invalid URL {url:?}: {e}")))?;
        match target.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::LoadError(format!("unsupported scheme {other:?}")));
            }
        }

        let res = self
            .client
            .get(target)
            .send()
            .map_err(|e| Error::NetworkError(format!("HTTP GET failed: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::LoadError(format!("server returned {}", status)));
        }

        let body = res
            .text()
            .map_err(|e| Error::NetworkError(format!("Failed to read response body: {}", e)))?;

        // The content handed back is the DOM serialization, not the raw
        // bytes, matching what a full engine reports once a load is
        // terminal.
        let document = Html::parse_document(&body);
        if let Some(title) = first_text(&document, "title") {
            debug!("loaded {} (title: {:?})", url, title.trim());
        }
        Ok(document.root_element().html())
    }
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|n| n.text().collect::<String>())
}
