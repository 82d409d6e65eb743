//! The job model: one render request and its echoed-back completion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// One render request.
///
/// The target comes from the body's `URL` field. The casing is
/// case-sensitive on purpose: clients of this service have always sent
/// the capitalized form, so a lowercase `url` lands in `metadata` and the
/// job is rejected for missing its target. Every sibling field is carried
/// verbatim in `metadata` and echoed back in the completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Navigation target
    #[serde(rename = "URL")]
    pub url: String,

    /// All other caller-supplied fields, preserved verbatim
    #[serde(flatten)]
    pub metadata: Map<String, Value>,

    /// Rendered page content; absent until the render succeeds, then set
    /// exactly once
    #[serde(rename = "Result", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Job {
    /// Parse a request body into a job.
    ///
    /// Fails when the body is not a JSON object or when `URL` is missing,
    /// empty, or not a string. No side effects.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let job: Job =
            serde_json::from_slice(raw).map_err(|e| Error::PayloadError(e.to_string()))?;
        if job.url.is_empty() {
            return Err(Error::PayloadError("URL must not be empty".to_string()));
        }
        Ok(job)
    }

    /// Attach the rendered content, consuming the job.
    pub fn complete(mut self, content: String) -> Self {
        self.result = Some(content);
        self
    }
}
