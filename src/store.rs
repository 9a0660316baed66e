use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One document in the remote collection, kept opaque until projection.
pub type RawRecord = serde_json::Value;

pub const PAGE_SIZE: u32 = 100;
pub const API_VERSION_HEADER: &str = "X-Api-Version";
pub const API_VERSION: &str = "2024-06-01";

#[derive(Debug, Serialize)]
struct QueryRequest {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryPage {
    #[serde(default)]
    pub results: Vec<RawRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("archive rejected for record {id}: {reason}")]
    RetirementFailed { id: String, reason: String },
}

/// Seam between the dedup engine and the remote store. Reads happen through
/// `query_page`, the only mutation is the reversible `archive` transition.
pub trait DocumentStore {
    fn query_page(&self, collection: &str, start_cursor: Option<&str>) -> anyhow::Result<QueryPage>;
    fn archive(&self, record_id: &str) -> anyhow::Result<()>;
}

pub struct HttpStore {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl HttpStore {
    pub fn new(base_url: &str, token: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

impl DocumentStore for HttpStore {
    fn query_page(&self, collection: &str, start_cursor: Option<&str>) -> anyhow::Result<QueryPage> {
        let url = format!("{}/collections/{}/query", self.base_url, collection);
        let body = QueryRequest {
            page_size: PAGE_SIZE,
            start_cursor: start_cursor.map(str::to_string),
        };
        let send = || -> reqwest::Result<QueryPage> {
            self.client
                .post(&url)
                .bearer_auth(&self.token)
                .header(API_VERSION_HEADER, API_VERSION)
                .json(&body)
                .send()?
                .error_for_status()?
                .json()
        };
        send().map_err(|e| StoreError::RemoteUnavailable(e.to_string()).into())
    }

    fn archive(&self, record_id: &str) -> anyhow::Result<()> {
        let url = format!("{}/records/{}", self.base_url, record_id);
        let send = || -> reqwest::Result<reqwest::blocking::Response> {
            self.client
                .patch(&url)
                .bearer_auth(&self.token)
                .header(API_VERSION_HEADER, API_VERSION)
                .json(&serde_json::json!({ "archived": true }))
                .send()?
                .error_for_status()
        };
        send().map_err(|e| StoreError::RetirementFailed {
            id: record_id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
