//! Retrieval of the raw analytics payloads.
//!
//! A fetch never fails from the caller's point of view: transport errors,
//! non-2xx statuses and undecodable bodies are logged and turned into the
//! dashboard's fallback, tagged so the orchestrator knows what it got.
use crate::raw::Envelope;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no `data` payload")]
    MissingPayload,
    #[error("cannot read payload file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a committed view model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Live,
    /// Offline/demo dataset substituted after a failed fetch.
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<R> {
    Live(R),
    Demo(R),
    /// Failed and the dashboard has no fallback dataset.
    Unavailable,
}

impl<R> FetchOutcome<R> {
    pub fn mode(&self) -> Option<DataMode> {
        match self {
            FetchOutcome::Live(_) => Some(DataMode::Live),
            FetchOutcome::Demo(_) => Some(DataMode::Demo),
            FetchOutcome::Unavailable => None,
        }
    }

    pub fn raw(&self) -> Option<&R> {
        match self {
            FetchOutcome::Live(raw) | FetchOutcome::Demo(raw) => Some(raw),
            FetchOutcome::Unavailable => None,
        }
    }
}

/// Supplier of response bodies for an API route.
pub trait Source {
    fn get(&self, route: &str, query: &[(&'static str, String)]) -> Result<String, FetchError>;
}

/// Fetch `route` and unwrap the `{data: ...}` envelope, degrading to
/// `fallback` (or `Unavailable`) on any failure.
pub fn fetch<R: DeserializeOwned>(
    source: &dyn Source,
    route: &str,
    query: &[(&'static str, String)],
    fallback: Option<R>,
) -> FetchOutcome<R> {
    match source.get(route, query).and_then(|body| decode(&body)) {
        Ok(raw) => FetchOutcome::Live(raw),
        Err(e) => match fallback {
            Some(demo) => {
                warn!("{} unavailable ({}), using demo data", route, e);
                FetchOutcome::Demo(demo)
            }
            None => {
                error!("{} unavailable: {}", route, e);
                FetchOutcome::Unavailable
            }
        },
    }
}

pub fn decode<R: DeserializeOwned>(body: &str) -> Result<R, FetchError> {
    let envelope: Envelope<R> = serde_json::from_str(body)?;
    envelope.data.ok_or(FetchError::MissingPayload)
}

/// HTTP client of the analytics backend.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<ApiClient, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Source for ApiClient {
    fn get(&self, route: &str, query: &[(&'static str, String)]) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, route);
        info!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        debug!("{} answered {} bytes", url, body.len());
        Ok(body)
    }
}

/// Reads a saved response body from disk. Route and query are ignored, so
/// one file serves one dashboard with no filter applied.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> FileSource {
        FileSource { path }
    }
}

impl Source for FileSource {
    fn get(&self, route: &str, query: &[(&'static str, String)]) -> Result<String, FetchError> {
        if !query.is_empty() {
            warn!(
                "{} cannot filter by {:?}, the page shows its unfiltered data",
                self.path.display(),
                query
            );
        }
        info!("reading {} payload from {}", route, self.path.display());
        Ok(fs::read_to_string(&self.path)?)
    }
}
