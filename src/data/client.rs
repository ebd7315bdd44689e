//! Retrieval of the dashboard JSON document.
//!
//! This is the only place the crate performs I/O on the data path. Everything
//! downstream works on the in-memory document.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::DATA_JSON_URL;
use crate::error::FetchError;
use crate::io::ingest::DashboardDataModel;

/// Environment variable that overrides the default source in the CLI.
pub const SOURCE_ENV_VAR: &str = "FREIGHT_DATA_URL";

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` / `https://` strings are URLs; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    /// Resolve the source: explicit value, then `.env`/environment, then the
    /// built-in default.
    pub fn resolve(explicit: Option<&str>) -> Self {
        if let Some(raw) = explicit {
            return Self::parse(raw);
        }
        dotenvy::dotenv().ok();
        match std::env::var(SOURCE_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Self::parse(DATA_JSON_URL),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

pub struct DashboardClient {
    client: Client,
}

impl DashboardClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch and decode the raw document. No retries.
    pub fn fetch_document(&self, source: &DataSource) -> Result<Value, FetchError> {
        let text = match source {
            DataSource::Url(url) => self.fetch_url(url)?,
            DataSource::File(path) => fs::read_to_string(path).map_err(|source| FetchError::Io {
                path: path.display().to_string(),
                source,
            })?,
        };
        debug!(bytes = text.len(), "received dashboard document");

        serde_json::from_str(&text).map_err(|e| FetchError::Decode {
            origin: source.describe(),
            message: e.to_string(),
        })
    }

    /// Fetch the document and normalize it into a data model.
    pub fn fetch_model(&self, source: &DataSource) -> Result<DashboardDataModel, FetchError> {
        let document = self.fetch_document(source)?;
        info!(source = %source.describe(), "loaded dashboard data");
        Ok(DashboardDataModel::load(&document))
    }

    fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        resp.text().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for DashboardClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::IndexFamily;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DataSource::parse("https://example.com/data.json"),
            DataSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            DataSource::parse(" data/crawling_data.json "),
            DataSource::File(PathBuf::from("data/crawling_data.json"))
        );
    }

    #[test]
    fn explicit_source_wins() {
        assert_eq!(
            DataSource::resolve(Some("feed.json")),
            DataSource::File(PathBuf::from("feed.json"))
        );
    }

    #[test]
    fn loads_model_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "chart_data": {{ "MBCI": [{{ "date": "2024-04-01", "MBCI_Value": 1500 }}] }} }}"#
        )
        .unwrap();

        let model = DashboardClient::new()
            .fetch_model(&DataSource::File(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(model.family(IndexFamily::Mbci).series.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = DashboardClient::new()
            .fetch_document(&DataSource::File(PathBuf::from("/nonexistent/feed.json")))
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>oops</html>").unwrap();
        let err = DashboardClient::new()
            .fetch_document(&DataSource::File(file.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
