//! Fetching raw source bytes from files and URLs.

use std::time::Duration;

use reqwest::blocking::Client;

use super::source::DataSource;
use crate::error::{PgDashError, Result};

/// Default timeout for remote sources.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Anything that can turn a [`DataSource`] into raw bytes.
pub trait SourceFetcher: Send + Sync {
    /// Fetch the full contents of a source.
    fn fetch(&self, source: &DataSource) -> Result<Vec<u8>>;
}

/// Reads files from disk and URLs over blocking HTTP.
pub struct DefaultFetcher {
    client: Client,
}

impl DefaultFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pgdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PgDashError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let http_err = |message: String| PgDashError::Http {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| http_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_err(format!("server returned {}", status)));
        }

        let bytes = response.bytes().map_err(|e| http_err(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl SourceFetcher for DefaultFetcher {
    fn fetch(&self, source: &DataSource) -> Result<Vec<u8>> {
        match source {
            DataSource::File(path) => std::fs::read(path).map_err(|e| PgDashError::Io {
                path: path.clone(),
                source: e,
            }),
            DataSource::Url(_) => {
                let url = source
                    .fetch_url()
                    .ok_or_else(|| PgDashError::InvalidSource(source.key()))?;
                tracing::debug!(%url, "fetching remote source");
                self.fetch_url(&url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Name,Cost\nSai PG,6000\n").unwrap();

        let fetcher = DefaultFetcher::new().unwrap();
        let bytes = fetcher
            .fetch(&DataSource::File(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(bytes, b"Name,Cost\nSai PG,6000\n");
    }

    #[test]
    fn test_fetch_missing_file_is_io_error() {
        let fetcher = DefaultFetcher::new().unwrap();
        let err = fetcher
            .fetch(&DataSource::File(PathBuf::from("/nonexistent/pg_data.csv")))
            .unwrap_err();
        assert!(matches!(err, PgDashError::Io { .. }));
    }
}
