//! Catalog sources: the published HTTP endpoint or a local copy

use super::TestCaseCatalog;
use crate::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Anything the test-case catalog can be loaded from
#[async_trait]
pub trait TestCaseSource: Send + Sync {
    /// Load the full catalog. No retry is attempted.
    async fn load(&self) -> CatalogResult<TestCaseCatalog>;

    /// Human-readable location, used in log lines
    fn location(&self) -> String;
}

/// HTTP client for the published catalog
pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CatalogError::Fetch {
                url: url.clone(),
                source,
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TestCaseSource for CatalogClient {
    async fn load(&self) -> CatalogResult<TestCaseCatalog> {
        let fetch_error = |source| CatalogError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_error)?;
        TestCaseCatalog::from_slice(&body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Local copy of the catalog, same document shape as the published one
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TestCaseSource for CatalogFile {
    async fn load(&self) -> CatalogResult<TestCaseCatalog> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        TestCaseCatalog::from_slice(&body)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// An already loaded catalog
#[async_trait]
impl TestCaseSource for TestCaseCatalog {
    async fn load(&self) -> CatalogResult<TestCaseCatalog> {
        Ok(self.clone())
    }

    fn location(&self) -> String {
        "in-memory catalog".to_string()
    }
}
