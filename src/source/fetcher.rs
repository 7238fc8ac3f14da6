use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Retrieves the raw questionnaire export behind a URL
#[cfg_attr(test, mockall::automock)]
pub trait FormFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`FormFetcher`] over blocking HTTP.
///
/// The client is built on the first fetch, so local files never touch it.
#[derive(Default)]
pub struct HttpFetcher {
    client: OnceLock<Client>,
}

impl HttpFetcher {
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        debug!("building HTTP client");
        let client = Client::builder()
            .user_agent(concat!("formhtml/", env!("CARGO_PKG_VERSION")))
            .timeout(Self::TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(self.client.get_or_init(|| client))
    }

    #[cfg(test)]
    pub(crate) fn has_client(&self) -> bool {
        self.client.get().is_some()
    }
}

impl FormFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching questionnaire");

        let response = self
            .client()?
            .get(url)
            .header(ACCEPT, "application/json, application/zstd")
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            bail!("Questionnaire not found at {}", url);
        }
        if !status.is_success() {
            bail!("Failed to fetch questionnaire from {}: HTTP {}", url, status);
        }

        let body = response
            .bytes()
            .with_context(|| format!("Failed to read response body from {}", url))?;
        debug!(url, bytes = body.len(), "fetched questionnaire");

        Ok(body.to_vec())
    }
}
