use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::config::DownloadsConfig;
use crate::error::DownloadError;

use super::DownloadRequest;
use super::host::{Blob, Fetcher};

const FALLBACK_MIME: &str = "application/octet-stream";

/// [`Fetcher`] backed by `reqwest`.
///
/// Relative hrefs are resolved against the configured API base URL. No
/// timeout or retry is added on top of the client's defaults.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    pub fn new(base_url: Option<&str>) -> Result<Self, DownloadError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies, TLS roots).
    pub fn with_client(client: Client, base_url: Option<&str>) -> Result<Self, DownloadError> {
        let base_url = base_url
            .filter(|base| !base.trim().is_empty())
            .map(|base| {
                Url::parse(base).map_err(|e| DownloadError::InvalidUrl {
                    href: base.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            client,
            base_url,
        })
    }

    pub fn from_config(config: &DownloadsConfig) -> Result<Self, DownloadError> {
        Self::new(config.api_base_url.as_deref())
    }

    fn resolve(&self, href: &str) -> Result<Url, DownloadError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        resolved.map_err(|e| DownloadError::InvalidUrl {
            href: href.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &DownloadRequest) -> Result<Blob, DownloadError> {
        let url = self.resolve(&request.href)?;
        tracing::debug!(%url, authorized = request.token.is_some(), "fetching download");

        let mut builder = self.client.get(url);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DownloadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        Ok(Blob { bytes, mime })
    }
}
