use std::time::Duration;

use futures_util::StreamExt;
use netscope_logging::ns_debug;
use reqwest::header::CONTENT_TYPE;

use crate::{
    build_scrape_url, decode_body, parse_document, FailureKind, FetchError, ScrapeDocument,
};

pub const DEFAULT_SERVICE_URL: &str = "https://network-tool-server-production.up.railway.app";

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// Whole-request deadline. `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: None,
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ScrapeClient: Send + Sync {
    /// Asks the scraping service to scrape `url` and returns its reply.
    async fn scrape(&self, url: &str) -> Result<ScrapeDocument, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScrapeClient {
    settings: ScrapeSettings,
    client: reqwest::Client,
}

impl ReqwestScrapeClient {
    pub fn new(settings: ScrapeSettings) -> Result<Self, FetchError> {
        // Fail early on a bad base url instead of on every request.
        build_scrape_url(&settings.base_url, "")?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ScrapeSettings {
        &self.settings
    }

    async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>), FetchError> {
        let request_url = build_scrape_url(&self.settings.base_url, url)?;
        ns_debug!("GET {}", request_url);

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok((bytes, content_type))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ScrapeClient for ReqwestScrapeClient {
    async fn scrape(&self, url: &str) -> Result<ScrapeDocument, FetchError> {
        let (bytes, content_type) = self.download(url).await?;
        let body = decode_body(&bytes, content_type.as_deref())?;
        parse_document(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
