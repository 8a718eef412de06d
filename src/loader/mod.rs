use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::country::Country;

pub const DEFAULT_ENDPOINT: &str =
    "https://restcountries.com/v2/all?fields=name,region,area,languages,flags,population";

const USER_AGENT: &str = concat!("countryview/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub enum CountrySource {
    Endpoint(String),
    FilePath(String),
    Inline(Vec<Country>),
}

#[derive(Clone, Debug)]
pub struct Options {
    pub source: CountrySource,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: CountrySource::Endpoint(DEFAULT_ENDPOINT.to_string()),
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read countries file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed countries payload: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Decodes a payload (a JSON array of country objects) without touching the
/// records.
pub fn parse_payload(body: &str) -> Result<Vec<Country>, FetchError> {
    serde_json::from_str::<Vec<Country>>(body).map_err(|source| FetchError::Decode { source })
}

#[derive(Clone, Debug)]
pub struct Loader {
    options: Options,
}

impl Loader {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Loads the full collection once. There is no retry; the caller decides
    /// what a failure means for the session.
    pub async fn load(&self) -> Result<Vec<Country>, FetchError> {
        let countries = match &self.options.source {
            CountrySource::Endpoint(url) => self.fetch(url).await?,
            CountrySource::FilePath(path) => {
                debug!(%path, "reading countries file");
                let body = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::FileRead {
                        path: path.clone(),
                        source,
                    })?;
                parse_payload(&body)?
            }
            CountrySource::Inline(countries) => countries.clone(),
        };
        info!(count = countries.len(), "countries loaded");
        Ok(countries)
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(self.options.timeout_seconds));
        if let Some(proxy) = self.options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy_cfg = reqwest::Proxy::all(proxy).map_err(|source| FetchError::ProxySetup {
                proxy: proxy.to_string(),
                source,
            })?;
            builder = builder.proxy(proxy_cfg);
        }
        builder
            .build()
            .map_err(|source| FetchError::HttpClientBuild { source })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Country>, FetchError> {
        let client = self.build_client()?;
        info!(%url, "fetching countries");
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
        debug!(bytes = body.len(), "received countries payload");
        parse_payload(&body)
    }
}
