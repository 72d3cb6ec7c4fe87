//! HTTP client for Ore repository probes.

use crate::url::{API_BASE, project_url};
use orecheck_types::PackageId;
use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

/// Configuration for the probe client.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Base URL of the repository API.
    pub api_base: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed between reads once connected.
    ///
    /// The whole exchange is additionally capped at
    /// [`request_timeout`](Self::request_timeout), so a slow TLS handshake
    /// followed by slow headers fails even if no single step times out.
    pub read_timeout: Duration,
    /// Refuse plain-HTTP URLs. Such a request counts as a transport failure.
    pub https_only: bool,
    /// User agent string.
    pub user_agent: String,
}

impl ProbeConfig {
    /// Default connect and read timeout (250 ms each).
    ///
    /// Raising it trades scan latency for fewer false negatives on slow links.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(250);

    /// Maximum number of redirects followed per probe.
    pub const MAX_REDIRECTS: usize = 10;

    /// Upper bound for one whole request: connect plus one read.
    ///
    /// Any probe slower than this counts as a transport failure.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            connect_timeout: Self::DEFAULT_TIMEOUT,
            read_timeout: Self::DEFAULT_TIMEOUT,
            https_only: true,
            user_agent: format!("orecheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while contacting the repository.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP request failed before a status code was received.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Any other transport failure reported by a non-HTTP probe.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ProbeError {
    /// Returns a short name for the failure class, used for abbreviated logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(e) if e.is_connect() => "connect",
            Self::Http(e) if e.is_redirect() => "redirect",
            Self::Http(e) if e.is_builder() => "builder",
            Self::Http(e) if e.is_request() => "request",
            Self::Http(_) => "http",
            Self::Transport(_) => "transport",
        }
    }
}

/// HTTP client that performs one-shot project lookups.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    config: ProbeConfig,
}

impl ProbeClient {
    /// Creates a new probe client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout())
            .redirect(redirect::Policy::limited(ProbeConfig::MAX_REDIRECTS))
            .https_only(config.https_only)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ProbeConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Looks up a project and returns the response status.
    ///
    /// The body is never read.
    ///
    /// # Errors
    ///
    /// Returns an error if no response status could be obtained.
    pub async fn project_status(&self, id: &PackageId) -> Result<StatusCode, ProbeError> {
        let url = project_url(&self.config.api_base, id);
        trace!(%url, "Contacting URL");

        let response = self.client.get(&url).send().await?;
        Ok(response.status())
    }
}
