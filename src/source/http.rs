//! A neighbor source backed by a remote lookup service.
//!
//! The neighbors of `node` are obtained with a `GET` of the base URL
//! extended by `node` as a single percent-encoded path segment. The service
//! answers with a JSON object whose `neighbors` member lists the neighbors:
//!
//! ```json
//! {"node": "Kevin Bacon", "neighbors": ["Footloose", "Apollo 13"]}
//! ```

use super::{LookupError, NeighborSource};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// The default lookup service.
pub const DEFAULT_BASE_URL: &str = "http://hollywood-graph-crawler.bridgesuncc.org/neighbors/";

/// Errors raised while building an [`HttpSource`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL {0:?} cannot have path segments")]
    CannotBeABase(String),
    #[error("cannot build the HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Configuration of an [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// The URL node names are appended to.
    pub base_url: String,
    /// The `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Timeout of a single lookup; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Honors the proxies set in the environment (`HTTP_PROXY` and
    /// friends).
    pub system_proxy: bool,
    /// Logs every request and response at info level instead of debug
    /// level.
    pub debug: bool,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout: Some(Duration::from_secs(30)),
            system_proxy: true,
            debug: false,
        }
    }
}

impl HttpSourceConfig {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn system_proxy(mut self, system_proxy: bool) -> Self {
        self.system_proxy = system_proxy;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the source.
    pub fn build(self) -> Result<HttpSource, ConfigError> {
        HttpSource::new(self)
    }
}

#[derive(Deserialize)]
struct NeighborsResponse {
    #[serde(default)]
    neighbors: Vec<String>,
}

/// Decodes the body of a lookup response.
///
/// A missing `neighbors` member means no neighbors.
pub fn decode_neighbors(body: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str::<NeighborsResponse>(body).map(|response| response.neighbors)
}

/// A [`NeighborSource`] querying a remote lookup service over HTTP.
///
/// The underlying client keeps a connection pool shared by all the workers
/// of a parallel visit.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
    debug: bool,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ConfigError::InvalidUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(config.base_url));
        }

        // The blocking client applies a 30s timeout unless told otherwise.
        let mut builder = Client::builder()
            .user_agent(config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ConfigError::Client)?;

        Ok(Self {
            client,
            base_url,
            debug: config.debug,
        })
    }

    /// The URL queried for the neighbors of `node`.
    pub fn url_for(&self, node: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL was checked at construction")
            .pop_if_empty()
            .push(node);
        url
    }

    fn trace(&self, args: std::fmt::Arguments) {
        if self.debug {
            info!("{}", args);
        } else {
            debug!("{}", args);
        }
    }
}

impl NeighborSource for HttpSource {
    fn neighbors(&self, node: &str) -> Result<Vec<String>, LookupError> {
        let url = self.url_for(node);
        self.trace(format_args!("Sending request to: {url}"));

        let transport = |source: reqwest::Error| LookupError::Transport {
            node: node.to_owned(),
            source,
        };
        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                node: node.to_owned(),
                status,
            });
        }
        let body = response.text().map_err(transport)?;
        self.trace(format_args!("Response received: {body}"));

        decode_neighbors(&body).map_err(|source| LookupError::Decode {
            node: node.to_owned(),
            source,
        })
    }
}
