//! In-process execution of the round trip.
//!
//! `HeroFetcher` is `HeroClient` plus a `Transport`: build the request,
//! execute it once, parse the response. There is no retry and no cache; any
//! failure is returned to the caller, who re-invokes to try again.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::HeroClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HeroDetail, HeroSummary, SearchResult};

/// Executes one `HttpRequest`. Implementations must hand back every status
/// as data; only a failed round trip is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.path),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Build, execute and parse in one call.
#[derive(Debug, Clone)]
pub struct HeroFetcher<T = ReqwestTransport> {
    client: HeroClient,
    transport: T,
}

impl HeroFetcher<ReqwestTransport> {
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(HeroClient::new(config), transport))
    }
}

impl<T: Transport> HeroFetcher<T> {
    pub fn new(client: HeroClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &HeroClient {
        &self.client
    }

    pub async fn search_by_query(&self, query: &str) -> Result<SearchResult, ApiError> {
        let request = self.client.build_search(query);
        let response = self.transport.execute(request).await?;
        debug!(query, status = response.status, "search response");
        self.client.parse_search(response)
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<HeroDetail, ApiError> {
        let request = self.client.build_lookup(id);
        let response = self.transport.execute(request).await?;
        debug!(id, status = response.status, "lookup response");
        self.client.parse_lookup(response)
    }

    /// Look up each id in turn for the home carousel. Failed lookups are
    /// logged and left out; the order of the survivors follows `ids`.
    pub async fn fetch_featured(&self, ids: &[&str]) -> Vec<HeroSummary> {
        let mut featured = Vec::with_capacity(ids.len());
        for id in ids {
            match self.fetch_by_id(id).await {
                Ok(hero) => featured.push(hero.summary()),
                Err(e) => warn!(id, error = %e, "skipping featured hero"),
            }
        }
        featured
    }
}

/// Ids of the heroes shown before the first search: Iron Man, Superman,
/// Spider-Man, Batman.
pub const FEATURED_IDS: [&str; 4] = ["346", "644", "620", "70"];
