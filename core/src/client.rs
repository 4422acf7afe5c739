//! Stateless HTTP request builder and response parser for the superhero API.
//!
//! # Design
//! `HeroClient` holds only its `ApiConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round trip in between, which keeps
//! this half deterministic and free of I/O.
//!
//! The status line is checked before any decoding: a non-2xx answer is an
//! `ApiError::Http` carrying the status, so "not found" and "server error"
//! never masquerade as malformed JSON.

use tracing::debug;

use crate::config::ApiConfig;
use crate::decode::{decode_hero_detail, decode_search_result};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HeroDetail, SearchResult};

#[derive(Debug, Clone)]
pub struct HeroClient {
    config: ApiConfig,
}

impl HeroClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET <base>/<token>/search/<query>`, with `query` sent as one encoded
    /// path segment.
    pub fn build_search(&self, query: &str) -> HttpRequest {
        debug!(query, "building search request");
        self.get(&format!("search/{}", urlencoding::encode(query)))
    }

    /// `GET <base>/<token>/<id>`.
    pub fn build_lookup(&self, id: &str) -> HttpRequest {
        debug!(id, "building lookup request");
        self.get(&urlencoding::encode(id))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchResult, ApiError> {
        check_status(&response)?;
        Ok(decode_search_result(response.body.as_bytes())?)
    }

    pub fn parse_lookup(&self, response: HttpResponse) -> Result<HeroDetail, ApiError> {
        check_status(&response)?;
        Ok(decode_hero_detail(response.body.as_bytes())?)
    }

    fn get(&self, tail: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!(
                "{}/{}/{tail}",
                self.config.base_url,
                urlencoding::encode(&self.config.access_token)
            ),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Map non-2xx status codes to `ApiError::Http` without touching the body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
