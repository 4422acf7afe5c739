//! Fetch-decode-map pipeline for the superhero API.
//!
//! # Overview
//! Turns a name query or a hero id into presentation-ready view-models:
//! build the request URL, perform one round trip, decode the JSON body into
//! typed records, project those records into what a screen renders.
//!
//! # Design
//! - `HeroClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. A host that does its own I/O (the
//!   mobile app, through the FFI crate) uses only this half.
//! - `HeroFetcher` adds a `Transport` (default `reqwest`) for in-process use.
//! - `decode` and `view_model` are pure and synchronous.
//! - `session` keeps one "current results" slot per screen and discards
//!   completions of superseded requests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod http;
pub mod session;
pub mod types;
pub mod view_model;

pub use client::HeroClient;
pub use config::ApiConfig;
pub use decode::{decode_hero_detail, decode_search_result};
pub use error::{ApiError, DecodeError};
pub use fetch::{HeroFetcher, ReqwestTransport, Transport, FEATURED_IDS};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{DetailSession, Outcome, RequestTicket, ResultSlot, SearchSession};
pub use types::{
    Alignment, AppearanceBlock, BiographyBlock, ConnectionsBlock, HeroDetail, HeroSummary, SearchResult, Stat,
    StatBlock, WorkBlock,
};
pub use view_model::{
    to_detail_view_model, to_view_model, to_view_models, HeroDetailViewModel, HeroViewModel, InfoRow, StatEntry,
};
