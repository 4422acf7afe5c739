//! Screen-level "current results" slots.
//!
//! # Design
//! A screen shows the result of the request it issued last, not the one that
//! happened to finish last. Each request takes a `RequestTicket` from its
//! slot; tickets carry a monotonically increasing sequence number and a
//! cancellation token. Issuing a new ticket cancels the previous one, and a
//! completion whose ticket is no longer the latest is discarded.
//!
//! The sequence number, the in-flight token and the value share one mutex so
//! "is this ticket still the latest" and "replace the value" are a single
//! step. The lock is never held across an await.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::fetch::{HeroFetcher, ReqwestTransport, Transport};
use crate::view_model::{to_detail_view_model, to_view_model, to_view_models, HeroDetailViewModel, HeroViewModel};

/// Handle for one in-flight request.
#[derive(Debug)]
pub struct RequestTicket {
    pub seq: u64,
    /// Correlates log lines of one request.
    pub request_id: Uuid,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.token
    }
}

/// What became of a request driven through [`ResultSlot::run`].
#[derive(Debug)]
pub enum Outcome {
    /// The result replaced the slot's value.
    Applied,
    /// Finished, but a newer request had been issued; result dropped.
    Stale,
    /// Superseded before it finished.
    Cancelled,
    /// The fetch failed; the slot keeps its previous value.
    Failed(ApiError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

struct SlotState<T> {
    seq: u64,
    in_flight: CancellationToken,
    value: T,
}

pub struct ResultSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T: Default> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ResultSlot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Mutex::new(SlotState {
                seq: 0,
                in_flight: CancellationToken::new(),
                value: initial,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a ticket for a new request and cancel the one in flight.
    pub fn begin(&self) -> RequestTicket {
        let mut state = self.lock();
        state.seq += 1;
        let token = CancellationToken::new();
        let previous = std::mem::replace(&mut state.in_flight, token.clone());
        previous.cancel();
        RequestTicket {
            seq: state.seq,
            request_id: Uuid::new_v4(),
            token,
        }
    }

    /// Sequence number of the most recently issued ticket.
    pub fn latest_seq(&self) -> u64 {
        self.lock().seq
    }

    /// Store `value` if `ticket` is still the latest. Returns whether it was
    /// stored.
    pub fn commit(&self, ticket: &RequestTicket, value: T) -> bool {
        let mut state = self.lock();
        if ticket.seq != state.seq {
            return false;
        }
        state.value = value;
        true
    }

    pub fn current(&self) -> T
    where
        T: Clone,
    {
        self.lock().value.clone()
    }

    /// Drive `fetch` under `ticket`: stop early if superseded, commit on
    /// success, keep the previous value on failure.
    pub async fn run<F>(&self, ticket: RequestTicket, fetch: F) -> Outcome
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let span = info_span!("request", seq = ticket.seq, request_id = %ticket.request_id);
        async move {
            let result = tokio::select! {
                biased;
                _ = ticket.token.cancelled() => {
                    debug!("superseded before completion");
                    return Outcome::Cancelled;
                }
                result = fetch => result,
            };
            match result {
                Ok(value) => {
                    if self.commit(&ticket, value) {
                        Outcome::Applied
                    } else {
                        debug!("discarding stale completion");
                        Outcome::Stale
                    }
                }
                Err(e) => {
                    warn!(error = %e, "fetch failed, keeping previous results");
                    Outcome::Failed(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// State behind the search screen: the current result list.
pub struct SearchSession<T = ReqwestTransport> {
    fetcher: HeroFetcher<T>,
    results: ResultSlot<Vec<HeroViewModel>>,
}

impl<T: Transport> SearchSession<T> {
    pub fn new(fetcher: HeroFetcher<T>) -> Self {
        Self {
            fetcher,
            results: ResultSlot::default(),
        }
    }

    /// Run a name search. A blank query sends nothing and empties the list.
    pub async fn search(&self, query: &str) -> Outcome {
        if query.trim().is_empty() {
            self.clear();
            return Outcome::Applied;
        }
        let ticket = self.results.begin();
        let fetcher = &self.fetcher;
        self.results
            .run(ticket, async move {
                let result = fetcher.search_by_query(query).await?;
                Ok::<_, ApiError>(to_view_models(&result))
            })
            .await
    }

    /// Fill the list with the featured heroes, e.g. before the first search.
    pub async fn load_featured(&self, ids: &[&str]) -> Outcome {
        let ticket = self.results.begin();
        let fetcher = &self.fetcher;
        self.results
            .run(ticket, async move {
                let heroes = fetcher.fetch_featured(ids).await;
                Ok::<_, ApiError>(heroes.iter().map(to_view_model).collect::<Vec<_>>())
            })
            .await
    }

    /// Cancel anything in flight and empty the list.
    pub fn clear(&self) {
        let ticket = self.results.begin();
        self.results.commit(&ticket, Vec::new());
    }

    pub fn results(&self) -> Vec<HeroViewModel> {
        self.results.current()
    }
}

/// State behind the detail screen: the hero currently open, if any.
pub struct DetailSession<T = ReqwestTransport> {
    fetcher: HeroFetcher<T>,
    hero: ResultSlot<Option<HeroDetailViewModel>>,
}

impl<T: Transport> DetailSession<T> {
    pub fn new(fetcher: HeroFetcher<T>) -> Self {
        Self {
            fetcher,
            hero: ResultSlot::default(),
        }
    }

    pub async fn open(&self, id: &str) -> Outcome {
        let ticket = self.hero.begin();
        let fetcher = &self.fetcher;
        self.hero
            .run(ticket, async move {
                let hero = fetcher.fetch_by_id(id).await?;
                Ok::<_, ApiError>(Some(to_detail_view_model(&hero)))
            })
            .await
    }

    pub fn hero(&self) -> Option<HeroDetailViewModel> {
        self.hero.current()
    }
}
