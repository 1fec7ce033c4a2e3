//! Data-fetching hooks.
//!
//! # Design
//! A [`Query`] bridges one service call into observable state. It owns the
//! current parameters, a fetcher, and a `tokio::sync::watch` channel that
//! publishes [`QueryState`] snapshots:
//!
//! ```text
//! Idle --fetch--> Loading --ok--> Ready
//!                    |  \--err--> Errored
//!                    ^------------- refetch / new params
//! ```
//!
//! Each fetch runs in its own task. Starting a new fetch aborts the previous
//! task and bumps a generation counter; a task only publishes if its
//! generation is still current, checked under the channel's write lock, so
//! an older response can never overwrite a newer one.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Donation, DonationQuery, Testimony, TestimonyCategory, TestimonyQuery};

/// Page size requested by the public testimony wall.
pub const TESTIMONY_WALL_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Snapshot of a query.
///
/// `data` is the last successfully fetched value and survives later
/// failures; `error` is cleared by the next success.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<Arc<ApiError>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;
type Fetcher<P, T> = Arc<dyn Fn(P) -> BoxFuture<T> + Send + Sync>;

pub struct Query<P, T> {
    params: P,
    fetcher: Fetcher<P, T>,
    state: Arc<watch::Sender<QueryState<T>>>,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
}

impl<P, T> std::fmt::Debug for Query<P, T>
where
    P: std::fmt::Debug,
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("params", &self.params)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<P, T> Query<P, T>
where
    P: PartialEq + Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// An idle query; nothing is fetched until [`refetch`](Self::refetch).
    pub fn new<F, Fut>(params: P, fetcher: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetcher: Fetcher<P, T> = Arc::new(move |params: P| -> BoxFuture<T> { Box::pin(fetcher(params)) });
        let (state, _) = watch::channel(QueryState::default());
        Self {
            params,
            fetcher,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        }
    }

    /// Create the query and start the first fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<F, Fut>(params: P, fetcher: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let mut query = Self::new(params, fetcher);
        query.start_fetch();
        query
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    /// Replace the parameters, fetching only if they differ by value.
    ///
    /// Returns whether a fetch was started.
    pub fn set_params(&mut self, params: P) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.start_fetch();
        true
    }

    /// Fetch again with the current parameters.
    pub fn refetch(&mut self) {
        self.start_fetch();
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Wait until the query is no longer loading and return that state.
    pub async fn settled(&self) -> QueryState<T> {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    fn start_fetch(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.state.send_modify(|state| state.status = QueryStatus::Loading);
        debug!(generation, "query fetch started");

        let fetch = (self.fetcher)(self.params.clone());
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch.await;
            let published = state.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                match result {
                    Ok(data) => {
                        state.status = QueryStatus::Ready;
                        state.data = Some(data);
                        state.error = None;
                    }
                    Err(error) => {
                        state.status = QueryStatus::Errored;
                        state.error = Some(Arc::new(error));
                    }
                }
                true
            });
            if !published {
                debug!(generation, "discarded superseded query result");
            }
        }));
    }
}

impl<P, T> Drop for Query<P, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Admin donation list, refetched whenever the filters change.
pub fn donations(client: ApiClient, params: DonationQuery) -> Query<DonationQuery, Vec<Donation>> {
    Query::mount(params, move |params: DonationQuery| {
        let client = client.clone();
        async move { Ok::<_, ApiError>(client.donations().list(&params).await?.data) }
    })
}

/// Parameters used by [`approved_testimonies`].
pub fn testimony_wall_params(category: Option<TestimonyCategory>, featured: Option<bool>) -> TestimonyQuery {
    TestimonyQuery {
        category,
        featured,
        limit: Some(TESTIMONY_WALL_LIMIT),
        page: None,
    }
}

/// Approved testimonies for the public wall.
///
/// Change filters with
/// `query.set_params(testimony_wall_params(category, featured))`.
pub fn approved_testimonies(
    client: ApiClient,
    category: Option<TestimonyCategory>,
    featured: Option<bool>,
) -> Query<TestimonyQuery, Vec<Testimony>> {
    Query::mount(testimony_wall_params(category, featured), move |params: TestimonyQuery| {
        let client = client.clone();
        async move { Ok::<_, ApiError>(client.testimonies().list_approved(&params).await?.data) }
    })
}
