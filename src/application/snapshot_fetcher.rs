// Cached snapshot query - one fixed key, one writer
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::snapshot::DashboardSnapshot;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Contents of the cached query entry.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub data: Option<DashboardSnapshot>,
    /// True until the first fetch settles with no value cached.
    pub is_loading: bool,
    pub updated_at: Option<DateTime<Utc>>,
    fetched_at: Option<Instant>,
}

impl QueryState {
    fn initial() -> Self {
        Self {
            data: None,
            is_loading: true,
            updated_at: None,
            fetched_at: None,
        }
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        self.fetched_at
            .map(|at| at.elapsed() < stale_time)
            .unwrap_or(false)
    }
}

/// Async query over the dashboard snapshot.
///
/// The state cell is only ever written by the spawned fetch task; handlers
/// read it through [`SnapshotFetcher::observe`]. At most one fetch per key
/// is in flight at a time.
#[derive(Clone)]
pub struct SnapshotFetcher {
    inner: Arc<Inner>,
}

struct Inner {
    key: String,
    source: Arc<dyn SnapshotSource>,
    stale_time: Duration,
    state: watch::Sender<QueryState>,
    in_flight: AtomicBool,
}

impl SnapshotFetcher {
    pub fn new(key: String, source: Arc<dyn SnapshotSource>, stale_time: Duration) -> Self {
        let (state, _) = watch::channel(QueryState::initial());
        Self {
            inner: Arc::new(Inner {
                key,
                source,
                stale_time,
                state,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current `(value, is_loading)` pair.
    ///
    /// A fetch started over an empty cache reports loading even before the
    /// task has had a chance to run.
    pub fn observe(&self) -> (Option<DashboardSnapshot>, bool) {
        let state = self.inner.state.borrow();
        let pending = state.data.is_none() && self.inner.in_flight.load(Ordering::Acquire);
        (state.data.clone(), state.is_loading || pending)
    }

    pub fn state(&self) -> QueryState {
        self.inner.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.inner.state.subscribe()
    }

    /// Called once per view mount. Starts a background fetch unless the
    /// cached value is still fresh or a fetch is already running.
    ///
    /// Returns whether a fetch was started.
    pub fn mount(&self) -> bool {
        if self.inner.state.borrow().is_fresh(self.inner.stale_time) {
            tracing::debug!("Snapshot for {} is fresh, skipping fetch", self.inner.key);
            return false;
        }

        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Fetch for {} already in flight", self.inner.key);
            return false;
        }

        let inner = self.inner.clone();
        tokio::spawn(async move { Self::run_fetch(inner).await });
        true
    }

    async fn run_fetch(inner: Arc<Inner>) {
        let started = Instant::now();
        let source = inner.source.clone();
        let key = inner.key.clone();

        // A panicking source must still settle the query and release the key.
        let task = tokio::spawn(async move { source.fetch_snapshot(&key).await });
        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(anyhow::anyhow!("snapshot fetch task failed: {}", e)),
        };

        inner.state.send_modify(|state| {
            match result {
                Ok(snapshot) => {
                    tracing::debug!(
                        "Fetched snapshot for {} in {:?}",
                        inner.key,
                        started.elapsed()
                    );
                    state.data = snapshot;
                    state.updated_at = Some(Utc::now());
                    state.fetched_at = Some(Instant::now());
                }
                Err(e) => {
                    // Keeps whatever was cached; nothing is shown to the operator.
                    tracing::warn!("Error fetching snapshot for {}: {:#}", inner.key, e);
                }
            }
            state.is_loading = false;
        });

        inner.in_flight.store(false, Ordering::Release);
    }
}
