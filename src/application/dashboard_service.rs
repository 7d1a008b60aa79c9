// Dashboard service - Use case for building the posture view
use crate::application::snapshot_fetcher::SnapshotFetcher;
use crate::domain::dashboard::DashboardView;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct DashboardService {
    fetcher: SnapshotFetcher,
}

impl DashboardService {
    pub fn new(fetcher: SnapshotFetcher) -> Self {
        Self { fetcher }
    }

    /// Mount the view: kick off the snapshot fetch if needed, then render
    /// whatever the query currently holds. Never waits on the fetch.
    pub fn mount(&self) -> DashboardView {
        if self.fetcher.mount() {
            tracing::debug!("Started snapshot fetch for {}", self.fetcher.key());
        }
        self.current_view()
    }

    /// View for the current query state, without triggering a fetch.
    pub fn current_view(&self) -> DashboardView {
        let (snapshot, is_loading) = self.fetcher.observe();
        DashboardView::compose(snapshot.as_ref(), is_loading)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.fetcher.state().updated_at
    }
}
