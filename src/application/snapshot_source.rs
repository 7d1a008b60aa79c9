// Source trait for the aggregate posture snapshot
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Read the snapshot stored under `key`.
    ///
    /// `Ok(None)` means the upstream answered but had nothing to report.
    async fn fetch_snapshot(&self, key: &str) -> anyhow::Result<Option<DashboardSnapshot>>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// In-memory source that counts calls and can hold a fetch open.
    pub struct StaticSource {
        response: Mutex<Result<Option<DashboardSnapshot>, String>>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        pub fn returning(snapshot: Option<DashboardSnapshot>) -> Self {
            Self {
                response: Mutex::new(Ok(snapshot)),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                response: Mutex::new(Err(message.to_string())),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Each fetch waits for one `notify_one` on the returned handle.
        pub fn gated(mut self) -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            self.gate = Some(gate.clone());
            (self, gate)
        }

        pub fn set_response(&self, response: Result<Option<DashboardSnapshot>, String>) {
            *self.response.lock().unwrap() = response;
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SnapshotSource for StaticSource {
        async fn fetch_snapshot(&self, _key: &str) -> anyhow::Result<Option<DashboardSnapshot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let response = self.response.lock().unwrap().clone();
            response.map_err(|e| anyhow::anyhow!(e))
        }
    }
}
