// Application layer - Query state and dashboard use cases
pub mod dashboard_service;
pub mod snapshot_fetcher;
pub mod snapshot_source;
