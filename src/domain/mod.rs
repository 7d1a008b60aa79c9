// Domain layer - Snapshot, derived metrics and the view they compose into
pub mod cards;
pub mod dashboard;
pub mod layout;
pub mod snapshot;
