// Presentation layer - HTTP handlers and HTML views
pub mod app_state;
pub mod handlers;
pub mod views;
