// Presentation layer - HTTP surface for the UI shell and renderer
pub mod app_state;
pub mod handlers;
