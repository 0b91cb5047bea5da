// Social media trend dashboard: analytics fetch pipeline and chart descriptors
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
