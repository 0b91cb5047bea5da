// Application layer - Use cases and the repository seam
pub mod analytics_repository;
pub mod dashboard_pipeline;
pub mod fetch_orchestrator;
pub mod geo_partitioner;
pub mod trace_builder;

#[cfg(test)]
pub mod fake_repository;
