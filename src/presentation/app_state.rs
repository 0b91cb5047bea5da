// Application state for HTTP handlers
use crate::application::dashboard_pipeline::DashboardPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: DashboardPipeline,
}
