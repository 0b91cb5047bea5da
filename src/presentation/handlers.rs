// HTTP request handlers
use crate::application::trace_builder::build_dashboard;
use crate::domain::chart::DashboardCharts;
use crate::domain::pipeline::{CycleToken, PipelinePhase};
use crate::domain::region::RegionFilter;
use crate::presentation::app_state::AppState;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
pub struct RegionOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Deserialize)]
pub struct SelectRegionRequest {
    pub region: String,
}

#[derive(Serialize)]
pub struct CycleStarted {
    pub cycle: CycleToken,
    pub region: RegionFilter,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// What the UI shell renders: a spinner, the charts, or a placeholder.
#[derive(Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum DashboardView {
    Idle {
        cycle: CycleToken,
        region: RegionFilter,
    },
    Loading {
        cycle: CycleToken,
        region: RegionFilter,
    },
    Ready {
        cycle: CycleToken,
        region: RegionFilter,
        charts: DashboardCharts,
    },
    Failed {
        cycle: CycleToken,
        region: RegionFilter,
        message: String,
    },
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/regions", get(list_regions))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/region", post(select_region))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Region selector options, in display order
pub async fn list_regions() -> Json<Vec<RegionOption>> {
    Json(
        RegionFilter::ALL
            .iter()
            .map(|r| RegionOption {
                value: r.value(),
                label: r.label(),
            })
            .collect(),
    )
}

/// Current pipeline phase; charts are rebuilt from the dataset on each call
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let current = state.pipeline.current();
    let cycle = current.token;
    let region = current.region;

    let view = match current.phase {
        PipelinePhase::Idle => DashboardView::Idle { cycle, region },
        PipelinePhase::Loading => DashboardView::Loading { cycle, region },
        PipelinePhase::Ready { dataset } => DashboardView::Ready {
            cycle,
            region,
            charts: build_dashboard(&dataset),
        },
        PipelinePhase::Failed { message } => DashboardView::Failed {
            cycle,
            region,
            message,
        },
    };

    Json(view)
}

/// Start a fetch cycle for a new region
pub async fn select_region(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRegionRequest>,
) -> impl IntoResponse {
    match request.region.parse::<RegionFilter>() {
        Ok(region) => {
            let cycle = state.pipeline.select_region(region);
            tracing::info!(cycle = %cycle, region = %region, "region selected");
            (StatusCode::ACCEPTED, Json(CycleStarted { cycle, region })).into_response()
        }
        Err(e) => {
            tracing::warn!(region = %request.region, "rejected unknown region");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: e.to_string() }),
            )
                .into_response()
        }
    }
}
