// Dashboard pipeline - Drives fetch cycles and owns the active dataset
use crate::application::fetch_orchestrator::{FetchOrchestrator, FetchOutcome};
use crate::domain::pipeline::{CycleToken, PipelinePhase, PipelineState};
use crate::domain::region::RegionFilter;
use std::sync::Arc;
use tokio::sync::watch;

pub const FAILURE_MESSAGE: &str = "Trend data is unavailable right now. Please try again shortly.";

/// Owns the single active dataset. Every region change starts a new cycle
/// stamped with a fresh token; a cycle only writes its result if its token is
/// still the latest when it settles.
#[derive(Clone)]
pub struct DashboardPipeline {
    orchestrator: FetchOrchestrator,
    state: Arc<watch::Sender<PipelineState>>,
}

impl DashboardPipeline {
    pub fn new(orchestrator: FetchOrchestrator) -> Self {
        let (tx, _rx) = watch::channel(PipelineState::default());
        Self {
            orchestrator,
            state: Arc::new(tx),
        }
    }

    /// Start a cycle for `region` in the background and return its token.
    /// The pipeline is already `Loading` when this returns.
    pub fn select_region(&self, region: RegionFilter) -> CycleToken {
        let token = self.begin_cycle(region);
        let pipeline = self.clone();
        tokio::spawn(async move {
            pipeline.run_cycle(token, region).await;
        });
        token
    }

    pub fn begin_cycle(&self, region: RegionFilter) -> CycleToken {
        let mut token = CycleToken::default();
        self.state.send_modify(|state| {
            state.token = state.token.next();
            state.region = region;
            state.phase = PipelinePhase::Loading;
            token = state.token;
        });

        tracing::debug!(cycle = %token, region = %region, "fetch cycle started");
        token
    }

    pub async fn run_cycle(&self, token: CycleToken, region: RegionFilter) -> bool {
        let outcome = self.orchestrator.fetch(region).await;
        self.settle(token, outcome)
    }

    /// Write `outcome` as the active result if `token` is still current.
    /// Returns false when a newer cycle has started since.
    pub fn settle(&self, token: CycleToken, outcome: FetchOutcome) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if state.token != token {
                return false;
            }

            state.phase = match outcome {
                FetchOutcome::Complete(snapshot) => PipelinePhase::Ready {
                    dataset: Arc::new(snapshot),
                },
                FetchOutcome::Failed { .. } => PipelinePhase::Failed {
                    message: FAILURE_MESSAGE.to_string(),
                },
            };
            true
        });

        if applied {
            let phase = self.state.borrow().phase.name();
            tracing::debug!(cycle = %token, phase, "fetch cycle settled");
        } else {
            tracing::debug!(cycle = %token, "discarding result of superseded fetch cycle");
        }

        applied
    }

    pub fn current(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }
}
