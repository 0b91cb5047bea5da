// Pipeline state machine: Idle -> Loading -> {Ready, Failed}
use super::region::RegionFilter;
use super::trends::AnalyticsSnapshot;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Stamp identifying one fetch cycle. Later cycles always carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct CycleToken(pub u64);

impl CycleToken {
    pub fn next(self) -> Self {
        CycleToken(self.0 + 1)
    }
}

impl fmt::Display for CycleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    Loading,
    Ready { dataset: Arc<AnalyticsSnapshot> },
    /// No data is held; `message` is shown in place of the charts
    Failed { message: String },
}

impl PipelinePhase {
    pub fn name(&self) -> &'static str {
        match self {
            PipelinePhase::Idle => "idle",
            PipelinePhase::Loading => "loading",
            PipelinePhase::Ready { .. } => "ready",
            PipelinePhase::Failed { .. } => "failed",
        }
    }
}

/// The single shared dataset plus its status. Only the pipeline writes it.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub token: CycleToken,
    pub region: RegionFilter,
    pub phase: PipelinePhase,
}

impl PipelineState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PipelinePhase::Loading)
    }

    pub fn dataset(&self) -> Option<&Arc<AnalyticsSnapshot>> {
        match &self.phase {
            PipelinePhase::Ready { dataset } => Some(dataset),
            _ => None,
        }
    }
}
