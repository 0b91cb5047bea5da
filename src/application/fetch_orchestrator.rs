// Fetch orchestrator - Use case for retrieving one complete analytics cycle
use crate::application::analytics_repository::{AnalyticsError, AnalyticsRepository, Series};
use crate::domain::region::RegionFilter;
use crate::domain::trends::AnalyticsSnapshot;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of one fetch cycle. Either all four series arrived or none are used.
/// A failure names only the series that broke the cycle; the error itself is
/// logged here and goes no further.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Complete(AnalyticsSnapshot),
    Failed { series: Series },
}

#[derive(Clone)]
pub struct FetchOrchestrator {
    repository: Arc<dyn AnalyticsRepository>,
    request_timeout: Duration,
}

impl FetchOrchestrator {
    pub fn new(repository: Arc<dyn AnalyticsRepository>, request_timeout: Duration) -> Self {
        Self {
            repository,
            request_timeout,
        }
    }

    /// Dispatch the four series requests concurrently and wait for all of
    /// them. The first failure settles the whole cycle as failed; the
    /// remaining requests are dropped.
    pub async fn fetch(&self, region: RegionFilter) -> FetchOutcome {
        let start_time = Instant::now();
        tracing::debug!(region = %region, "dispatching analytics requests");

        match self.fetch_all(region).await {
            Ok(snapshot) => {
                tracing::info!(
                    region = %region,
                    records = snapshot.record_count(),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "analytics cycle complete"
                );
                FetchOutcome::Complete(snapshot)
            }
            Err(e) => {
                tracing::error!(
                    region = %region,
                    series = %e.series(),
                    error = %e,
                    "analytics cycle failed"
                );
                FetchOutcome::Failed {
                    series: e.series(),
                }
            }
        }
    }

    async fn fetch_all(&self, region: RegionFilter) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let repo = &self.repository;

        // Geographical data is requested on every cycle even though it
        // ignores the region filter.
        let (popularity, sentiment, temporal, geographical) = tokio::try_join!(
            self.bounded(Series::Popularity, repo.fetch_popularity(region)),
            self.bounded(Series::Sentiment, repo.fetch_sentiment(region)),
            self.bounded(Series::Temporal, repo.fetch_temporal(region)),
            self.bounded(Series::Geographical, repo.fetch_geographical()),
        )?;

        Ok(AnalyticsSnapshot::new(popularity, sentiment, temporal, geographical))
    }

    async fn bounded<T, F>(&self, series: Series, request: F) -> Result<T, AnalyticsError>
    where
        F: Future<Output = Result<T, AnalyticsError>>,
    {
        tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| AnalyticsError::Timeout {
                series,
                after: self.request_timeout,
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_repository::{FakeRepository, sample_snapshot};
    use crate::domain::trends::PopularityRecord;

    fn orchestrator(repo: Arc<FakeRepository>) -> FetchOrchestrator {
        FetchOrchestrator::new(repo, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_region_applies_to_scoped_series_only() {
        let repo = Arc::new(FakeRepository::new(sample_snapshot()));
        let outcome = orchestrator(repo.clone()).fetch(RegionFilter::India).await;

        assert!(matches!(outcome, FetchOutcome::Complete(_)));
        let mut calls = repo.calls();
        calls.sort_by_key(|(series, _)| series.path());
        assert_eq!(
            calls,
            vec![
                (Series::Geographical, None),
                (Series::Popularity, Some(RegionFilter::India)),
                (Series::Sentiment, Some(RegionFilter::India)),
                (Series::Temporal, Some(RegionFilter::India)),
            ]
        );
    }

    #[tokio::test]
    async fn test_complete_outcome_carries_all_series() {
        let mut snapshot = sample_snapshot();
        snapshot.popularity = vec![PopularityRecord::new("cricket", 500)];
        let repo = Arc::new(FakeRepository::new(snapshot.clone()));

        let outcome = orchestrator(repo).fetch(RegionFilter::India).await;

        assert_eq!(outcome, FetchOutcome::Complete(snapshot));
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_cycle() {
        let repo = Arc::new(FakeRepository::new(sample_snapshot()).failing(Series::Sentiment));

        let outcome = orchestrator(repo).fetch(RegionFilter::All).await;

        match outcome {
            FetchOutcome::Failed { series } => assert_eq!(series, Series::Sentiment),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let repo = Arc::new(
            FakeRepository::new(sample_snapshot())
                .with_delay(RegionFilter::Japan, Duration::from_secs(5)),
        );
        let orchestrator = FetchOrchestrator::new(repo, Duration::from_millis(50));

        let started = Instant::now();
        let outcome = orchestrator.fetch(RegionFilter::Japan).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        match outcome {
            FetchOutcome::Failed { series } => assert!(series.is_region_scoped()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
