// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Simulated validation engine.
//!
//! Stands in for a real pole detection model. Outcome generation is a
//! pluggable [`OutcomePolicy`] so a real model can replace the random one
//! without touching the controller.

use super::tasks::{sleep_or_cancel, CancellationToken, PendingTask};
use crate::models::asset::{AnalysisOutcome, AssetId, ByteSource, MediaAsset, MediaKind, PoleStatus};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// What a policy gets to see of an asset.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub asset_id: AssetId,
    pub display_name: String,
    pub kind: MediaKind,
    pub source: ByteSource,
    /// Child of the batch token, cancelled when the asset is deleted mid-run
    pub token: CancellationToken,
}

impl ValidationRequest {
    pub fn for_asset(asset: &MediaAsset, token: CancellationToken) -> Self {
        Self {
            asset_id: asset.id,
            display_name: asset.display_name.clone(),
            kind: asset.kind,
            source: asset.source.clone(),
            token,
        }
    }
}

/// Produces an analysis outcome for one asset.
pub trait OutcomePolicy: Send + Sync {
    fn assess(&self, request: &ValidationRequest) -> AnalysisOutcome;
}

/// Uniformly random outcomes: confidence in [70, 100), any status, one to
/// five detected objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOutcomePolicy;

impl OutcomePolicy for RandomOutcomePolicy {
    fn assess(&self, _request: &ValidationRequest) -> AnalysisOutcome {
        let mut rng = rand::thread_rng();
        AnalysisOutcome {
            confidence: rng.gen_range(70..100),
            status: PoleStatus::ALL[rng.gen_range(0..PoleStatus::ALL.len())],
            detected_object_count: rng.gen_range(1..=5),
        }
    }
}

/// Outcomes for one finished batch, keyed by asset.
pub type BatchOutcome = Vec<(AssetId, AnalysisOutcome)>;

#[derive(Clone)]
pub struct ValidationEngine {
    policy: Arc<dyn OutcomePolicy>,
    latency: Duration,
}

impl ValidationEngine {
    pub fn new(policy: Arc<dyn OutcomePolicy>, latency: Duration) -> Self {
        Self { policy, latency }
    }

    /// Assess a single asset synchronously.
    pub fn validate(&self, request: &ValidationRequest) -> AnalysisOutcome {
        self.policy.assess(request)
    }

    /// Run a batch on a worker thread after the simulated latency.
    ///
    /// Request tokens are expected to be children of `batch`. Requests
    /// cancelled before the worker gets to them are left out of the result
    /// without error.
    pub fn spawn_batch(&self, batch: CancellationToken, requests: Vec<ValidationRequest>) -> PendingTask<BatchOutcome> {
        let engine = self.clone();
        PendingTask::spawn_with_token("pole-validation", batch, move |task_token| async move {
            if sleep_or_cancel(&task_token, engine.latency).await {
                log::debug!("Validation batch cancelled during latency");
                return None;
            }

            let outcomes: BatchOutcome = requests
                .iter()
                .filter(|request| {
                    let cancelled = request.token.is_cancelled();
                    if cancelled {
                        log::debug!("Skipping cancelled validation of {}", request.asset_id);
                    }
                    !cancelled
                })
                .map(|request| (request.asset_id, engine.validate(request)))
                .collect();

            log::info!("Validated {} of {} assets", outcomes.len(), requests.len());
            Some(outcomes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::tasks::TaskPoll;
    use std::sync::Arc;

    fn request(id: u64) -> ValidationRequest {
        ValidationRequest {
            asset_id: AssetId(id),
            display_name: format!("pole_{}.jpg", id),
            kind: MediaKind::Image,
            source: ByteSource::new(vec![0u8; 4]),
            token: CancellationToken::new(),
        }
    }

    struct Fixed(AnalysisOutcome);

    impl OutcomePolicy for Fixed {
        fn assess(&self, _request: &ValidationRequest) -> AnalysisOutcome {
            self.0
        }
    }

    #[test]
    fn test_random_policy_ranges() {
        let policy = RandomOutcomePolicy;
        let req = request(1);
        for _ in 0..500 {
            let outcome = policy.assess(&req);
            assert!((70..100).contains(&outcome.confidence));
            assert!((1..=5).contains(&outcome.detected_object_count));
            assert!(outcome.is_well_formed());
        }
    }

    #[test]
    fn test_policy_is_pluggable() {
        let fixed = AnalysisOutcome {
            confidence: 12,
            status: PoleStatus::Warning,
            detected_object_count: 0,
        };
        let engine = ValidationEngine::new(Arc::new(Fixed(fixed)), Duration::ZERO);
        assert_eq!(engine.validate(&request(1)), fixed);
    }

    #[test]
    fn test_batch_skips_cancelled_requests() {
        let engine = ValidationEngine::new(Arc::new(RandomOutcomePolicy), Duration::from_millis(20));
        let batch = CancellationToken::new();
        let requests = vec![request(1), request(2), request(3)];
        requests[1].token.cancel();

        let task = engine.spawn_batch(batch, requests);
        match task.wait(Duration::from_secs(5)) {
            TaskPoll::Ready(outcomes) => {
                let ids: Vec<AssetId> = outcomes.iter().map(|(id, _)| *id).collect();
                assert_eq!(ids, vec![AssetId(1), AssetId(3)]);
            }
            other => panic!("unexpected poll result: {:?}", other),
        }
    }

    #[test]
    fn test_cancelled_batch_is_abandoned_during_latency() {
        let engine = ValidationEngine::new(Arc::new(RandomOutcomePolicy), Duration::from_secs(30));
        let batch = CancellationToken::new();
        let requests = vec![ValidationRequest {
            token: batch.child_token(),
            ..request(1)
        }];
        let child = requests[0].token.clone();

        let task = engine.spawn_batch(batch.clone(), requests);
        batch.cancel();
        assert!(child.is_cancelled());
        assert_eq!(task.wait(Duration::from_secs(5)), TaskPoll::Abandoned);
    }
}
