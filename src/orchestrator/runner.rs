use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{AssessmentError, AssessmentResult};
use crate::evaluators::{DimensionEvaluator, EvaluationInput, EvaluatorSet};
use crate::scoring::{DimensionKind, QualityDimension};

use super::cancel::CancellationToken;
use super::types::{OrchestrationOutcome, OrchestrationState, StageGate, Strategy};

/// Schedules an [`EvaluatorSet`] according to a [`Strategy`].
///
/// Evaluators are synchronous and CPU-bound, so each one runs on the blocking
/// pool. A panic inside an evaluator is caught there and reported as
/// [`AssessmentError::EvaluatorPanicked`]; recovering from it is the caller's job.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    evaluators: EvaluatorSet,
    strategy: Strategy,
    gate: StageGate,
    timeout: Duration,
    max_concurrency: usize,
}

impl Orchestrator {
    pub fn new(
        evaluators: EvaluatorSet,
        strategy: Strategy,
        gate: StageGate,
        timeout: Duration,
        max_concurrency: usize,
    ) -> Self {
        Self {
            evaluators,
            strategy,
            gate,
            timeout,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn from_config(config: &Config, evaluators: EvaluatorSet) -> Self {
        Self::new(
            evaluators,
            Strategy::from_config(config),
            StageGate::from_config(config),
            config.max_processing_time,
            config.max_concurrency,
        )
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stage_gate(&self) -> StageGate {
        self.gate
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs every stage the strategy calls for.
    pub async fn run(&self, input: Arc<EvaluationInput>) -> AssessmentResult<OrchestrationOutcome> {
        self.run_with_cancel(input, &CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), but stops with [`AssessmentError::Cancelled`] once
    /// `cancel` fires.
    ///
    /// In parallel mode a timeout cancels the in-flight fan-out (tasks that have not
    /// started yet skip their evaluator) and re-runs the set sequentially.
    pub async fn run_with_cancel(
        &self,
        input: Arc<EvaluationInput>,
        cancel: &CancellationToken,
    ) -> AssessmentResult<OrchestrationOutcome> {
        let started = Instant::now();
        let mut state = OrchestrationState::Init;
        Self::advance(&mut state, OrchestrationState::Evaluating);

        let (dimensions, early_exit) = match self.strategy {
            Strategy::Sequential => {
                let (dimensions, early_exit) = self.run_sequential(&input, cancel).await?;
                let next = if early_exit {
                    OrchestrationState::EarlyExit
                } else {
                    OrchestrationState::Complete
                };
                Self::advance(&mut state, next);
                (dimensions, early_exit)
            }
            Strategy::Parallel => {
                if cancel.is_cancelled() {
                    return Err(AssessmentError::Cancelled);
                }
                // Separate from `cancel` so that abandoning the fan-out leaves the
                // sequential fallback runnable.
                let fan_out = CancellationToken::new();
                match time::timeout(self.timeout, self.run_parallel(&input, &fan_out)).await {
                    Ok(result) => {
                        let dimensions = result?;
                        Self::advance(&mut state, OrchestrationState::Complete);
                        (dimensions, false)
                    }
                    Err(_) => {
                        fan_out.cancel();
                        warn!(
                            timeout_ms = self.timeout.as_millis() as u64,
                            "Parallel evaluation timed out; falling back to sequential"
                        );
                        let (dimensions, early_exit) = self.run_sequential(&input, cancel).await?;
                        Self::advance(&mut state, OrchestrationState::TimedOutFallback);
                        (dimensions, early_exit)
                    }
                }
            }
        };

        let outcome = state;
        Self::advance(&mut state, OrchestrationState::Done);

        Ok(OrchestrationOutcome {
            dimensions,
            state: outcome,
            early_exit,
            elapsed: started.elapsed(),
        })
    }

    /// All evaluators concurrently, at most `max_concurrency` at a time.
    ///
    /// Dropping the returned future (on timeout) drops the `JoinSet`, which aborts
    /// every task still waiting for a permit.
    async fn run_parallel(
        &self,
        input: &Arc<EvaluationInput>,
        cancel: &CancellationToken,
    ) -> AssessmentResult<Vec<QualityDimension>> {
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, evaluator) in self.evaluators.iter().enumerate() {
            let evaluator = Arc::clone(evaluator);
            let input = Arc::clone(input);
            let permits = Arc::clone(&permits);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| AssessmentError::TaskFailed(e.to_string()))?;
                if cancel.is_cancelled() {
                    return Err(AssessmentError::Cancelled);
                }
                let dimension = Self::evaluate_blocking(evaluator, input, Some(cancel)).await?;
                Ok((index, dimension))
            });
        }

        let mut slots: Vec<Option<QualityDimension>> = vec![None; self.evaluators.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, dimension) =
                joined.map_err(|e| AssessmentError::TaskFailed(e.to_string()))??;
            debug!(
                dimension = %dimension.kind,
                score = dimension.score,
                "Parallel stage finished"
            );
            slots[index] = Some(dimension);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Evaluators in canonical order. Returns the dimensions and whether the stage
    /// gate stopped the run after the first one.
    async fn run_sequential(
        &self,
        input: &Arc<EvaluationInput>,
        cancel: &CancellationToken,
    ) -> AssessmentResult<(Vec<QualityDimension>, bool)> {
        let mut dimensions = Vec::with_capacity(self.evaluators.len());

        for (stage, evaluator) in self.evaluators.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(AssessmentError::Cancelled);
            }

            let dimension =
                Self::evaluate_blocking(Arc::clone(evaluator), Arc::clone(input), None).await?;
            debug!(
                stage,
                dimension = %dimension.kind,
                score = dimension.score,
                "Sequential stage finished"
            );

            let gated = stage == 0 && self.gate.should_exit(dimension.score);
            let score = dimension.score;
            dimensions.push(dimension);

            if gated {
                info!(
                    score,
                    threshold = self.gate.threshold,
                    "Stage gate triggered; skipping remaining dimensions"
                );
                return Ok((dimensions, true));
            }
        }

        Ok((dimensions, false))
    }

    async fn evaluate_blocking(
        evaluator: Arc<dyn DimensionEvaluator>,
        input: Arc<EvaluationInput>,
        cancel: Option<CancellationToken>,
    ) -> AssessmentResult<QualityDimension> {
        let kind = evaluator.kind();
        let outcome = tokio::task::spawn_blocking(move || {
            if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                return None;
            }
            Some(evaluator.evaluate(&input))
        })
        .await
        .map_err(|e| Self::join_error(kind, e))?;

        outcome.ok_or(AssessmentError::Cancelled)
    }

    fn join_error(kind: DimensionKind, err: JoinError) -> AssessmentError {
        if err.is_panic() {
            AssessmentError::EvaluatorPanicked {
                dimension: kind,
                message: panic_message(err.into_panic()),
            }
        } else {
            AssessmentError::TaskFailed(err.to_string())
        }
    }

    fn advance(state: &mut OrchestrationState, next: OrchestrationState) {
        debug_assert!(
            state.can_transition_to(next),
            "invalid orchestration transition {} -> {}",
            state,
            next
        );
        debug!(from = %state, to = %next, "Orchestration state change");
        *state = next;
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
