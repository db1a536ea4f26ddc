use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::scoring::QualityDimension;

/// How the evaluators are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// All evaluators at once, raced against the processing timeout.
    Parallel,
    /// One at a time in canonical order, with optional stage-gating.
    Sequential,
}

impl Strategy {
    pub fn from_config(config: &Config) -> Self {
        if config.enable_parallel_processing {
            Strategy::Parallel
        } else {
            Strategy::Sequential
        }
    }
}

/// Early-exit policy applied to the first sequential stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageGate {
    pub enabled: bool,
    pub threshold: f64,
}

impl StageGate {
    pub fn new(enabled: bool, threshold: f64) -> Self {
        Self { enabled, threshold }
    }

    pub fn disabled() -> Self {
        Self::new(false, 0.0)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.enable_stage_gating, config.stage_gate_threshold)
    }

    /// `true` when the gate is on and `score` is strictly below the threshold.
    #[inline]
    pub fn should_exit(&self, score: f64) -> bool {
        self.enabled && score < self.threshold
    }
}

/// Orchestration lifecycle.
///
/// `Init -> Evaluating -> {Complete | EarlyExit | TimedOutFallback} -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationState {
    Init,
    Evaluating,
    Complete,
    EarlyExit,
    TimedOutFallback,
    Done,
}

impl OrchestrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrchestrationState::Init => "init",
            OrchestrationState::Evaluating => "evaluating",
            OrchestrationState::Complete => "complete",
            OrchestrationState::EarlyExit => "early_exit",
            OrchestrationState::TimedOutFallback => "timed_out_fallback",
            OrchestrationState::Done => "done",
        }
    }

    /// One of the three outcomes an evaluation run can settle in.
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            OrchestrationState::Complete
                | OrchestrationState::EarlyExit
                | OrchestrationState::TimedOutFallback
        )
    }

    pub fn can_transition_to(&self, next: OrchestrationState) -> bool {
        use OrchestrationState::*;
        matches!(
            (self, next),
            (Init, Evaluating)
                | (Evaluating, Complete)
                | (Evaluating, EarlyExit)
                | (Evaluating, TimedOutFallback)
                | (Complete, Done)
                | (EarlyExit, Done)
                | (TimedOutFallback, Done)
        )
    }
}

impl fmt::Display for OrchestrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions produced by one run plus how the run ended.
#[derive(Debug, Clone)]
pub struct OrchestrationOutcome {
    /// Computed dimensions in canonical order.
    pub dimensions: Vec<QualityDimension>,
    /// The outcome the run settled in before reaching `Done`: `Complete`,
    /// `EarlyExit`, or `TimedOutFallback`.
    pub state: OrchestrationState,
    /// The stage gate stopped evaluation after the first dimension. Can be set
    /// alongside `TimedOutFallback`.
    pub early_exit: bool,
    pub elapsed: Duration,
}

impl OrchestrationOutcome {
    pub fn timed_out(&self) -> bool {
        self.state == OrchestrationState::TimedOutFallback
    }
}
