//! Evaluation scheduling.
//!
//! Two strategies:
//! - **Parallel**: every evaluator runs concurrently (bounded by `max_concurrency`)
//!   and the whole fan-out races the processing timeout. On timeout the fan-out
//!   is cancelled and the set re-runs sequentially.
//! - **Sequential**: evaluators run in canonical order. With stage-gating on, a
//!   source-reliability score below the threshold ends the run after that single
//!   dimension.
//!
//! Stage-gating only ever looks at the first dimension, so the canonical order
//! (reliability, completeness, consistency, specificity) is load-bearing.

pub mod cancel;
pub mod runner;
pub mod types;


pub use cancel::CancellationToken;
pub use runner::Orchestrator;
pub use types::{OrchestrationOutcome, OrchestrationState, StageGate, Strategy};
