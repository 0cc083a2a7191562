//! Deterministic deal metrics and grading engine for rental property
//! underwriting.
//!
//! Every computation is a pure, synchronous function over value types:
//! no I/O, no shared state, nothing cached. Callers that cannot supply a
//! complete financing picture get `None` back ("add more inputs"), never
//! an error or a panic; numeric edge cases are handled by guards and
//! clamps inside each module.

pub mod amortization;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod expenses;
pub mod grading;
pub mod max_offer;
pub mod metrics;
pub mod pillars;
pub mod rent_roll;
pub mod telemetry;

pub use domain::{
    DealInputs, DealMetrics, ExpenseAccounting, Grade, MortgageBreakdown, Pillar,
    PillarEvaluation, PillarResult, PillarStatus, RentRollUnit,
};
pub use evaluator::{DealEvaluation, DealEvaluator, DEFAULT_TARGET_DCR};
pub use grading::{GradeOutcome, GradeProfile, ScoreComponent, ScoredMetric};
