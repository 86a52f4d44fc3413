//! coursefit-core: scoring engine, question bank, and recommendation model.
//!
//! This crate turns a learner's questionnaire answers into an IB Mathematics
//! course and level recommendation. The engine is a pure function of the
//! answers; loading banks and answer files lives alongside it.

pub mod answers;
pub mod bank;
pub mod engine;
pub mod error;
pub mod model;
pub mod profile;
pub mod rationale;
pub mod recommendation;

pub use engine::{compute_recommendation, ScoreCard, ScoringEngine};
pub use model::{AnswerSet, Course, Decision, Level, OptionCode};
pub use recommendation::{ConfidenceBreakdown, Recommendation};
