//! The engine's output.
//!
//! A recommendation has two shapes. `Confident` names a course and level
//! with full rationale. `Inconclusive` withholds both labels and carries
//! only advice. Renderers match on the variant, or use the accessors which
//! report the withheld axes as [`Decision::Undecided`].

use serde::{Deserialize, Serialize};

use crate::model::{Course, Decision, Level};
use crate::rationale::Rationale;

/// Per-axis confidence, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// AA vs AI.
    pub course: u32,
    /// HL vs SL.
    pub level: u32,
}

/// A scored recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    Confident {
        course: Course,
        level: Level,
        confidence: u32,
        breakdown: ConfidenceBreakdown,
        rationale: Rationale,
    },
    Inconclusive {
        confidence: u32,
        breakdown: ConfidenceBreakdown,
        advice: String,
    },
}

impl Recommendation {
    pub fn course(&self) -> Decision<Course> {
        match self {
            Recommendation::Confident { course, .. } => Decision::Decided(*course),
            Recommendation::Inconclusive { .. } => Decision::Undecided,
        }
    }

    pub fn level(&self) -> Decision<Level> {
        match self {
            Recommendation::Confident { level, .. } => Decision::Decided(*level),
            Recommendation::Inconclusive { .. } => Decision::Undecided,
        }
    }

    /// Overall confidence in `[0, 100]`.
    pub fn confidence(&self) -> u32 {
        match self {
            Recommendation::Confident { confidence, .. }
            | Recommendation::Inconclusive { confidence, .. } => *confidence,
        }
    }

    pub fn breakdown(&self) -> ConfidenceBreakdown {
        match self {
            Recommendation::Confident { breakdown, .. }
            | Recommendation::Inconclusive { breakdown, .. } => *breakdown,
        }
    }

    /// The rationale, with empty focus and style when inconclusive.
    pub fn rationale(&self) -> Rationale {
        match self {
            Recommendation::Confident { rationale, .. } => rationale.clone(),
            Recommendation::Inconclusive { advice, .. } => Rationale {
                focus: String::new(),
                style: String::new(),
                advice: advice.clone(),
            },
        }
    }

    pub fn advice(&self) -> &str {
        match self {
            Recommendation::Confident { rationale, .. } => &rationale.advice,
            Recommendation::Inconclusive { advice, .. } => advice,
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Recommendation::Inconclusive { .. })
    }

    /// Short label such as `AA HL` or `Undecided`.
    pub fn label(&self) -> String {
        match self {
            Recommendation::Confident { course, level, .. } => format!("{course} {level}"),
            Recommendation::Inconclusive { .. } => "Undecided".to_string(),
        }
    }
}
