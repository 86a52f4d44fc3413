//! Explanatory text for a recommendation.
//!
//! Prose is looked up from a static table keyed by the `(Course, Level)`
//! pair; advice is assembled from the confidence tier. Nothing here reads
//! the raw answers.

use serde::{Deserialize, Serialize};

use crate::model::{Course, Level};
use crate::profile::ConfidenceThresholds;
use crate::recommendation::ConfidenceBreakdown;

/// Focus, style, and advice text shown alongside a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    /// What the recommended course concentrates on.
    pub focus: String,
    /// How the learner's answers match the course's way of working.
    pub style: String,
    /// What to do next, worded by confidence tier.
    pub advice: String,
}

struct TrackProse {
    course: Course,
    level: Level,
    focus: &'static str,
    style: &'static str,
}

static TRACKS: [TrackProse; 4] = [
    TrackProse {
        course: Course::AnalysisApproaches,
        level: Level::Higher,
        focus: "Pure mathematics in depth: proof, abstraction, and rigorous algebra and calculus. \
                Suited to future engineers, physicists, and mathematicians who need a strong theoretical base.",
        style: "You are comfortable with sustained, abstract problem solving and want to understand \
                why methods work, not only how to apply them.",
    },
    TrackProse {
        course: Course::AnalysisApproaches,
        level: Level::Standard,
        focus: "Conceptual mathematics at a moderate depth. Covers the same ideas as AA HL with \
                a lighter workload and fewer demanding proofs.",
        style: "You enjoy understanding concepts but prefer a steady pace. AA SL builds a solid \
                theoretical foundation without overwhelming abstraction.",
    },
    TrackProse {
        course: Course::ApplicationsInterpretation,
        level: Level::Higher,
        focus: "Modelling, statistics, and technology at a demanding level. Suited to future \
                economists, data analysts, and social scientists who need robust applied mathematics.",
        style: "You are drawn to real data and practical models and want to take them further \
                than a general course would.",
    },
    TrackProse {
        course: Course::ApplicationsInterpretation,
        level: Level::Standard,
        focus: "Practical mathematics with a lighter load, built around modelling, statistics, \
                and technology rather than abstraction.",
        style: "You like mathematics that is concrete and relevant. AI SL gives you useful \
                numeracy while leaving room for your other subjects.",
    },
];

fn track(course: Course, level: Level) -> &'static TrackProse {
    let index = match (course, level) {
        (Course::AnalysisApproaches, Level::Higher) => 0,
        (Course::AnalysisApproaches, Level::Standard) => 1,
        (Course::ApplicationsInterpretation, Level::Higher) => 2,
        (Course::ApplicationsInterpretation, Level::Standard) => 3,
    };
    let prose = &TRACKS[index];
    debug_assert!(prose.course == course && prose.level == level);
    prose
}

/// Course focus text for a `(course, level)` pair.
pub fn focus(course: Course, level: Level) -> &'static str {
    track(course, level).focus
}

/// Learning-style text for a `(course, level)` pair.
pub fn style(course: Course, level: Level) -> &'static str {
    track(course, level).style
}

/// Advice for a decided recommendation, worded by confidence tier.
///
/// In the moderate tier the axis with the higher sub-confidence is named as
/// the clearer preference; an exact tie names the level axis.
pub fn advice(
    course: Course,
    level: Level,
    confidence: u32,
    breakdown: &ConfidenceBreakdown,
    thresholds: &ConfidenceThresholds,
) -> String {
    if confidence >= thresholds.strong {
        format!(
            "Your responses strongly indicate that {course} {level} is an excellent match \
             (confidence: {confidence}%). Your interests line up well with this track. \
             If you have specific university goals, confirm the choice with a mathematics teacher or advisor."
        )
    } else if confidence >= thresholds.moderate {
        let follow_up = if breakdown.course > breakdown.level {
            format!(
                "Your preference for {course} is clearer than your preference for {level}. \
                 Double-check whether HL or SL best fits your schedule and comfort."
            )
        } else {
            format!(
                "Your preference for {level} is clearer than your preference for {course}. \
                 Check whether AA or AI really matches your career goals."
            )
        };
        format!(
            "You lean towards {course} {level} with moderate confidence (~{confidence}%). \
             It is worth discussing with a teacher to make sure it fits your overall plan. {follow_up}"
        )
    } else {
        format!(
            "Your profile suggests a less decisive preference (confidence: {confidence}%). \
             Take time to reflect, and talk it over with a counselor or teacher. Weigh your comfort \
             with abstract versus applied mathematics, your available study time, and any university \
             requirements. Try sample material for both AA and AI, at HL and SL, before finalizing your choice."
        )
    }
}

/// Advice for a withheld recommendation.
pub fn inconclusive_advice(confidence: u32) -> String {
    format!(
        "Your answers do not point clearly to any one course or level (confidence: {confidence}%), \
         so no recommendation is made. Answer any questions you skipped, then talk with a mathematics \
         teacher about whether AA or AI, at HL or SL, suits your goals."
    )
}

/// Full rationale for a decided recommendation.
pub fn build(
    course: Course,
    level: Level,
    confidence: u32,
    breakdown: &ConfidenceBreakdown,
    thresholds: &ConfidenceThresholds,
) -> Rationale {
    Rationale {
        focus: focus(course, level).to_string(),
        style: style(course, level).to_string(),
        advice: advice(course, level, confidence, breakdown, thresholds),
    }
}
