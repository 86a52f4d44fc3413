//! Scoring engine.
//!
//! Turns an [`AnswerSet`] into a [`Recommendation`] in three passes over
//! fixed question ranges, then decides each axis independently. The engine
//! is pure: no I/O, no shared mutable state, and the same answers always
//! produce the same recommendation.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSet, Course, Level};
use crate::profile::{default_profile, ScoringProfile};
use crate::rationale;
use crate::recommendation::{ConfidenceBreakdown, Recommendation};

/// The four axis accumulators built from one answer set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Analysis & Approaches.
    pub aa: u32,
    /// Applications & Interpretation.
    pub ai: u32,
    /// Higher Level.
    pub hl: u32,
    /// Standard Level.
    pub sl: u32,
}

impl ScoreCard {
    /// Winning course. Ties go to AA.
    pub fn course(&self) -> Course {
        if self.aa >= self.ai {
            Course::AnalysisApproaches
        } else {
            Course::ApplicationsInterpretation
        }
    }

    /// Winning level. Ties go to HL.
    pub fn level(&self) -> Level {
        if self.hl >= self.sl {
            Level::Higher
        } else {
            Level::Standard
        }
    }

    pub fn breakdown(&self) -> ConfidenceBreakdown {
        ConfidenceBreakdown {
            course: axis_confidence(self.aa, self.ai),
            level: axis_confidence(self.hl, self.sl),
        }
    }

    /// Overall confidence: the rounded mean of the two axis confidences.
    pub fn confidence(&self) -> u32 {
        let breakdown = self.breakdown();
        combined_confidence(breakdown.course, breakdown.level)
    }

    /// `true` when no answer contributed anything.
    pub fn is_blank(&self) -> bool {
        *self == ScoreCard::default()
    }

    fn add_course(&mut self, course: Course, points: u32) {
        match course {
            Course::AnalysisApproaches => self.aa += points,
            Course::ApplicationsInterpretation => self.ai += points,
        }
    }

    fn add_level(&mut self, level: Level, points: u32) {
        match level {
            Level::Higher => self.hl += points,
            Level::Standard => self.sl += points,
        }
    }
}

/// Confidence in one axis given its two totals, in `[0, 100]`.
///
/// With no signal at all the axis is a coin flip and scores 50. Otherwise
/// it is `100 * |a - b| / (a + b)` rounded half up, in integer arithmetic.
pub fn axis_confidence(a: u32, b: u32) -> u32 {
    let total = u64::from(a) + u64::from(b);
    if total == 0 {
        return 50;
    }
    let diff = u64::from(a.abs_diff(b));
    ((200 * diff + total) / (2 * total)) as u32
}

/// Mean of two axis confidences, rounded half up.
pub fn combined_confidence(course: u32, level: u32) -> u32 {
    (course + level + 1) / 2
}

/// A scoring engine bound to one profile.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'p> {
    profile: &'p ScoringProfile,
}

impl ScoringEngine<'static> {
    /// Engine over the built-in IB Mathematics profile.
    pub fn builtin() -> Self {
        Self::new(default_profile())
    }
}

impl Default for ScoringEngine<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'p> ScoringEngine<'p> {
    pub fn new(profile: &'p ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'p ScoringProfile {
        self.profile
    }

    /// Accumulate the four axis totals.
    ///
    /// Missing answers, unrecognized codes, and question ids outside every
    /// range contribute nothing.
    pub fn score(&self, answers: &AnswerSet) -> ScoreCard {
        let profile = self.profile;
        let mut card = ScoreCard::default();

        for id in profile.preference.ids() {
            let Some(code) = answers.code(&id) else {
                continue;
            };
            if let Some(contribution) = profile.contributions.get(&code) {
                card.add_course(contribution.course, profile.weight);
                card.add_level(contribution.level, profile.weight);
            }
        }
        tracing::debug!(
            aa = card.aa,
            ai = card.ai,
            hl = card.hl,
            sl = card.sl,
            "preference pass complete"
        );

        for pass in profile.calibration_passes() {
            let earned: u32 = pass
                .range
                .ids()
                .map(|id| pass.bonus_for(&id, answers.code(&id)))
                .sum();
            card.add_level(Level::Higher, earned);
            tracing::debug!(pass = pass.name, earned, "calibration pass complete");
        }

        card
    }

    /// Turn axis totals into a recommendation.
    pub fn decide(&self, card: &ScoreCard) -> Recommendation {
        let thresholds = &self.profile.thresholds;
        let breakdown = card.breakdown();
        let confidence = combined_confidence(breakdown.course, breakdown.level);

        if confidence < thresholds.inconclusive {
            tracing::debug!(confidence, "recommendation withheld");
            return Recommendation::Inconclusive {
                confidence,
                breakdown,
                advice: rationale::inconclusive_advice(confidence),
            };
        }

        let course = card.course();
        let level = card.level();
        tracing::debug!(%course, %level, confidence, "recommendation decided");
        Recommendation::Confident {
            course,
            level,
            confidence,
            breakdown,
            rationale: rationale::build(course, level, confidence, &breakdown, thresholds),
        }
    }

    /// Score and decide in one step.
    pub fn recommend(&self, answers: &AnswerSet) -> Recommendation {
        self.decide(&self.score(answers))
    }
}

/// Recommend using the built-in profile.
pub fn compute_recommendation(answers: &AnswerSet) -> Recommendation {
    ScoringEngine::builtin().recommend(answers)
}
