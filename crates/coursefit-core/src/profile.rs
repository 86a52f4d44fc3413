//! Scoring profile: the declarative tables the engine reads.
//!
//! A profile is co-versioned with a question bank. Question ranges are
//! positional (`Q1` is the first question in the bank), so inserting or
//! reordering questions in the bank requires a matching profile change.
//! `bank::validate_bank` checks that the two still agree.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;
use crate::model::{Course, Level, OptionCode};

/// Build the canonical id for the question at a 1-based bank position.
pub fn question_id(position: u32) -> String {
    format!("Q{position}")
}

/// An inclusive range of 1-based question positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRange {
    pub first: u32,
    pub last: u32,
}

impl QuestionRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn positions(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Question ids covered by this range, in order.
    pub fn ids(&self) -> impl Iterator<Item = String> {
        self.positions().map(question_id)
    }

    pub fn contains(&self, position: u32) -> bool {
        self.positions().contains(&position)
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where one preference answer lands on the 2x2 course/level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub course: Course,
    pub level: Level,
}

/// A fixed-answer pass whose correct answers add a bonus to Higher Level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationPass {
    /// Short name used in logs and listings.
    pub name: &'static str,
    pub range: QuestionRange,
    /// Correct code per question id. Questions missing from the key never score.
    pub key: BTreeMap<String, OptionCode>,
    pub bonus: u32,
}

impl CalibrationPass {
    /// The bonus earned by `code` for `question_id` (0 unless it matches the key).
    pub fn bonus_for(&self, question_id: &str, code: Option<OptionCode>) -> u32 {
        match (self.key.get(question_id), code) {
            (Some(expected), Some(given)) if *expected == given => self.bonus,
            _ => 0,
        }
    }
}

/// Confidence tiers that select the advice wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// At or above: strong affirmation.
    #[serde(default = "default_strong")]
    pub strong: u32,
    /// At or above (and below `strong`): moderate affirmation.
    #[serde(default = "default_moderate")]
    pub moderate: u32,
    /// Below: the recommendation is withheld as inconclusive.
    #[serde(default = "default_inconclusive")]
    pub inconclusive: u32,
}

fn default_strong() -> u32 {
    80
}

fn default_moderate() -> u32 {
    60
}

fn default_inconclusive() -> u32 {
    40
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            strong: default_strong(),
            moderate: default_moderate(),
            inconclusive: default_inconclusive(),
        }
    }
}

impl ConfidenceThresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("strong", self.strong),
            ("moderate", self.moderate),
            ("inconclusive", self.inconclusive),
        ] {
            if value > 100 {
                return Err(ThresholdError::OutOfRange { name, value });
            }
        }
        if !(self.inconclusive <= self.moderate && self.moderate <= self.strong) {
            return Err(ThresholdError::Unordered {
                inconclusive: self.inconclusive,
                moderate: self.moderate,
                strong: self.strong,
            });
        }
        Ok(())
    }
}

/// Everything the engine needs to turn answers into scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringProfile {
    /// Career and preference questions.
    pub preference: QuestionRange,
    /// Grid position for each weighted code. Codes absent here are inert.
    pub contributions: BTreeMap<OptionCode, Contribution>,
    /// Points added to both axes per weighted preference answer.
    pub weight: u32,
    pub sample_problems: CalibrationPass,
    pub basic_skills: CalibrationPass,
    pub thresholds: ConfidenceThresholds,
}

impl ScoringProfile {
    /// The profile that matches the built-in IB Mathematics question bank.
    pub fn ib_math() -> Self {
        let contributions = BTreeMap::from([
            (
                OptionCode::A,
                Contribution {
                    course: Course::AnalysisApproaches,
                    level: Level::Higher,
                },
            ),
            (
                OptionCode::B,
                Contribution {
                    course: Course::AnalysisApproaches,
                    level: Level::Standard,
                },
            ),
            (
                OptionCode::C,
                Contribution {
                    course: Course::ApplicationsInterpretation,
                    level: Level::Higher,
                },
            ),
            (
                OptionCode::D,
                Contribution {
                    course: Course::ApplicationsInterpretation,
                    level: Level::Standard,
                },
            ),
        ]);

        Self {
            preference: QuestionRange::new(1, 30),
            contributions,
            weight: 2,
            sample_problems: CalibrationPass {
                name: "sample",
                range: QuestionRange::new(31, 34),
                key: answer_key(&[
                    ("Q31", OptionCode::A),
                    ("Q32", OptionCode::A),
                    ("Q33", OptionCode::A),
                    ("Q34", OptionCode::A),
                ]),
                bonus: 1,
            },
            basic_skills: CalibrationPass {
                name: "basic",
                range: QuestionRange::new(35, 36),
                key: answer_key(&[("Q35", OptionCode::B), ("Q36", OptionCode::B)]),
                bonus: 1,
            },
            thresholds: ConfidenceThresholds::default(),
        }
    }

    /// Replace the confidence tiers, rejecting inconsistent values.
    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Result<Self, ThresholdError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }

    /// Both calibration passes, in scoring order.
    pub fn calibration_passes(&self) -> [&CalibrationPass; 2] {
        [&self.sample_problems, &self.basic_skills]
    }

    /// Last bank position any pass reads.
    pub fn last_position(&self) -> u32 {
        self.preference
            .last
            .max(self.sample_problems.range.last)
            .max(self.basic_skills.range.last)
    }

    /// Largest Higher Level total the calibration passes can add.
    pub fn max_calibration_bonus(&self) -> u32 {
        self.calibration_passes()
            .iter()
            .map(|pass| pass.bonus * pass.key.len() as u32)
            .sum()
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::ib_math()
    }
}

fn answer_key(entries: &[(&str, OptionCode)]) -> BTreeMap<String, OptionCode> {
    entries
        .iter()
        .map(|(id, code)| ((*id).to_string(), *code))
        .collect()
}

/// The built-in profile, constructed once per process.
pub fn default_profile() -> &'static ScoringProfile {
    static PROFILE: OnceLock<ScoringProfile> = OnceLock::new();
    PROFILE.get_or_init(ScoringProfile::ib_math)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_cover_thirty_six_disjoint_questions() {
        let profile = ScoringProfile::ib_math();
        assert_eq!(profile.preference.len(), 30);
        assert_eq!(profile.sample_problems.range.len(), 4);
        assert_eq!(profile.basic_skills.range.len(), 2);
        assert_eq!(profile.last_position(), 36);

        for position in 1..=36 {
            let hits = [
                profile.preference.contains(position),
                profile.sample_problems.range.contains(position),
                profile.basic_skills.range.contains(position),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "position {position} should be in exactly one pass");
        }
    }

    #[test]
    fn range_ids_are_positional() {
        let ids: Vec<String> = QuestionRange::new(35, 36).ids().collect();
        assert_eq!(ids, vec!["Q35", "Q36"]);
        assert!(QuestionRange::new(5, 4).is_empty());
    }

    #[test]
    fn skip_codes_have_no_contribution() {
        let profile = ScoringProfile::ib_math();
        assert!(!profile.contributions.contains_key(&OptionCode::E));
        assert!(!profile.contributions.contains_key(&OptionCode::F));
        assert_eq!(profile.contributions.len(), 4);
    }

    #[test]
    fn calibration_bonus_only_for_exact_match() {
        let pass = &ScoringProfile::ib_math().sample_problems;
        assert_eq!(pass.bonus_for("Q31", Some(OptionCode::A)), 1);
        assert_eq!(pass.bonus_for("Q31", Some(OptionCode::B)), 0);
        assert_eq!(pass.bonus_for("Q31", None), 0);
        assert_eq!(pass.bonus_for("Q99", Some(OptionCode::A)), 0);
    }

    #[test]
    fn max_calibration_bonus_is_six() {
        assert_eq!(ScoringProfile::ib_math().max_calibration_bonus(), 6);
    }

    #[test]
    fn default_thresholds_validate() {
        assert_eq!(ConfidenceThresholds::default().validate(), Ok(()));
    }

    #[test]
    fn thresholds_reject_bad_order_and_range() {
        let unordered = ConfidenceThresholds {
            strong: 50,
            moderate: 60,
            inconclusive: 40,
        };
        assert!(matches!(
            unordered.validate(),
            Err(ThresholdError::Unordered { .. })
        ));

        let too_high = ConfidenceThresholds {
            strong: 120,
            ..ConfidenceThresholds::default()
        };
        assert_eq!(
            too_high.validate(),
            Err(ThresholdError::OutOfRange {
                name: "strong",
                value: 120
            })
        );
    }

    #[test]
    fn thresholds_deserialize_with_defaults() {
        let parsed: ConfidenceThresholds = toml::from_str("inconclusive = 30").unwrap();
        assert_eq!(parsed.inconclusive, 30);
        assert_eq!(parsed.moderate, 60);
        assert_eq!(parsed.strong, 80);
    }

    #[test]
    fn default_profile_is_shared() {
        let a = default_profile() as *const ScoringProfile;
        let b = default_profile() as *const ScoringProfile;
        assert_eq!(a, b);
        assert_eq!(*default_profile(), ScoringProfile::ib_math());
    }
}
