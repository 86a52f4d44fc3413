//! Core data model types for coursefit.
//!
//! These are the value types shared by the scoring engine, the question
//! bank, and the CLI: option codes, answer sets, and the two decision axes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A selectable answer code.
///
/// The bank only ever offers `A` through `F`. Which codes carry weight is a
/// property of the scoring profile, not of the code itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionCode {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl OptionCode {
    /// Every code in alphabet order.
    pub const ALL: [OptionCode; 6] = [
        OptionCode::A,
        OptionCode::B,
        OptionCode::C,
        OptionCode::D,
        OptionCode::E,
        OptionCode::F,
    ];

    pub fn as_char(self) -> char {
        match self {
            OptionCode::A => 'A',
            OptionCode::B => 'B',
            OptionCode::C => 'C',
            OptionCode::D => 'D',
            OptionCode::E => 'E',
            OptionCode::F => 'F',
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionCode::A),
            "B" => Ok(OptionCode::B),
            "C" => Ok(OptionCode::C),
            "D" => Ok(OptionCode::D),
            "E" => Ok(OptionCode::E),
            "F" => Ok(OptionCode::F),
            other => Err(format!("unknown option code: {other:?}")),
        }
    }
}

/// A learner's answers, keyed by question id.
///
/// Codes are stored exactly as submitted. Unknown question ids and codes
/// outside the alphabet are kept so they can be reported, but the engine
/// treats them the same as a missing answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier answer to the same question.
    pub fn insert(&mut self, question_id: impl Into<String>, code: impl Into<String>) {
        self.0.insert(question_id.into(), code.into());
    }

    /// Builder-style [`AnswerSet::insert`].
    pub fn with(mut self, question_id: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(question_id, code);
        self
    }

    pub fn remove(&mut self, question_id: &str) -> Option<String> {
        self.0.remove(question_id)
    }

    /// The raw code submitted for a question.
    pub fn raw(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    /// The parsed code for a question; `None` when missing or unrecognized.
    pub fn code(&self, question_id: &str) -> Option<OptionCode> {
        self.raw(question_id).and_then(|raw| raw.parse().ok())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`; answers in `other` win.
    pub fn extend(&mut self, other: AnswerSet) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The course axis of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    /// Analysis & Approaches: theory, proof, abstraction.
    #[serde(rename = "AA")]
    AnalysisApproaches,
    /// Applications & Interpretation: modelling, statistics, technology.
    #[serde(rename = "AI")]
    ApplicationsInterpretation,
}

impl Course {
    pub fn code(self) -> &'static str {
        match self {
            Course::AnalysisApproaches => "AA",
            Course::ApplicationsInterpretation => "AI",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Course::AnalysisApproaches => "Analysis & Approaches",
            Course::ApplicationsInterpretation => "Applications & Interpretation",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Course::AnalysisApproaches => Course::ApplicationsInterpretation,
            Course::ApplicationsInterpretation => Course::AnalysisApproaches,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AA" => Ok(Course::AnalysisApproaches),
            "AI" => Ok(Course::ApplicationsInterpretation),
            other => Err(format!("unknown course: {other}")),
        }
    }
}

/// The level axis of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "HL")]
    Higher,
    #[serde(rename = "SL")]
    Standard,
}

impl Level {
    pub fn code(self) -> &'static str {
        match self {
            Level::Higher => "HL",
            Level::Standard => "SL",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Level::Higher => "Higher Level",
            Level::Standard => "Standard Level",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Level::Higher => Level::Standard,
            Level::Standard => Level::Higher,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HL" => Ok(Level::Higher),
            "SL" => Ok(Level::Standard),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// An axis outcome: either a decided label or the undecided sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision<T> {
    Decided(T),
    Undecided,
}

impl<T> Decision<T> {
    pub fn is_undecided(&self) -> bool {
        matches!(self, Decision::Undecided)
    }

    pub fn decided(self) -> Option<T> {
        match self {
            Decision::Decided(value) => Some(value),
            Decision::Undecided => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Decision<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Decided(value) => value.fmt(f),
            Decision::Undecided => f.write_str("Undecided"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_code_display_and_parse() {
        for code in OptionCode::ALL {
            assert_eq!(code.to_string().parse::<OptionCode>().unwrap(), code);
        }
        assert!("a".parse::<OptionCode>().is_err());
        assert!("G".parse::<OptionCode>().is_err());
        assert!("".parse::<OptionCode>().is_err());
        assert!("AB".parse::<OptionCode>().is_err());
    }

    #[test]
    fn answer_set_keeps_unknown_codes_but_does_not_parse_them() {
        let answers = AnswerSet::new().with("Q1", "A").with("Q2", "Z");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.code("Q1"), Some(OptionCode::A));
        assert_eq!(answers.raw("Q2"), Some("Z"));
        assert_eq!(answers.code("Q2"), None);
        assert_eq!(answers.code("Q3"), None);
    }

    #[test]
    fn answer_set_later_insert_wins() {
        let mut answers: AnswerSet = [("Q1", "A")].into_iter().collect();
        answers.extend([("Q1", "D")].into_iter().collect());
        assert_eq!(answers.code("Q1"), Some(OptionCode::D));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn answer_set_serializes_as_plain_map() {
        let answers = AnswerSet::new().with("Q2", "B").with("Q1", "A");
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"Q1":"A","Q2":"B"}"#);
        let back: AnswerSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }

    #[test]
    fn course_and_level_labels() {
        assert_eq!(Course::AnalysisApproaches.to_string(), "AA");
        assert_eq!("ai".parse::<Course>().unwrap(), Course::ApplicationsInterpretation);
        assert_eq!(Level::Standard.to_string(), "SL");
        assert_eq!("hl".parse::<Level>().unwrap(), Level::Higher);
        assert!("XL".parse::<Level>().is_err());
        assert_eq!(Course::AnalysisApproaches.opposite(), Course::ApplicationsInterpretation);
        assert_eq!(Level::Higher.opposite(), Level::Standard);
    }

    #[test]
    fn decision_display() {
        assert_eq!(Decision::Decided(Course::AnalysisApproaches).to_string(), "AA");
        assert_eq!(Decision::<Level>::Undecided.to_string(), "Undecided");
        assert!(Decision::<Level>::Undecided.is_undecided());
        assert_eq!(Decision::Decided(Level::Higher).decided(), Some(Level::Higher));
    }
}
