//! Raw onboarding answers.
//!
//! The onboarding flow stores answers as question-key to answer-key strings.
//! [`AnswerSource`] is the seam the recommender reads them through; callers
//! can pass a plain map or an [`AnswerSet`] loaded from a file.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::factors::normalize_key;

/// Question keys used by the onboarding survey.
pub mod question {
    pub const SLEEP_EXPERIENCE: &str = "sleepExperience";
    pub const AGE_RANGE: &str = "ageRange";
    pub const WORK_SCHEDULE: &str = "workSchedule";
    pub const NAP_ENVIRONMENT: &str = "napEnvironment";
    pub const LIFESTYLE: &str = "lifestyle";
    pub const KNOWLEDGE_LEVEL: &str = "knowledgeLevel";
    pub const HEALTH_STATUS: &str = "healthStatus";
    pub const MOTIVATION_LEVEL: &str = "motivationLevel";
    pub const SLEEP_GOAL: &str = "sleepGoal";
    pub const SOCIAL_OBLIGATIONS: &str = "socialObligations";
    pub const DISRUPTION_TOLERANCE: &str = "disruptionTolerance";
    pub const CHRONOTYPE: &str = "chronotype";

    /// All question keys in survey order.
    pub const ALL: [&str; 12] = [
        SLEEP_EXPERIENCE,
        AGE_RANGE,
        WORK_SCHEDULE,
        NAP_ENVIRONMENT,
        LIFESTYLE,
        KNOWLEDGE_LEVEL,
        HEALTH_STATUS,
        MOTIVATION_LEVEL,
        SLEEP_GOAL,
        SOCIAL_OBLIGATIONS,
        DISRUPTION_TOLERANCE,
        CHRONOTYPE,
    ];
}

/// Supplies raw answers by question key.
pub trait AnswerSource {
    /// Raw answer for `question`, if the user gave one.
    fn answer(&self, question: &str) -> Option<&str>;
}

impl AnswerSource for HashMap<String, String> {
    fn answer(&self, question: &str) -> Option<&str> {
        self.get(question).map(String::as_str)
    }
}

impl AnswerSource for BTreeMap<String, String> {
    fn answer(&self, question: &str) -> Option<&str> {
        self.get(question).map(String::as_str)
    }
}

/// Ordered answer store with normalized question keys.
///
/// `sleep_experience`, `sleep-experience` and `sleepExperience` all address
/// the same question. Later inserts replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from question/answer pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (question, answer) in pairs {
            set.insert(question.as_ref(), answer);
        }
        set
    }

    /// Record an answer, replacing any previous one for the same question.
    pub fn insert(&mut self, question: &str, answer: impl Into<String>) {
        self.answers.insert(normalize_key(question), answer.into());
    }

    /// Parse a `question=answer` pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Answers`] when there is no `=` or the question is
    /// empty. The answer itself may be anything; unknown answers default
    /// later during decoding.
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        let (question, answer) = pair
            .split_once('=')
            .ok_or_else(|| CoreError::Answers(format!("expected question=answer, got '{pair}'")))?;
        let question = question.trim();
        if question.is_empty() {
            return Err(CoreError::Answers(format!("missing question in '{pair}'")));
        }
        Ok((question.to_string(), answer.trim().to_string()))
    }

    /// Load a flat JSON object of string answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a JSON object or any value is
    /// not a string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::Answers("answers must be a JSON object".into()))?;

        let mut set = Self::new();
        for (question, answer) in object {
            let answer = answer.as_str().ok_or_else(|| {
                CoreError::Answers(format!("answer for '{question}' must be a string"))
            })?;
            set.insert(question, answer);
        }
        Ok(set)
    }

    /// Load a flat TOML table of string answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or any value is
    /// not a string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut set = Self::new();
        for (question, answer) in &table {
            let answer = answer.as_str().ok_or_else(|| {
                CoreError::Answers(format!("answer for '{question}' must be a string"))
            })?;
            set.insert(question, answer);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate over normalized question keys and raw answers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

impl AnswerSource for AnswerSet {
    fn answer(&self, question: &str) -> Option<&str> {
        self.answers.get(&normalize_key(question)).map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
