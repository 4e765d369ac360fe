use super::scoring::OptionScores;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const YES_GOOD_COMPLETE: &str = "Yes / Good / Complete";
pub const PARTIALLY_IN_PROGRESS: &str = "Partially / In progress";
pub const NO_MISSING_NOT_COMPLIANT: &str = "No / Missing / Not Compliant";

/// Label that scores zero on select questions.
pub const SELECT_NONE: &str = "None";

/// How a question is presented and which scoring rule applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One of a small set of graded answers, scored through an option table.
    SingleChoice,
    /// Pick-one list scored by the sentinel rule.
    Select,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "Single choice",
            Self::Select => "Select",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<&'static str>,
    pub branches: Vec<Branch>,
    pub scores: Option<OptionScores>,
}

impl Question {
    pub fn single_choice(key: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        Self::new(key, label, QuestionKind::SingleChoice, options)
    }

    pub fn select(key: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        Self::new(key, label, QuestionKind::Select, options)
    }

    fn new(
        key: &'static str,
        label: &'static str,
        kind: QuestionKind,
        options: &[&'static str],
    ) -> Self {
        Self {
            key,
            label,
            kind,
            options: options.to_vec(),
            branches: Vec::new(),
            scores: None,
        }
    }

    /// Attach follow-up questions shown only when `trigger` is the chosen answer.
    pub fn with_branch(mut self, trigger: &'static str, questions: Vec<Question>) -> Self {
        self.branches.push(Branch { trigger, questions });
        self
    }

    /// Score this question against its own table instead of the configured default.
    pub fn with_scores(mut self, scores: OptionScores) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn allows(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| *candidate == option)
    }

    /// Follow-up questions for an answer. Matching is exact.
    pub fn follow_ups(&self, answer: &str) -> &[Question] {
        self.branches
            .iter()
            .find(|branch| branch.trigger == answer)
            .map(|branch| branch.questions.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct Branch {
    pub trigger: &'static str,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub weight: f64,
    pub questions: Vec<Question>,
}

/// Answers collected for one evaluation, grouped by category then question key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: BTreeMap<String, BTreeMap<String, String>>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        category: impl Into<String>,
        question_key: impl Into<String>,
        option: impl Into<String>,
    ) -> &mut Self {
        self.answers
            .entry(category.into())
            .or_default()
            .insert(question_key.into(), option.into());
        self
    }

    pub fn with_answer(
        mut self,
        category: impl Into<String>,
        question_key: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        self.record(category, question_key, option);
        self
    }

    pub fn answer(&self, category: &str, question_key: &str) -> Option<&str> {
        self.answers
            .get(category)
            .and_then(|answers| answers.get(question_key))
            .map(String::as_str)
    }

    /// Every recorded answer as `(category, question_key, option)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.answers.iter().flat_map(|(category, answers)| {
            answers
                .iter()
                .map(move |(key, option)| (category.as_str(), key.as_str(), option.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.answers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
