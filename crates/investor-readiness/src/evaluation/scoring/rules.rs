use super::super::domain::{Question, QuestionKind};
use super::config::{standard_option_scores, OptionScores, ScoringConfig, MAX_OPTION_SCORE};

/// Score a single answer label. Uses `table` when it is present and
/// non-empty, otherwise the built-in default table. Unknown labels score 0.
pub fn score_option(label: &str, table: Option<&OptionScores>) -> u8 {
    table
        .filter(|table| !table.is_empty())
        .unwrap_or_else(|| standard_option_scores())
        .get(label)
        .unwrap_or(0)
}

/// Select questions only distinguish the sentinel from everything else.
pub fn score_select(label: &str, sentinel: &str) -> u8 {
    if label == sentinel {
        0
    } else {
        MAX_OPTION_SCORE
    }
}

impl ScoringConfig {
    /// Score an answer to `question`, preferring the question's own table
    /// over the configured default.
    pub fn score_answer(&self, question: &Question, answer: &str) -> u8 {
        match question.kind {
            QuestionKind::SingleChoice => {
                let table = question
                    .scores
                    .as_ref()
                    .filter(|table| !table.is_empty())
                    .unwrap_or(&self.option_scores);
                score_option(answer, Some(table))
            }
            QuestionKind::Select => score_select(answer, &self.select_sentinel),
        }
    }
}
