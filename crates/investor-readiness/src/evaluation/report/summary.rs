use super::super::scoring::Readiness;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const EVALUATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One answered question, top-level or follow-up, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub section: String,
    pub question: String,
    pub response: String,
    pub score: u8,
}

impl DetailRow {
    pub fn new(
        section: impl Into<String>,
        question: impl Into<String>,
        response: impl Into<String>,
        score: u8,
    ) -> Self {
        Self {
            section: section.into(),
            question: question.into(),
            response: response.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub company_name: String,
    pub evaluated_on: NaiveDateTime,
    pub final_score: f64,
    pub readiness: Readiness,
    pub details: Vec<DetailRow>,
}

impl Report {
    pub fn build(
        company_name: impl Into<String>,
        evaluated_on: NaiveDateTime,
        final_score: f64,
        readiness: Readiness,
        details: Vec<DetailRow>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            evaluated_on,
            final_score,
            readiness,
            details,
        }
    }

    pub fn evaluated_on_label(&self) -> String {
        self.evaluated_on.format(EVALUATED_ON_FORMAT).to_string()
    }

    /// Suggested download name, `{company}_evaluation.csv`. Characters that
    /// would break a path or a header value are replaced with `_`.
    pub fn file_name(&self) -> String {
        let company: String = self
            .company_name
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | '"' => '_',
                ch if ch.is_control() => '_',
                ch => ch,
            })
            .collect();
        format!("{company}_evaluation.csv")
    }

    pub fn rows_for_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a DetailRow> {
        self.details.iter().filter(move |row| row.section == section)
    }
}
