//! Questionnaire definition, scoring engine, and report export for
//! investor-readiness evaluations.
//!
//! A collaborator collects an [`AnswerSheet`]; the [`Evaluator`] folds it
//! over the [`Questionnaire`] once, producing per-section scores, a weighted
//! final score, a [`Readiness`] verdict and a [`Report`] that can be
//! exported as CSV.

mod blueprint;
pub mod domain;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use blueprint::Questionnaire;
pub use domain::{AnswerSheet, Branch, Category, Question, QuestionKind};
pub use report::{export_csv, DetailRow, ExportError, ExportOptions, Report};
pub use router::evaluation_router;
pub use scoring::{
    classify, score_option, section_score, weighted_total, CategoryWeights, OptionScores,
    Readiness, ScoringConfig, ScoringConfigError, SectionScores,
};
pub use service::{EvaluationRequest, EvaluationService, EvaluationServiceError, ExportedReport};
pub use session::{Evaluation, EvaluationError, EvaluationTally, Evaluator};
pub use views::{EvaluationView, QuestionnaireView};
