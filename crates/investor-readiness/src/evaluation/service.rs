use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use super::blueprint::Questionnaire;
use super::domain::AnswerSheet;
use super::report::{content_type, export_csv, ExportError, ExportOptions};
use super::scoring::ScoringConfig;
use super::session::{Evaluation, EvaluationError, Evaluator};
use super::views::{EvaluationView, QuestionnaireView};

/// Payload supplied by a collaborator that has collected answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationRequest {
    pub company_name: String,
    #[serde(default)]
    pub answers: AnswerSheet,
    /// Treat unanswered questions as if their first option was selected.
    #[serde(default)]
    pub fill_defaults: bool,
}

/// CSV artifact ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

/// Shares the immutable questionnaire and scoring tables across sessions.
pub struct EvaluationService {
    questionnaire: Arc<Questionnaire>,
    config: Arc<ScoringConfig>,
    export: ExportOptions,
}

impl EvaluationService {
    pub fn new(
        questionnaire: Arc<Questionnaire>,
        config: Arc<ScoringConfig>,
        export: ExportOptions,
    ) -> Self {
        Self {
            questionnaire,
            config,
            export,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Arc::new(Questionnaire::standard()),
            Arc::new(ScoringConfig::standard()),
            ExportOptions::default(),
        )
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn questionnaire_view(&self) -> QuestionnaireView {
        QuestionnaireView::new(&self.questionnaire, &self.config.category_weights)
    }

    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation, EvaluationError> {
        self.evaluate_at(request, Local::now().naive_local())
    }

    pub fn evaluate_at(
        &self,
        request: &EvaluationRequest,
        evaluated_on: NaiveDateTime,
    ) -> Result<Evaluation, EvaluationError> {
        self.questionnaire.check_answers(&request.answers)?;

        let evaluator = Evaluator::new(&self.questionnaire, &self.config);
        if request.fill_defaults {
            let answers = self.questionnaire.fill_defaults(request.answers.clone());
            evaluator.evaluate(&request.company_name, &answers, evaluated_on)
        } else {
            evaluator.evaluate(&request.company_name, &request.answers, evaluated_on)
        }
    }

    pub fn view(&self, evaluation: &Evaluation) -> EvaluationView {
        EvaluationView::new(evaluation, &self.config.category_weights)
    }

    pub fn export(&self, evaluation: &Evaluation) -> Result<ExportedReport, ExportError> {
        let report = &evaluation.report;
        Ok(ExportedReport {
            file_name: report.file_name(),
            content_type: content_type(),
            bytes: export_csv(report, &self.export)?,
        })
    }

    /// Evaluate and serialize in one step, for callers that only want the file.
    pub fn export_request(
        &self,
        request: &EvaluationRequest,
    ) -> Result<ExportedReport, EvaluationServiceError> {
        let evaluation = self.evaluate(request)?;
        Ok(self.export(&evaluation)?)
    }
}

/// Error raised while serving an evaluation request.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
