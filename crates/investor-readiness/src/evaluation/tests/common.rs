use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::evaluation::domain::{
    AnswerSheet, Category, Question, QuestionKind, NO_MISSING_NOT_COMPLIANT,
    PARTIALLY_IN_PROGRESS, YES_GOOD_COMPLETE,
};
use crate::evaluation::{EvaluationService, ExportOptions, Questionnaire, ScoringConfig};

pub(super) fn evaluated_on() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .and_then(|date| date.and_hms_opt(14, 30, 0))
        .expect("valid timestamp")
}

/// Two-category questionnaire with one branch, small enough to reason about by hand.
pub(super) fn compact_questionnaire() -> Questionnaire {
    Questionnaire::new(vec![
        Category {
            name: "Finance",
            weight: 0.6,
            questions: vec![
                Question::single_choice(
                    "books",
                    "Are books reconciled?",
                    &[YES_GOOD_COMPLETE, PARTIALLY_IN_PROGRESS, NO_MISSING_NOT_COMPLIANT],
                )
                .with_branch(
                    PARTIALLY_IN_PROGRESS,
                    vec![
                        Question::single_choice(
                            "bookkeeper",
                            "Is a bookkeeper engaged?",
                            &[YES_GOOD_COMPLETE, NO_MISSING_NOT_COMPLIANT],
                        ),
                        Question::single_choice(
                            "backlog_plan",
                            "Is there a plan to clear the backlog?",
                            &[YES_GOOD_COMPLETE, NO_MISSING_NOT_COMPLIANT],
                        ),
                    ],
                ),
                Question::select(
                    "revenue_model",
                    "Primary revenue model?",
                    &["Subscription", "Services", "None"],
                ),
            ],
        },
        Category {
            name: "Governance",
            weight: 0.4,
            questions: vec![Question::single_choice(
                "board",
                "Does the board meet quarterly?",
                &[YES_GOOD_COMPLETE, NO_MISSING_NOT_COMPLIANT],
            )],
        },
    ])
}

pub(super) fn compact_config() -> ScoringConfig {
    let mut config = ScoringConfig::standard();
    config.category_weights = [("Finance", 0.6), ("Governance", 0.4)].into_iter().collect();
    config
}

/// Answer every top-level question of `questionnaire` positively.
pub(super) fn all_positive(questionnaire: &Questionnaire) -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    for category in questionnaire.categories() {
        for question in &category.questions {
            let answer = match question.kind {
                QuestionKind::SingleChoice => YES_GOOD_COMPLETE,
                QuestionKind::Select => question
                    .options
                    .first()
                    .copied()
                    .unwrap_or(YES_GOOD_COMPLETE),
            };
            sheet.record(category.name, question.key, answer);
        }
    }
    sheet
}

pub(super) fn compact_service() -> Arc<EvaluationService> {
    Arc::new(EvaluationService::new(
        Arc::new(compact_questionnaire()),
        Arc::new(compact_config()),
        ExportOptions::default(),
    ))
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

pub(super) async fn read_text(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}
