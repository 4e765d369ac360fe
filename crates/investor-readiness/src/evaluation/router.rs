use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::info;

use super::service::{EvaluationRequest, EvaluationService, EvaluationServiceError};
use super::session::EvaluationError;

/// Router builder exposing the questionnaire and evaluation endpoints.
pub fn evaluation_router(service: Arc<EvaluationService>) -> Router {
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/evaluations", post(evaluate_handler))
        .route("/api/v1/evaluations/export", post(export_handler))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler(
    State(service): State<Arc<EvaluationService>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.questionnaire_view())).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<EvaluationService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    match service.evaluate(&request) {
        Ok(evaluation) => {
            info!(
                company = %evaluation.report.company_name,
                final_score = evaluation.report.final_score,
                readiness = %evaluation.report.readiness,
                "evaluation completed"
            );
            (StatusCode::OK, axum::Json(service.view(&evaluation))).into_response()
        }
        Err(error) => evaluation_error_response(&error),
    }
}

pub(crate) async fn export_handler(
    State(service): State<Arc<EvaluationService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    match service.export_request(&request) {
        Ok(exported) => {
            info!(file_name = %exported.file_name, bytes = exported.bytes.len(), "evaluation exported");
            let disposition = format!("attachment; filename=\"{}\"", exported.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, exported.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                exported.bytes,
            )
                .into_response()
        }
        Err(EvaluationServiceError::Evaluation(error)) => evaluation_error_response(&error),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn evaluation_error_response(error: &EvaluationError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
