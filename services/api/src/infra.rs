use investor_readiness::config::{AppConfig, ScoringSource};
use investor_readiness::error::AppError;
use investor_readiness::evaluation::{
    AnswerSheet, EvaluationService, ExportOptions, Questionnaire, ScoringConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve the scoring tables, preferring an explicit override path.
pub(crate) fn load_scoring(
    source: &ScoringSource,
    override_path: Option<PathBuf>,
) -> Result<ScoringConfig, AppError> {
    let source = match override_path {
        Some(path) => ScoringSource::File(path),
        None => source.clone(),
    };
    let config = source.load()?;

    if let ScoringSource::File(path) = &source {
        info!(path = %path.display(), "loaded scoring configuration");
    }

    let drift = config.weight_drift();
    if drift != 0.0 {
        warn!(
            total = config.category_weights.total(),
            drift, "category weights do not sum to 1.0; scores are not normalized"
        );
    }

    Ok(config)
}

pub(crate) fn build_service(
    scoring: ScoringConfig,
    export: ExportOptions,
) -> Arc<EvaluationService> {
    Arc::new(EvaluationService::new(
        Arc::new(Questionnaire::standard()),
        Arc::new(scoring),
        export,
    ))
}

pub(crate) fn service_from_config(
    config: &AppConfig,
    override_path: Option<PathBuf>,
) -> Result<Arc<EvaluationService>, AppError> {
    let scoring = load_scoring(&config.scoring, override_path)?;
    Ok(build_service(scoring, config.export))
}

pub(crate) fn read_answers(path: &Path) -> Result<AnswerSheet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn override_path_wins_over_configured_source() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"category_weights": {{"Legal & Compliance": 1.0}}}}"#)
            .expect("write config");

        let config = load_scoring(&ScoringSource::Standard, Some(file.path().to_path_buf()))
            .expect("override loads");

        assert_eq!(config.category_weights.get("Legal & Compliance"), Some(1.0));
        assert_eq!(config.category_weights.get("Accounting & Finance"), None);
    }

    #[test]
    fn missing_scoring_file_is_an_error() {
        let result = load_scoring(
            &ScoringSource::File(PathBuf::from("./does-not-exist.json")),
            None,
        );
        assert!(matches!(result, Err(AppError::Scoring(_))));
    }

    #[test]
    fn read_answers_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[1, 2, 3]").expect("write answers");

        let result = read_answers(file.path());
        assert!(matches!(result, Err(AppError::Input(_))));
    }
}
