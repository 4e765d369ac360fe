use crate::infra::{read_answers, service_from_config};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use investor_readiness::config::AppConfig;
use investor_readiness::error::AppError;
use investor_readiness::evaluation::views::QuestionView;
use investor_readiness::evaluation::{
    AnswerSheet, EvaluationRequest, EvaluationService, EvaluationView, QuestionnaireView,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionnaireArgs {
    /// JSON file with category weights and option scores
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Company name recorded on the report
    #[arg(long)]
    pub(crate) company: String,
    /// JSON answer sheet keyed by category, then question key
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Destination for the CSV report (defaults to `{company}_evaluation.csv`)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Answer every unanswered question with its first option
    #[arg(long)]
    pub(crate) defaults: bool,
    /// Evaluation timestamp (YYYY-MM-DD HH:MM). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) evaluated_on: Option<NaiveDateTime>,
    /// JSON file with category weights and option scores
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M")
        .map_err(|err| format!("invalid timestamp `{value}`: {err}"))
}

pub(crate) fn run_questionnaire(args: QuestionnaireArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = service_from_config(&config, args.scoring_config)?;
    render_questionnaire(&service.questionnaire_view());
    Ok(())
}

pub(crate) fn run_evaluate(mut args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = service_from_config(&config, args.scoring_config.take())?;
    let written = write_evaluation(&service, args)?;
    println!("\nReport written to {}", written.display());
    Ok(())
}

/// Score the answer sheet, print the summary and write the CSV file.
/// Returns the path the report was written to.
fn write_evaluation(service: &EvaluationService, args: EvaluateArgs) -> Result<PathBuf, AppError> {
    let EvaluateArgs {
        company,
        answers,
        output,
        defaults,
        evaluated_on,
        ..
    } = args;

    let answers = match answers {
        Some(path) => read_answers(&path)?,
        None => AnswerSheet::new(),
    };
    let request = EvaluationRequest {
        company_name: company,
        answers,
        fill_defaults: defaults,
    };

    let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().naive_local());
    let evaluation = service.evaluate_at(&request, evaluated_on)?;
    render_evaluation(&service.view(&evaluation));

    let exported = service.export(&evaluation)?;
    let destination = output.unwrap_or_else(|| PathBuf::from(&exported.file_name));
    write_file(&destination, &exported.bytes)?;
    Ok(destination)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn render_evaluation(view: &EvaluationView) {
    println!("Investor readiness evaluation");
    println!("  Company: {}", view.company_name);
    println!("  Evaluated on: {}", view.evaluated_on);
    println!("Section scores:");
    for entry in &view.section_scores {
        println!(
            "  - {:<28} {:>6.1} (weight {:.2})",
            entry.section, entry.score, entry.weight
        );
    }
    println!("Final score: {:.2}", view.final_score);
    println!("Readiness: {}", view.readiness_label);
}

fn render_questionnaire(view: &QuestionnaireView) {
    println!("Investor readiness questionnaire");
    for category in &view.categories {
        println!("\n{} (weight {:.2})", category.name, category.weight);
        for question in &category.questions {
            render_question(question, 1);
        }
    }
}

fn render_question(question: &QuestionView, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}- [{}] {} ({})",
        question.key,
        question.label,
        question.options.join(" / ")
    );
    for branch in &question.branches {
        println!("{indent}  when \"{}\":", branch.trigger);
        for follow_up in &branch.questions {
            render_question(follow_up, depth + 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_service;
    use investor_readiness::evaluation::{EvaluationError, ExportOptions, ScoringConfig};
    use std::io::Write;

    fn args(company: &str) -> EvaluateArgs {
        EvaluateArgs {
            company: company.to_string(),
            answers: None,
            output: None,
            defaults: false,
            evaluated_on: parse_timestamp("2024-03-01 09:30").ok(),
            scoring_config: None,
        }
    }

    #[test]
    fn parses_report_timestamp() {
        let parsed = parse_timestamp("2024-03-01 09:30").expect("timestamp parses");
        assert_eq!(parsed.format("%H:%M").to_string(), "09:30");
        assert!(parse_timestamp("March 1st").is_err());
    }

    #[test]
    fn writes_csv_for_default_answers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("reports").join("acme.csv");
        let service = build_service(ScoringConfig::standard(), ExportOptions::default());

        let mut evaluate = args("Acme");
        evaluate.defaults = true;
        evaluate.output = Some(output.clone());

        let written = write_evaluation(&service, evaluate).expect("evaluation succeeds");
        assert_eq!(written, output);

        let csv = std::fs::read_to_string(&output).expect("report readable");
        assert!(csv.starts_with("Key,Value\nCompany,Acme\nEvaluated On,2024-03-01 09:30\n"));
        assert!(csv.contains("Final Score,97.50\n"));
        assert!(csv.contains("Readiness,InvestorReady\n"));
        assert!(csv.contains("\n\nSection,Question,Response,Score\n"));
    }

    #[test]
    fn reads_answers_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("report.csv");
        let mut answers = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            answers,
            r#"{{"Legal & Compliance": {{"company_registered": "No / Missing / Not Compliant"}}}}"#
        )
        .expect("write answers");
        let service = build_service(ScoringConfig::standard(), ExportOptions::default());

        let mut evaluate = args("Acme");
        evaluate.answers = Some(answers.path().to_path_buf());
        evaluate.output = Some(output.clone());

        write_evaluation(&service, evaluate).expect("evaluation succeeds");

        let csv = std::fs::read_to_string(&output).expect("report readable");
        assert!(csv.contains("Final Score,0.00\n"));
        assert!(csv.contains("Readiness,HighRisk\n"));
        assert!(csv.contains("Legal & Compliance,Is the company duly incorporated"));
    }

    #[test]
    fn blank_company_is_rejected_before_writing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("report.csv");
        let service = build_service(ScoringConfig::standard(), ExportOptions::default());

        let mut evaluate = args("   ");
        evaluate.output = Some(output.clone());

        let result = write_evaluation(&service, evaluate);
        assert!(matches!(result, Err(AppError::Evaluation(_))));
        assert!(!output.exists());
    }

    #[test]
    fn answers_outside_the_options_are_rejected_before_writing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("report.csv");
        let mut answers = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            answers,
            r#"{{"Business Profile & Model": {{"revenue_model": "none"}}}}"#
        )
        .expect("write answers");
        let service = build_service(ScoringConfig::standard(), ExportOptions::default());

        let mut evaluate = args("Acme");
        evaluate.answers = Some(answers.path().to_path_buf());
        evaluate.output = Some(output.clone());

        let result = write_evaluation(&service, evaluate);
        assert!(matches!(
            result,
            Err(AppError::Evaluation(EvaluationError::OptionNotAllowed { ref answer, .. })) if answer == "none"
        ));
        assert!(!output.exists());
    }
}
