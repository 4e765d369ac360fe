use chrono::NaiveDate;
use investor_readiness::evaluation::{
    AnswerSheet, EvaluationError, EvaluationRequest, EvaluationService, EvaluationServiceError,
};

fn request(company_name: &str, answers: AnswerSheet, fill_defaults: bool) -> EvaluationRequest {
    EvaluationRequest {
        company_name: company_name.to_string(),
        answers,
        fill_defaults,
    }
}

#[test]
fn export_request_produces_named_csv_artifact() {
    let service = EvaluationService::standard();
    let answers = AnswerSheet::new().with_answer(
        "Risk & Red Flags",
        "pending_litigation",
        "Yes / Good / Complete",
    );

    let exported = service
        .export_request(&request("Acme Robotics", answers, true))
        .expect("export succeeds");

    assert_eq!(exported.file_name, "Acme Robotics_evaluation.csv");
    assert_eq!(exported.content_type.essence_str(), "text/csv");

    let text = String::from_utf8(exported.bytes).expect("utf-8 export");
    assert!(text.contains("Company,Acme Robotics\n"));
    assert!(text.contains("Final Score,100.00\n"));
    assert!(text.contains(
        "Risk & Red Flags,Is there any pending litigation or regulatory action?,Yes / Good / Complete,100\n"
    ));
}

#[test]
fn export_request_refuses_blank_company() {
    let service = EvaluationService::standard();

    let error = service
        .export_request(&request("", AnswerSheet::new(), true))
        .expect_err("blank company rejected");

    assert!(matches!(
        error,
        EvaluationServiceError::Evaluation(EvaluationError::MissingCompanyName)
    ));
}

#[test]
fn evaluate_at_uses_supplied_timestamp() {
    let service = EvaluationService::standard();
    let evaluated_on = NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .expect("valid timestamp");

    let evaluation = service
        .evaluate_at(&request("Acme", AnswerSheet::new(), false), evaluated_on)
        .expect("evaluation succeeds");

    assert_eq!(evaluation.report.evaluated_on_label(), "2024-12-31 23:59");
    assert!(evaluation.report.details.is_empty());
    assert_eq!(evaluation.report.final_score, 0.0);

    let view = service.view(&evaluation);
    assert_eq!(view.section_scores.len(), 9);
    assert_eq!(view.readiness_label, "High Risk");
}

#[test]
fn answers_are_checked_before_defaults_are_filled() {
    let service = EvaluationService::standard();
    let answers = AnswerSheet::new().with_answer("Payroll & HR Statutory", "payroll_remittances", "Yes");

    let error = service
        .evaluate(&request("Acme", answers, true))
        .expect_err("unlisted label rejected");

    assert!(matches!(
        error,
        EvaluationError::OptionNotAllowed { ref question, .. } if question == "payroll_remittances"
    ));
}
