use super::blueprint::Questionnaire;
use super::domain::{Question, QuestionKind};
use super::report::DetailRow;
use super::scoring::{CategoryWeights, Readiness};
use super::session::Evaluation;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SectionScoreEntry {
    pub section: String,
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub company_name: String,
    pub evaluated_on: String,
    pub final_score: f64,
    pub readiness: Readiness,
    pub readiness_label: &'static str,
    pub section_scores: Vec<SectionScoreEntry>,
    pub details: Vec<DetailRow>,
}

impl EvaluationView {
    pub fn new(evaluation: &Evaluation, weights: &CategoryWeights) -> Self {
        let report = &evaluation.report;
        let section_scores = evaluation
            .section_scores
            .iter()
            .map(|entry| SectionScoreEntry {
                section: entry.section.clone(),
                score: entry.score,
                weight: weights.get(&entry.section).unwrap_or(0.0),
            })
            .collect();

        Self {
            company_name: report.company_name.clone(),
            evaluated_on: report.evaluated_on_label(),
            final_score: report.final_score,
            readiness: report.readiness,
            readiness_label: report.readiness.label(),
            section_scores,
            details: report.details.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<&'static str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<BranchView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchView {
    pub trigger: &'static str,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub name: &'static str,
    pub weight: f64,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub categories: Vec<CategoryView>,
}

impl QuestionnaireView {
    /// Weights come from the active scoring configuration, not the blueprint.
    pub fn new(questionnaire: &Questionnaire, weights: &CategoryWeights) -> Self {
        let categories = questionnaire
            .categories()
            .iter()
            .map(|category| CategoryView {
                name: category.name,
                weight: weights.get(category.name).unwrap_or(0.0),
                questions: category.questions.iter().map(QuestionView::from).collect(),
            })
            .collect();

        Self { categories }
    }
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            key: question.key,
            label: question.label,
            kind: question.kind,
            options: question.options.clone(),
            branches: question
                .branches
                .iter()
                .map(|branch| BranchView {
                    trigger: branch.trigger,
                    questions: branch.questions.iter().map(QuestionView::from).collect(),
                })
                .collect(),
        }
    }
}
