use super::blueprint::Questionnaire;
use super::domain::{AnswerSheet, Question};
use super::report::{DetailRow, Report};
use super::scoring::{weighted_total, Readiness, ScoringConfig, SectionScores, SectionTally};
use chrono::NaiveDateTime;
use tracing::debug;

/// Result of folding an answer sheet over the questionnaire once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationTally {
    pub details: Vec<DetailRow>,
    pub sections: Vec<(String, SectionTally)>,
}

impl EvaluationTally {
    pub fn section_scores(&self) -> SectionScores {
        self.sections
            .iter()
            .map(|(section, tally)| (section.clone(), tally.score()))
            .collect()
    }
}

#[derive(Debug, Default)]
struct SectionPass {
    details: Vec<DetailRow>,
    tally: SectionTally,
}

/// Outcome of one evaluation: per-section scores plus the exportable report.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub section_scores: SectionScores,
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("company name is required before an evaluation can start")]
    MissingCompanyName,
    #[error("unknown category `{category}`")]
    UnknownCategory { category: String },
    #[error("unknown question `{question}` in category `{category}`")]
    UnknownQuestion { category: String, question: String },
    #[error("`{answer}` is not an option for `{question}` in category `{category}`")]
    OptionNotAllowed {
        category: String,
        question: String,
        answer: String,
    },
}

/// Stateless evaluator binding a questionnaire to a scoring configuration.
pub struct Evaluator<'a> {
    questionnaire: &'a Questionnaire,
    config: &'a ScoringConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(questionnaire: &'a Questionnaire, config: &'a ScoringConfig) -> Self {
        Self {
            questionnaire,
            config,
        }
    }

    /// Walk every category in order, scoring answered questions and the
    /// follow-ups their answers trigger. Unanswered questions are skipped.
    pub fn tally(&self, answers: &AnswerSheet) -> EvaluationTally {
        self.questionnaire.categories().iter().fold(
            EvaluationTally::default(),
            |mut tally, category| {
                let pass = self.fold_questions(
                    category.name,
                    &category.questions,
                    answers,
                    SectionPass::default(),
                );
                tally.details.extend(pass.details);
                tally.sections.push((category.name.to_string(), pass.tally));
                tally
            },
        )
    }

    fn fold_questions(
        &self,
        category: &str,
        questions: &[Question],
        answers: &AnswerSheet,
        pass: SectionPass,
    ) -> SectionPass {
        questions.iter().fold(pass, |mut pass, question| {
            let Some(answer) = answers.answer(category, question.key) else {
                debug!(category, question = question.key, "unanswered question skipped");
                return pass;
            };

            let score = self.config.score_answer(question, answer);
            pass.details
                .push(DetailRow::new(category, question.label, answer, score));
            pass.tally = pass.tally.add(score);

            self.fold_questions(category, question.follow_ups(answer), answers, pass)
        })
    }

    pub fn evaluate(
        &self,
        company_name: &str,
        answers: &AnswerSheet,
        evaluated_on: NaiveDateTime,
    ) -> Result<Evaluation, EvaluationError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(EvaluationError::MissingCompanyName);
        }

        let tally = self.tally(answers);
        let section_scores = tally.section_scores();
        let final_score = weighted_total(&section_scores, &self.config.category_weights);
        let readiness = Readiness::classify(final_score);

        debug!(
            company = company_name,
            final_score,
            %readiness,
            rows = tally.details.len(),
            "evaluation scored"
        );

        let report = Report::build(
            company_name,
            evaluated_on,
            final_score,
            readiness,
            tally.details,
        );

        Ok(Evaluation {
            section_scores,
            report,
        })
    }
}
