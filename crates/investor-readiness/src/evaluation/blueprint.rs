use super::domain::{
    AnswerSheet, Category, Question, NO_MISSING_NOT_COMPLIANT as NO,
    PARTIALLY_IN_PROGRESS as PARTIAL, SELECT_NONE, YES_GOOD_COMPLETE as YES,
};
use super::session::EvaluationError;

const GRADED: &[&str] = &[YES, PARTIAL, NO];
const BINARY: &[&str] = &[YES, NO];

/// Ordered, immutable questionnaire tree. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    categories: Vec<Category>,
}

impl Questionnaire {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn standard() -> Self {
        Self::new(standard_categories())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.name == name)
    }

    pub fn top_level_question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    /// Look up a question by key anywhere in a category, follow-ups included.
    pub fn question(&self, category: &str, key: &str) -> Option<&Question> {
        self.category(category)
            .and_then(|category| find_question(&category.questions, key))
    }

    /// Reject answers filed under unknown categories or question keys, and
    /// labels that are not among the question's options.
    pub fn check_answers(&self, sheet: &AnswerSheet) -> Result<(), EvaluationError> {
        for (category, key, answer) in sheet.iter() {
            let Some(section) = self.category(category) else {
                return Err(EvaluationError::UnknownCategory {
                    category: category.to_string(),
                });
            };
            let Some(question) = find_question(&section.questions, key) else {
                return Err(EvaluationError::UnknownQuestion {
                    category: category.to_string(),
                    question: key.to_string(),
                });
            };
            if !question.allows(answer) {
                return Err(EvaluationError::OptionNotAllowed {
                    category: category.to_string(),
                    question: key.to_string(),
                    answer: answer.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fill every unanswered question with its first option, the way an
    /// untouched form would submit it. Branches triggered by the resulting
    /// answer are filled too.
    pub fn fill_defaults(&self, mut sheet: AnswerSheet) -> AnswerSheet {
        for category in &self.categories {
            fill_questions(category.name, &category.questions, &mut sheet);
        }
        sheet
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

fn find_question<'a>(questions: &'a [Question], key: &str) -> Option<&'a Question> {
    questions.iter().find_map(|question| {
        if question.key == key {
            return Some(question);
        }
        question
            .branches
            .iter()
            .find_map(|branch| find_question(&branch.questions, key))
    })
}

fn fill_questions(category: &str, questions: &[Question], sheet: &mut AnswerSheet) {
    for question in questions {
        let answer = match sheet.answer(category, question.key) {
            Some(existing) => existing.to_string(),
            None => match question.options.first() {
                Some(first) => {
                    sheet.record(category, question.key, *first);
                    (*first).to_string()
                }
                None => continue,
            },
        };
        fill_questions(category, question.follow_ups(&answer), sheet);
    }
}

fn standard_categories() -> Vec<Category> {
    vec![
        Category {
            name: "Business Profile & Model",
            weight: 0.15,
            questions: vec![
                Question::single_choice(
                    "business_model_documented",
                    "Is the business model documented (value proposition, customers, revenue streams)?",
                    GRADED,
                ),
                Question::select(
                    "revenue_model",
                    "What is the primary revenue model?",
                    &["Subscription", "Transactional", "Licensing", "Services", SELECT_NONE],
                ),
                Question::single_choice(
                    "market_validation",
                    "Has product-market fit been validated with paying customers?",
                    GRADED,
                )
                .with_branch(
                    PARTIAL,
                    vec![Question::single_choice(
                        "validation_plan",
                        "Is there a documented plan to reach validation within 12 months?",
                        BINARY,
                    )],
                ),
            ],
        },
        Category {
            name: "Legal & Compliance",
            weight: 0.15,
            questions: vec![
                Question::single_choice(
                    "company_registered",
                    "Is the company duly incorporated with all registrations current?",
                    BINARY,
                ),
                Question::single_choice(
                    "licenses_current",
                    "Are all business licenses and permits current?",
                    GRADED,
                )
                .with_branch(
                    NO,
                    vec![Question::single_choice(
                        "license_applications_filed",
                        "Have applications for the missing licenses been filed?",
                        GRADED,
                    )],
                ),
                Question::single_choice(
                    "contracts_documented",
                    "Are key customer, vendor, and employee contracts signed and on file?",
                    GRADED,
                ),
            ],
        },
        Category {
            name: "Accounting & Finance",
            weight: 0.20,
            questions: vec![
                Question::single_choice(
                    "books_reconciled",
                    "Are books of accounts maintained and reconciled monthly?",
                    GRADED,
                ),
                Question::single_choice(
                    "financials_audited",
                    "Are financial statements audited for the last fiscal year?",
                    GRADED,
                )
                .with_branch(
                    NO,
                    vec![
                        Question::single_choice(
                            "audit_engaged",
                            "Is an auditor engaged for the current fiscal year?",
                            BINARY,
                        ),
                        Question::single_choice(
                            "management_accounts",
                            "Are monthly management accounts prepared?",
                            GRADED,
                        ),
                    ],
                ),
                Question::single_choice(
                    "tax_filings_current",
                    "Are all direct and indirect tax filings current?",
                    GRADED,
                ),
                Question::single_choice(
                    "financial_projections",
                    "Are three-year financial projections available?",
                    GRADED,
                ),
            ],
        },
        Category {
            name: "Payroll & HR Statutory",
            weight: 0.10,
            questions: vec![
                Question::single_choice(
                    "payroll_remittances",
                    "Is payroll processed with all statutory deductions remitted on time?",
                    GRADED,
                ),
                Question::single_choice(
                    "employment_contracts",
                    "Do all employees have signed employment contracts?",
                    GRADED,
                ),
                Question::single_choice(
                    "hr_policies",
                    "Are HR policies (leave, conduct, harassment) documented and shared?",
                    GRADED,
                ),
            ],
        },
        Category {
            name: "Corporate Governance",
            weight: 0.10,
            questions: vec![
                Question::single_choice(
                    "statutory_records_maintained",
                    "Are minutes, registers, board resolutions maintained and filed timely?",
                    GRADED,
                ),
                Question::single_choice(
                    "board_meetings_regular",
                    "Are board meetings held as per statutory frequency?",
                    BINARY,
                ),
                Question::single_choice(
                    "audit_committee_exists",
                    "Does the company have an audit committee or equivalent?",
                    BINARY,
                ),
            ],
        },
        Category {
            name: "Intellectual Property",
            weight: 0.05,
            questions: vec![
                Question::single_choice(
                    "ip_identified",
                    "Have all IP assets (patents, trademarks, copyrights) been identified?",
                    GRADED,
                ),
                Question::single_choice(
                    "ip_registered",
                    "Are key IP assets registered or in registration?",
                    GRADED,
                ),
            ],
        },
        Category {
            name: "Fundraising & Investor Readiness",
            weight: 0.15,
            questions: vec![
                Question::single_choice(
                    "funding_plan",
                    "Is there a fundraising plan with amount, timeline, and use of funds?",
                    GRADED,
                ),
                Question::single_choice(
                    "data_room_prepared",
                    "Is a data room prepared with key documents for investors?",
                    BINARY,
                ),
                Question::single_choice(
                    "cap_table_current",
                    "Is the cap table current and available?",
                    BINARY,
                ),
            ],
        },
        Category {
            name: "Systems & Automation",
            weight: 0.05,
            questions: vec![Question::single_choice(
                "process_automation",
                "Are key business processes automated (CRM, accounting, payroll, compliance)?",
                GRADED,
            )],
        },
        Category {
            name: "Risk & Red Flags",
            weight: 0.05,
            questions: vec![
                Question::single_choice(
                    "risk_identified",
                    "Are major business risks identified and mitigation plans in place?",
                    GRADED,
                ),
                Question::single_choice(
                    "pending_litigation",
                    "Is there any pending litigation or regulatory action?",
                    &[NO, YES],
                ),
            ],
        },
    ]
}
