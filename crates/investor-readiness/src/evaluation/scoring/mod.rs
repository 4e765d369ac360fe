mod aggregate;
mod config;
mod policy;
mod rules;

pub use aggregate::{section_score, weighted_total, SectionScore, SectionScores, SectionTally};
pub use config::{CategoryWeights, OptionScores, ScoringConfig, ScoringConfigError};
pub use policy::{classify, Readiness};
pub use rules::{score_option, score_select};
