use serde::{Deserialize, Serialize};
use std::fmt;

pub const INVESTOR_READY_ABOVE: f64 = 80.0;
pub const NEEDS_WORK_FROM: f64 = 60.0;

/// Three-tier verdict derived from the final weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Readiness {
    InvestorReady,
    NeedsWork,
    HighRisk,
}

impl Readiness {
    /// Strictly above 80 is ready; 60 and 80 themselves both need work.
    pub fn classify(score: f64) -> Self {
        if score > INVESTOR_READY_ABOVE {
            Self::InvestorReady
        } else if score >= NEEDS_WORK_FROM {
            Self::NeedsWork
        } else {
            Self::HighRisk
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvestorReady => "InvestorReady",
            Self::NeedsWork => "NeedsWork",
            Self::HighRisk => "HighRisk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InvestorReady => "Investor Ready",
            Self::NeedsWork => "Needs Work",
            Self::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(score: f64) -> Readiness {
    Readiness::classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_to_needs_work() {
        assert_eq!(classify(80.0), Readiness::NeedsWork);
        assert_eq!(classify(80.01), Readiness::InvestorReady);
        assert_eq!(classify(60.0), Readiness::NeedsWork);
        assert_eq!(classify(59.99), Readiness::HighRisk);
    }

    #[test]
    fn extremes_classify_as_expected() {
        assert_eq!(classify(100.0), Readiness::InvestorReady);
        assert_eq!(classify(0.0), Readiness::HighRisk);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Readiness::NeedsWork).expect("serializes");
        assert_eq!(json, "\"NeedsWork\"");
        assert_eq!(Readiness::HighRisk.to_string(), "HighRisk");
        assert_eq!(Readiness::InvestorReady.label(), "Investor Ready");
    }
}
