use super::config::CategoryWeights;
use serde::{Deserialize, Serialize};

/// Round to two decimals. Exact halves go to the even neighbour, so
/// `0.125` becomes `0.12`.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Running sum and count for one category during an evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionTally {
    pub sum: u32,
    pub answered: u32,
}

impl SectionTally {
    pub fn add(self, score: u8) -> Self {
        Self {
            sum: self.sum + u32::from(score),
            answered: self.answered + 1,
        }
    }

    /// Plain mean rounded to two decimals; an empty section scores 0.
    pub fn score(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        round_to_hundredths(f64::from(self.sum) / f64::from(self.answered))
    }
}

pub fn section_score<I>(scores: I) -> f64
where
    I: IntoIterator<Item = u8>,
{
    scores
        .into_iter()
        .fold(SectionTally::default(), SectionTally::add)
        .score()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: String,
    pub score: f64,
}

/// Section scores in questionnaire order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionScores(Vec<SectionScore>);

impl SectionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, section: impl Into<String>, score: f64) {
        let section = section.into();
        match self.0.iter_mut().find(|entry| entry.section == section) {
            Some(entry) => entry.score = score,
            None => self.0.push(SectionScore { section, score }),
        }
    }

    pub fn get(&self, section: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.section == section)
            .map(|entry| entry.score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionScore> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SectionScores {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (section, score) in iter {
            scores.insert(section, score);
        }
        scores
    }
}

impl<'a> IntoIterator for &'a SectionScores {
    type Item = &'a SectionScore;
    type IntoIter = std::slice::Iter<'a, SectionScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Linear weighted sum over the scored sections, rounded to two decimals.
/// Sections without a weight contribute nothing.
pub fn weighted_total(section_scores: &SectionScores, weights: &CategoryWeights) -> f64 {
    let total: f64 = section_scores
        .iter()
        .map(|entry| entry.score * weights.get(&entry.section).unwrap_or(0.0))
        .sum();
    round_to_hundredths(total)
}
