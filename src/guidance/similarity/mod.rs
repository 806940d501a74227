mod config;
mod rules;

pub use config::SimilarityWeights;

use super::domain::{GraduateId, GraduateRecord, UserProfile};
use super::error::ValidationError;
use super::kernel;
use serde::{Deserialize, Serialize};

/// Stateless scorer comparing a user profile with one graduate record.
#[derive(Debug, Clone)]
pub struct SimilarityCalculator {
    weights: SimilarityWeights,
}

impl SimilarityCalculator {
    pub fn new(weights: SimilarityWeights) -> Result<Self, ValidationError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Score in `[0, 1]`. Fails when either side lacks the major or GPA.
    pub fn similarity(
        &self,
        user: &UserProfile,
        record: &GraduateRecord,
    ) -> Result<f64, ValidationError> {
        Ok(self.breakdown(user, record)?.score)
    }

    /// Score together with the per-signal contributions that produced it.
    pub fn breakdown(
        &self,
        user: &UserProfile,
        record: &GraduateRecord,
    ) -> Result<SimilarityBreakdown, ValidationError> {
        let components = rules::score_pair(user, record, &self.weights)?;
        let strengths: Vec<f64> = components.iter().map(|c| c.strength).collect();
        let score =
            kernel::clamp_unit(kernel::weighted_sum(&self.weights.ordered(), &strengths));

        Ok(SimilarityBreakdown {
            graduate_id: record.id,
            score,
            components,
        })
    }
}

impl Default for SimilarityCalculator {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilaritySignal {
    Major,
    Gpa,
    Interest,
    Skills,
}

/// Discrete contribution to a similarity score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityComponent {
    pub signal: SimilaritySignal,
    /// How strongly the signal matched, in `[0, 1]`.
    pub strength: f64,
    /// Weighted contribution to the total.
    pub score: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub graduate_id: GraduateId,
    pub score: f64,
    pub components: Vec<SimilarityComponent>,
}

impl SimilarityBreakdown {
    pub fn component(&self, signal: SimilaritySignal) -> Option<&SimilarityComponent> {
        self.components
            .iter()
            .find(|component| component.signal == signal)
    }
}
