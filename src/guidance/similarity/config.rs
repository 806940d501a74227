use serde::{Deserialize, Serialize};

use super::super::error::ValidationError;

const WEIGHT_SUM_SLACK: f64 = 1e-9;

/// Fixed weighting of the four similarity signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub major: f64,
    pub gpa: f64,
    pub interest: f64,
    pub skills: f64,
    /// GPA gap at which the GPA signal stops contributing.
    pub gpa_span: f64,
}

impl SimilarityWeights {
    /// Weights in the order major, GPA, interest, skills.
    pub fn ordered(&self) -> [f64; 4] {
        [self.major, self.gpa, self.interest, self.skills]
    }

    pub fn total(&self) -> f64 {
        self.major + self.gpa + self.interest + self.skills
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = self.ordered();
        let total = self.total();
        if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0)
            || (total - 1.0).abs() > WEIGHT_SUM_SLACK
        {
            return Err(ValidationError::InvalidWeights { total });
        }
        if !self.gpa_span.is_finite() || self.gpa_span <= 0.0 {
            return Err(ValidationError::InvalidGpaSpan {
                span: self.gpa_span,
            });
        }
        Ok(())
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            major: 0.3,
            gpa: 0.2,
            interest: 0.3,
            skills: 0.2,
            gpa_span: 1.0,
        }
    }
}
