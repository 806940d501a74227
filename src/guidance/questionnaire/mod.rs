mod interest;
mod personality;

pub use interest::{CategoryScore, InterestCategory, InterestTally};
pub use personality::{PersonalityAxis, PersonalityTally, AXES, QUESTIONS_PER_AXIS};

use super::catalog::{CareerCatalog, PersonalityCatalog};
use super::domain::QuestionAnswer;
use super::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Deterministic rule engine for the personality and career-interest questionnaires.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireClassifier {
    careers: CareerCatalog,
    personalities: PersonalityCatalog,
}

impl QuestionnaireClassifier {
    pub fn new(careers: CareerCatalog, personalities: PersonalityCatalog) -> Self {
        Self {
            careers,
            personalities,
        }
    }

    /// Four-letter code from up to forty answers. Pole letters count on their
    /// own axis; `A`/`B` answers count ten per axis in question order.
    pub fn classify_personality(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<PersonalityResult, ValidationError> {
        let tally = personality::tally(answers)?;
        let description = self.personalities.describe(&tally.code).to_string();

        Ok(PersonalityResult {
            code: tally.code,
            description,
            axis_scores: tally.axis_scores,
        })
    }

    /// Holland code and career labels for the dominant interest category.
    pub fn classify_career_interest(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<InterestResult, ValidationError> {
        let tally = interest::tally(answers)?;
        let dominant = tally.dominant();
        let careers = self.careers.careers_for(dominant).to_vec();
        let categories = tally.leading().map(|c| c.label().to_string()).collect();

        Ok(InterestResult {
            holland_code: tally.holland_code,
            dominant,
            categories,
            careers,
            ranking: tally.ranking,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityResult {
    pub code: String,
    pub description: String,
    pub axis_scores: [i32; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestResult {
    pub holland_code: String,
    pub dominant: InterestCategory,
    /// Labels of the three leading categories; stored on the profile.
    pub categories: Vec<String>,
    /// Recommended career labels.
    pub careers: Vec<String>,
    pub ranking: Vec<CategoryScore>,
}
