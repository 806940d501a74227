use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::QuestionAnswer;
use super::super::error::ValidationError;

const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 5;
const CODE_LENGTH: usize = 3;

/// Holland (RIASEC) interest categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InterestCategory {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl InterestCategory {
    pub fn ordered() -> [InterestCategory; 6] {
        [
            InterestCategory::Realistic,
            InterestCategory::Investigative,
            InterestCategory::Artistic,
            InterestCategory::Social,
            InterestCategory::Enterprising,
            InterestCategory::Conventional,
        ]
    }

    pub fn code(&self) -> char {
        match self {
            InterestCategory::Realistic => 'R',
            InterestCategory::Investigative => 'I',
            InterestCategory::Artistic => 'A',
            InterestCategory::Social => 'S',
            InterestCategory::Enterprising => 'E',
            InterestCategory::Conventional => 'C',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InterestCategory::Realistic => "Realistic",
            InterestCategory::Investigative => "Investigative",
            InterestCategory::Artistic => "Artistic",
            InterestCategory::Social => "Social",
            InterestCategory::Enterprising => "Enterprising",
            InterestCategory::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for InterestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: InterestCategory,
    pub score: u32,
}

/// Accumulated category scores, ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestTally {
    /// All six categories, highest first; ties keep RIASEC order.
    pub ranking: Vec<CategoryScore>,
    /// Letters of the three leading categories, e.g. `"ISE"`.
    pub holland_code: String,
}

impl InterestTally {
    pub fn dominant(&self) -> InterestCategory {
        self.ranking
            .first()
            .map(|entry| entry.category)
            .unwrap_or(InterestCategory::Realistic)
    }

    pub fn leading(&self) -> impl Iterator<Item = InterestCategory> + '_ {
        self.ranking
            .iter()
            .take(CODE_LENGTH)
            .map(|entry| entry.category)
    }
}

pub(crate) fn tally(answers: &[QuestionAnswer]) -> Result<InterestTally, ValidationError> {
    if answers.is_empty() {
        return Err(ValidationError::EmptyQuestionnaire);
    }

    let categories = InterestCategory::ordered();
    let mut scores = [0u32; 6];

    for (question_index, answer) in answers.iter().enumerate() {
        let value = answer.answer.trim().parse::<i64>().map_err(|_| {
            ValidationError::UnparseableAnswer {
                question_index,
                question_id: answer.question_id,
                raw: answer.answer.clone(),
            }
        })?;

        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::AnswerOutOfRange {
                question_index,
                question_id: answer.question_id,
                value,
            });
        }

        scores[question_index % categories.len()] += value as u32;
    }

    let mut ranking: Vec<CategoryScore> = categories
        .into_iter()
        .zip(scores)
        .map(|(category, score)| CategoryScore { category, score })
        .collect();
    // Stable sort: equal scores stay in RIASEC order, so the lowest index wins ties.
    ranking.sort_by(|a, b| b.score.cmp(&a.score));

    let holland_code = ranking
        .iter()
        .take(CODE_LENGTH)
        .map(|entry| entry.category.code())
        .collect();

    Ok(InterestTally {
        ranking,
        holland_code,
    })
}
