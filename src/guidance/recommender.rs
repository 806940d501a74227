use serde::Serialize;

use super::domain::{GraduateRecord, UserProfile};
use super::error::ValidationError;
use super::kernel;
use super::similarity::SimilarityCalculator;

/// Graduate record paired with the similarity score it earned for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult<'a> {
    pub record: &'a GraduateRecord,
    pub score: f64,
}

/// Graduate record paired with its absolute GPA distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosenessMatch<'a> {
    pub record: &'a GraduateRecord,
    pub gpa_difference: f64,
}

/// Ranks the corpus against a user profile.
#[derive(Debug, Clone)]
pub struct RankedRecommender {
    calculator: SimilarityCalculator,
    closeness_tolerance: f64,
}

impl RankedRecommender {
    pub fn new(calculator: SimilarityCalculator, closeness_tolerance: f64) -> Self {
        Self {
            calculator,
            closeness_tolerance,
        }
    }

    pub fn calculator(&self) -> &SimilarityCalculator {
        &self.calculator
    }

    /// Top `limit` records by descending similarity. Equal scores keep corpus order.
    pub fn recommend<'a>(
        &self,
        user: &UserProfile,
        corpus: &'a [GraduateRecord],
        limit: usize,
    ) -> Result<Vec<SimilarityResult<'a>>, ValidationError> {
        if corpus.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut scored = corpus
            .iter()
            .map(|record| {
                self.calculator
                    .similarity(user, record)
                    .map(|score| SimilarityResult { record, score })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // `sort_by` is stable, which keeps ties in corpus order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }

    /// Same-major records within the closeness tolerance, nearest GPA first.
    ///
    /// Records from other majors are skipped before their GPA is inspected, so
    /// only same-major rows must carry a GPA.
    pub fn closest<'a>(
        &self,
        user: &UserProfile,
        corpus: &'a [GraduateRecord],
        limit: usize,
    ) -> Result<Vec<ClosenessMatch<'a>>, ValidationError> {
        if corpus.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let major = user.require_major()?;
        let gpa = user.require_gpa()?;

        let mut matches = Vec::new();
        for record in corpus {
            if record.require_major()? != major {
                continue;
            }
            let record_gpa = record.require_gpa()?;
            if kernel::within_tolerance(gpa, record_gpa, self.closeness_tolerance) {
                matches.push(ClosenessMatch {
                    record,
                    gpa_difference: (gpa - record_gpa).abs(),
                });
            }
        }

        matches.sort_by(|a, b| a.gpa_difference.total_cmp(&b.gpa_difference));
        matches.truncate(limit);
        Ok(matches)
    }
}
