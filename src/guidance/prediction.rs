use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{GraduateRecord, GroupingField, UserProfile};
use super::error::ValidationError;
use super::kernel;

/// Empirical distribution of destinations over a filtered cohort.
///
/// An empty cohort yields an empty distribution; callers check
/// [`OutcomeDistribution::is_empty`] to tell "no cohort data" apart from a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub cohort_size: usize,
    pub probabilities: BTreeMap<String, f64>,
}

impl OutcomeDistribution {
    pub fn is_empty(&self) -> bool {
        self.cohort_size == 0
    }

    pub fn probability(&self, label: &str) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Destinations ordered from most to least likely, ties alphabetical.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(label, probability)| (label.as_str(), *probability))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Which slice of the corpus forms the comparison cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortScope {
    /// Every record on the requested path.
    AllMajors,
    /// Only records sharing the user's major.
    SameMajor,
}

/// Frequency based outcome forecaster.
#[derive(Debug, Clone, Default)]
pub struct OutcomeFrequencyPredictor;

impl OutcomeFrequencyPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Distribution of destinations among records on `path_filter` whose GPA
    /// lies within `gpa_tolerance` of the user's.
    pub fn predict(
        &self,
        user: &UserProfile,
        corpus: &[GraduateRecord],
        path_filter: &str,
        gpa_tolerance: f64,
    ) -> Result<OutcomeDistribution, ValidationError> {
        self.predict_scoped(user, corpus, path_filter, gpa_tolerance, CohortScope::AllMajors)
    }

    pub fn predict_scoped(
        &self,
        user: &UserProfile,
        corpus: &[GraduateRecord],
        path_filter: &str,
        gpa_tolerance: f64,
        scope: CohortScope,
    ) -> Result<OutcomeDistribution, ValidationError> {
        let gpa = user.require_gpa()?;
        let major = match scope {
            CohortScope::AllMajors => None,
            CohortScope::SameMajor => Some(user.require_major()?),
        };

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut cohort_size = 0usize;

        for record in corpus {
            if record.career_path.as_deref() != Some(path_filter) {
                continue;
            }
            if let Some(major) = major {
                if record.major.as_deref() != Some(major) {
                    continue;
                }
            }
            if !kernel::within_tolerance(gpa, record.require_gpa()?, gpa_tolerance) {
                continue;
            }

            let destination = record.require_field(GroupingField::Workplace)?;
            *counts.entry(destination.to_string()).or_insert(0) += 1;
            cohort_size += 1;
        }

        if cohort_size == 0 {
            return Ok(OutcomeDistribution::default());
        }

        let probabilities = counts
            .into_iter()
            .map(|(label, count)| (label, count as f64 / cohort_size as f64))
            .collect();

        Ok(OutcomeDistribution {
            cohort_size,
            probabilities,
        })
    }
}
