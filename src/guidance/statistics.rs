use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{GraduateRecord, GroupingField};
use super::error::ValidationError;

/// Member count per distinct value of one categorical field.
pub type Distribution = BTreeMap<String, usize>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    pub total_records: usize,
    pub career_path_distribution: Distribution,
    pub major_distribution: Distribution,
    pub location_distribution: Distribution,
    pub workplace_distribution: Distribution,
    pub mean_gpa_by_major: BTreeMap<String, f64>,
}

impl CorpusStatistics {
    pub fn distribution(&self, field: GroupingField) -> &Distribution {
        match field {
            GroupingField::CareerPath => &self.career_path_distribution,
            GroupingField::Major => &self.major_distribution,
            GroupingField::Location => &self.location_distribution,
            GroupingField::Workplace => &self.workplace_distribution,
        }
    }

    fn distribution_mut(&mut self, field: GroupingField) -> &mut Distribution {
        match field {
            GroupingField::CareerPath => &mut self.career_path_distribution,
            GroupingField::Major => &mut self.major_distribution,
            GroupingField::Location => &mut self.location_distribution,
            GroupingField::Workplace => &mut self.workplace_distribution,
        }
    }
}

#[derive(Debug, Default)]
struct GpaAccumulator {
    total: f64,
    count: usize,
}

/// Whole-snapshot dashboard aggregates.
#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Counts per categorical field and mean GPA per major. A record missing
    /// any grouping field or its GPA fails the whole computation.
    pub fn aggregate(
        &self,
        corpus: &[GraduateRecord],
    ) -> Result<CorpusStatistics, ValidationError> {
        let mut statistics = CorpusStatistics {
            total_records: corpus.len(),
            ..CorpusStatistics::default()
        };
        let mut gpa_by_major: BTreeMap<String, GpaAccumulator> = BTreeMap::new();

        for record in corpus {
            for field in GroupingField::ordered() {
                let key = record.require_field(field)?;
                *statistics
                    .distribution_mut(field)
                    .entry(key.to_string())
                    .or_insert(0) += 1;
            }

            let gpa = record.require_gpa()?;
            let entry = gpa_by_major
                .entry(record.require_major()?.to_string())
                .or_default();
            entry.total += gpa;
            entry.count += 1;
        }

        statistics.mean_gpa_by_major = gpa_by_major
            .into_iter()
            .map(|(major, acc)| (major, acc.total / acc.count as f64))
            .collect();

        Ok(statistics)
    }
}
