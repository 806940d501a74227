use serde::{Deserialize, Serialize};

use super::catalog::GuidanceCatalog;
use super::domain::{GraduateRecord, QuestionAnswer, UserProfile};
use super::error::ValidationError;
use super::prediction::{CohortScope, OutcomeDistribution, OutcomeFrequencyPredictor};
use super::questionnaire::{InterestResult, PersonalityResult, QuestionnaireClassifier};
use super::recommender::{ClosenessMatch, RankedRecommender, SimilarityResult};
use super::similarity::{SimilarityCalculator, SimilarityWeights};
use super::statistics::{CorpusStatistics, StatisticsAggregator};

/// Career path labels as they appear in the administrative data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPathLabels {
    pub employment: String,
    pub graduate_school: String,
    pub overseas: String,
}

impl Default for CareerPathLabels {
    fn default() -> Self {
        Self {
            employment: "就业".to_string(),
            graduate_school: "考研".to_string(),
            overseas: "出国".to_string(),
        }
    }
}

/// Tunables and injected tables for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: SimilarityWeights,
    pub recommend_limit: usize,
    /// GPA window for outcome prediction cohorts.
    pub gpa_tolerance: f64,
    /// GPA window for closeness-based selection.
    pub closeness_tolerance: f64,
    pub path_labels: CareerPathLabels,
    pub catalog: GuidanceCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            recommend_limit: 5,
            gpa_tolerance: 0.5,
            closeness_tolerance: 0.5,
            path_labels: CareerPathLabels::default(),
            catalog: GuidanceCatalog::default(),
        }
    }
}

/// Stateless facade over the scoring components. Every operation reads the
/// snapshot it is handed and nothing else.
#[derive(Debug, Clone)]
pub struct GuidanceEngine {
    recommender: RankedRecommender,
    predictor: OutcomeFrequencyPredictor,
    classifier: QuestionnaireClassifier,
    aggregator: StatisticsAggregator,
    config: EngineConfig,
}

impl GuidanceEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ValidationError> {
        let calculator = SimilarityCalculator::new(config.weights)?;
        let recommender = RankedRecommender::new(calculator, config.closeness_tolerance);
        let classifier = QuestionnaireClassifier::new(
            config.catalog.careers.clone(),
            config.catalog.personalities.clone(),
        );

        Ok(Self {
            recommender,
            predictor: OutcomeFrequencyPredictor::new(),
            classifier,
            aggregator: StatisticsAggregator::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn similarity(
        &self,
        user: &UserProfile,
        record: &GraduateRecord,
    ) -> Result<f64, ValidationError> {
        self.recommender.calculator().similarity(user, record)
    }

    pub fn recommend<'a>(
        &self,
        user: &UserProfile,
        corpus: &'a [GraduateRecord],
        limit: usize,
    ) -> Result<Vec<SimilarityResult<'a>>, ValidationError> {
        self.recommender.recommend(user, corpus, limit)
    }

    pub fn closest<'a>(
        &self,
        user: &UserProfile,
        corpus: &'a [GraduateRecord],
        limit: usize,
    ) -> Result<Vec<ClosenessMatch<'a>>, ValidationError> {
        self.recommender.closest(user, corpus, limit)
    }

    pub fn predict(
        &self,
        user: &UserProfile,
        corpus: &[GraduateRecord],
        path_filter: &str,
        gpa_tolerance: f64,
    ) -> Result<OutcomeDistribution, ValidationError> {
        self.predictor.predict(user, corpus, path_filter, gpa_tolerance)
    }

    pub fn predict_within_major(
        &self,
        user: &UserProfile,
        corpus: &[GraduateRecord],
        path_filter: &str,
    ) -> Result<OutcomeDistribution, ValidationError> {
        self.predictor.predict_scoped(
            user,
            corpus,
            path_filter,
            self.config.gpa_tolerance,
            CohortScope::SameMajor,
        )
    }

    pub fn classify_personality(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<PersonalityResult, ValidationError> {
        self.classifier.classify_personality(answers)
    }

    pub fn classify_career_interest(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<InterestResult, ValidationError> {
        self.classifier.classify_career_interest(answers)
    }

    pub fn compute_statistics(
        &self,
        corpus: &[GraduateRecord],
    ) -> Result<CorpusStatistics, ValidationError> {
        self.aggregator.aggregate(corpus)
    }
}
