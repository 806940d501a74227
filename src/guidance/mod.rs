//! Recommendation, prediction, and questionnaire classification over a
//! read-only snapshot of graduate records.

pub mod catalog;
pub mod domain;
mod engine;
pub mod error;
pub mod import;
pub mod kernel;
pub mod prediction;
pub mod questionnaire;
pub mod recommender;
pub mod repository;
mod service;
pub mod similarity;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use catalog::{
    CareerCatalog, DefaultRecommendations, GuidanceCatalog, PersonalityCatalog, Recommendation,
};
pub use domain::{
    CorpusFilter, GraduateId, GraduateRecord, GroupingField, QuestionAnswer, UserProfile,
    Username,
};
pub use engine::{CareerPathLabels, EngineConfig, GuidanceEngine};
pub use error::{GuidanceError, ValidationError};
pub use prediction::{CohortScope, OutcomeDistribution, OutcomeFrequencyPredictor};
pub use questionnaire::{
    InterestCategory, InterestResult, PersonalityResult, QuestionnaireClassifier,
};
pub use recommender::{ClosenessMatch, RankedRecommender, SimilarityResult};
pub use repository::{
    GraduateCorpus, InMemoryGraduateCorpus, InMemoryProfileRepository, ProfileRepository,
    ProfileUpdate, RepositoryError,
};
pub use service::{GuidanceBundle, GuidanceService, ScoredGraduate};
pub use similarity::{SimilarityCalculator, SimilarityWeights};
pub use statistics::{CorpusStatistics, StatisticsAggregator};
