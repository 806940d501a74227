use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::Recommendation;
use super::domain::{CorpusFilter, GraduateRecord, QuestionAnswer, UserProfile, Username};
use super::engine::GuidanceEngine;
use super::error::GuidanceError;
use super::prediction::OutcomeDistribution;
use super::questionnaire::{InterestResult, PersonalityResult};
use super::repository::{GraduateCorpus, ProfileRepository, ProfileUpdate, RepositoryError};
use super::statistics::CorpusStatistics;

/// Graduate record with the similarity score it earned for the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredGraduate {
    pub score: f64,
    pub record: GraduateRecord,
}

/// Default direction tables combined with the user's most similar cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceBundle {
    pub employment: Vec<Recommendation>,
    pub graduate_school: Vec<Recommendation>,
    pub overseas: Vec<Recommendation>,
    pub similar_cases: Vec<ScoredGraduate>,
}

/// Request-facing operations composing the profile store, the corpus, and the engine.
pub struct GuidanceService<P, C> {
    profiles: Arc<P>,
    corpus: Arc<C>,
    engine: Arc<GuidanceEngine>,
}

impl<P, C> GuidanceService<P, C>
where
    P: ProfileRepository + 'static,
    C: GraduateCorpus + 'static,
{
    pub fn new(profiles: Arc<P>, corpus: Arc<C>, engine: GuidanceEngine) -> Self {
        Self {
            profiles,
            corpus,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &GuidanceEngine {
        &self.engine
    }

    /// Most similar past graduates, best first. `None` uses the configured limit.
    pub fn recommend_similar(
        &self,
        username: &Username,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredGraduate>, GuidanceError> {
        let limit = limit.unwrap_or(self.engine.config().recommend_limit);
        info!(%username, limit, "ranking similar graduates");

        let user = self.profile(username)?;
        let corpus = self.corpus.snapshot(&CorpusFilter::all())?;
        let ranked = self.engine.recommend(&user, &corpus, limit)?;

        debug!(%username, corpus = corpus.len(), returned = ranked.len(), "ranking complete");
        Ok(ranked
            .into_iter()
            .map(|result| ScoredGraduate {
                score: result.score,
                record: result.record.clone(),
            })
            .collect())
    }

    /// Same-major graduates whose GPA is closest to the user's.
    pub fn closest_graduates(
        &self,
        username: &Username,
        limit: Option<usize>,
    ) -> Result<Vec<GraduateRecord>, GuidanceError> {
        let limit = limit.unwrap_or(self.engine.config().recommend_limit);
        info!(%username, limit, "selecting closest graduates");

        let user = self.profile(username)?;
        let major = user.require_major()?.to_string();
        let corpus = self.corpus.snapshot(&CorpusFilter::major(major))?;
        let matches = self.engine.closest(&user, &corpus, limit)?;

        Ok(matches
            .into_iter()
            .map(|candidate| candidate.record.clone())
            .collect())
    }

    /// Graduate records narrowed by major, career path, and experience type.
    pub fn graduates(&self, filter: &CorpusFilter) -> Result<Vec<GraduateRecord>, GuidanceError> {
        let records = self.corpus.snapshot(filter)?;
        info!(?filter, returned = records.len(), "listing graduates");
        Ok(records)
    }

    /// Destination probabilities among graduates on `path_filter` with a similar GPA.
    pub fn predict_outcome(
        &self,
        username: &Username,
        path_filter: &str,
        gpa_tolerance: Option<f64>,
    ) -> Result<OutcomeDistribution, GuidanceError> {
        let tolerance = gpa_tolerance.unwrap_or(self.engine.config().gpa_tolerance);
        info!(%username, path_filter, tolerance, "predicting outcome");

        let user = self.profile(username)?;
        let corpus = self.corpus.snapshot(&CorpusFilter::all())?;
        let distribution = self
            .engine
            .predict(&user, &corpus, path_filter, tolerance)?;

        self.log_distribution(username, path_filter, &distribution);
        Ok(distribution)
    }

    /// Admitted graduate schools among same-major peers.
    pub fn predict_graduate_school(
        &self,
        username: &Username,
    ) -> Result<OutcomeDistribution, GuidanceError> {
        let path = self.engine.config().path_labels.graduate_school.clone();
        self.predict_within_major(username, &path)
    }

    /// Overseas universities among same-major peers.
    pub fn predict_overseas(
        &self,
        username: &Username,
    ) -> Result<OutcomeDistribution, GuidanceError> {
        let path = self.engine.config().path_labels.overseas.clone();
        self.predict_within_major(username, &path)
    }

    fn predict_within_major(
        &self,
        username: &Username,
        path: &str,
    ) -> Result<OutcomeDistribution, GuidanceError> {
        info!(%username, path, "predicting outcome within major");

        let user = self.profile(username)?;
        let filter = CorpusFilter {
            major: Some(user.require_major()?.to_string()),
            career_path: Some(path.to_string()),
            experience_type: None,
        };
        let corpus = self.corpus.snapshot(&filter)?;
        let distribution = self.engine.predict_within_major(&user, &corpus, path)?;

        self.log_distribution(username, path, &distribution);
        Ok(distribution)
    }

    pub fn classify_personality(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<PersonalityResult, GuidanceError> {
        Ok(self.engine.classify_personality(answers)?)
    }

    pub fn classify_career_interest(
        &self,
        answers: &[QuestionAnswer],
    ) -> Result<InterestResult, GuidanceError> {
        Ok(self.engine.classify_career_interest(answers)?)
    }

    /// Classifies the answers and stores the code on the user's profile.
    pub fn submit_personality_test(
        &self,
        username: &Username,
        answers: &[QuestionAnswer],
    ) -> Result<(PersonalityResult, UserProfile), GuidanceError> {
        info!(%username, answers = answers.len(), "processing personality test");

        let result = self.engine.classify_personality(answers)?;
        let profile = self.write_back(
            username,
            ProfileUpdate::PersonalityType(result.code.clone()),
        )?;

        info!(%username, code = %result.code, "personality type recorded");
        Ok((result, profile))
    }

    /// Classifies the answers and stores the leading categories on the user's profile.
    pub fn submit_career_interest_test(
        &self,
        username: &Username,
        answers: &[QuestionAnswer],
    ) -> Result<(InterestResult, UserProfile), GuidanceError> {
        info!(%username, answers = answers.len(), "processing career interest test");

        let result = self.engine.classify_career_interest(answers)?;
        let profile = self.write_back(
            username,
            ProfileUpdate::CareerInterestCategories(result.categories.clone()),
        )?;

        info!(%username, code = %result.holland_code, "career interests recorded");
        Ok((result, profile))
    }

    pub fn compute_statistics(&self) -> Result<CorpusStatistics, GuidanceError> {
        let corpus = self.corpus.snapshot(&CorpusFilter::all())?;
        info!(records = corpus.len(), "computing corpus statistics");
        Ok(self.engine.compute_statistics(&corpus)?)
    }

    /// Default direction tables plus the most similar past graduates.
    pub fn comprehensive_recommendations(
        &self,
        username: &Username,
        limit: Option<usize>,
    ) -> Result<GuidanceBundle, GuidanceError> {
        let similar_cases = self.recommend_similar(username, limit)?;
        let defaults = &self.engine.config().catalog.recommendations;

        Ok(GuidanceBundle {
            employment: defaults.employment.clone(),
            graduate_school: defaults.graduate_school.clone(),
            overseas: defaults.overseas.clone(),
            similar_cases,
        })
    }

    fn profile(&self, username: &Username) -> Result<UserProfile, GuidanceError> {
        self.profiles
            .fetch(username)?
            .ok_or_else(|| GuidanceError::UserNotFound {
                username: username.clone(),
            })
    }

    fn write_back(
        &self,
        username: &Username,
        update: ProfileUpdate,
    ) -> Result<UserProfile, GuidanceError> {
        self.profiles
            .apply(username, update)
            .map_err(|err| match err {
                RepositoryError::NotFound => GuidanceError::UserNotFound {
                    username: username.clone(),
                },
                other => GuidanceError::Repository(other),
            })
    }

    fn log_distribution(
        &self,
        username: &Username,
        path: &str,
        distribution: &OutcomeDistribution,
    ) {
        if distribution.is_empty() {
            warn!(%username, path, "no comparable graduates in cohort");
        } else {
            debug!(
                %username,
                path,
                cohort = distribution.cohort_size,
                destinations = distribution.probabilities.len(),
                "prediction complete"
            );
        }
    }
}
