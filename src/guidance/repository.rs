use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use super::domain::{CorpusFilter, GraduateRecord, UserProfile, Username};

/// Classification written back onto a profile after a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileUpdate {
    PersonalityType(String),
    CareerInterestCategories(Vec<String>),
}

impl ProfileUpdate {
    pub fn apply_to(self, profile: &mut UserProfile) {
        match self {
            ProfileUpdate::PersonalityType(code) => profile.personality_type = Some(code),
            ProfileUpdate::CareerInterestCategories(categories) => {
                profile.career_interest_categories = Some(categories)
            }
        }
    }
}

/// Account-side storage of user profiles.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, username: &Username) -> Result<Option<UserProfile>, RepositoryError>;

    /// Applies `update` as one read-modify-write, returning the stored profile.
    /// Implementations serialize concurrent updates to the same user.
    fn apply(
        &self,
        username: &Username,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError>;
}

/// Read-only source of graduate snapshots.
pub trait GraduateCorpus: Send + Sync {
    fn snapshot(&self, filter: &CorpusFilter) -> Result<Vec<GraduateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<Mutex<BTreeMap<Username, UserProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.username.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    /// Copy of every stored profile, ordered by username.
    pub fn profiles(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, username: &Username) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().map_err(|_| poisoned())?;
        Ok(guard.get(username).cloned())
    }

    fn apply(
        &self,
        username: &Username,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().map_err(|_| poisoned())?;
        let profile = guard.get_mut(username).ok_or(RepositoryError::NotFound)?;
        update.apply_to(profile);
        Ok(profile.clone())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryGraduateCorpus {
    records: Arc<RwLock<Vec<GraduateRecord>>>,
}

impl InMemoryGraduateCorpus {
    pub fn new(records: Vec<GraduateRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl GraduateCorpus for InMemoryGraduateCorpus {
    fn snapshot(&self, filter: &CorpusFilter) -> Result<Vec<GraduateRecord>, RepositoryError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}
