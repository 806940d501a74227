use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Identifier wrapper for historical graduate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraduateId(pub u64);

/// Account identifier used to look up the subject of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(pub String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Historical graduate entry. Entered administratively and read-only to the engine.
///
/// Most fields are optional because the administrative data is incomplete in
/// practice; operations that need a field report its absence as a
/// [`ValidationError`] instead of substituting a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduateRecord {
    pub id: GraduateId,
    pub name: String,
    pub major: Option<String>,
    pub graduation_year: Option<String>,
    pub career_path: Option<String>,
    pub workplace: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub gpa: Option<f64>,
    pub awards: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub experience_type: Option<String>,
}

impl GraduateRecord {
    /// Label used in validation errors so operators can locate the bad row.
    pub fn subject(&self) -> String {
        format!("graduate #{} ({})", self.id.0, self.name)
    }

    pub fn require_major(&self) -> Result<&str, ValidationError> {
        self.major
            .as_deref()
            .ok_or_else(|| ValidationError::missing(self.subject(), "major"))
    }

    pub fn require_gpa(&self) -> Result<f64, ValidationError> {
        self.gpa
            .ok_or_else(|| ValidationError::missing(self.subject(), "gpa"))
    }

    /// Value of a categorical grouping field, failing when it is absent.
    pub fn require_field(&self, field: GroupingField) -> Result<&str, ValidationError> {
        let value = match field {
            GroupingField::CareerPath => self.career_path.as_deref(),
            GroupingField::Major => self.major.as_deref(),
            GroupingField::Location => self.location.as_deref(),
            GroupingField::Workplace => self.workplace.as_deref(),
        };
        value.ok_or_else(|| ValidationError::missing(self.subject(), field.label()))
    }
}

/// Categorical fields the statistics and prediction components group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingField {
    CareerPath,
    Major,
    Location,
    Workplace,
}

impl GroupingField {
    pub fn ordered() -> [GroupingField; 4] {
        [
            GroupingField::CareerPath,
            GroupingField::Major,
            GroupingField::Location,
            GroupingField::Workplace,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupingField::CareerPath => "career_path",
            GroupingField::Major => "major",
            GroupingField::Location => "location",
            GroupingField::Workplace => "workplace",
        }
    }
}

/// Mutable subject of recommendation, owned by the account system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Username,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub career_interests: Option<String>,
    /// Free text listing awards and skills.
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub career_interest_categories: Option<Vec<String>>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Username::new(username),
            major: None,
            gpa: None,
            career_interests: None,
            awards: None,
            personality_type: None,
            career_interest_categories: None,
        }
    }

    pub fn subject(&self) -> String {
        format!("user {}", self.username)
    }

    pub fn require_major(&self) -> Result<&str, ValidationError> {
        self.major
            .as_deref()
            .ok_or_else(|| ValidationError::missing(self.subject(), "major"))
    }

    pub fn require_gpa(&self) -> Result<f64, ValidationError> {
        self.gpa
            .ok_or_else(|| ValidationError::missing(self.subject(), "gpa"))
    }
}

/// One entry of a submitted questionnaire. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question_id: u32,
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(question_id: u32, answer: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: answer.into(),
        }
    }

    /// Builds an ordered answer sheet from raw answers, numbering questions from 1.
    pub fn sequence<I, S>(answers: I) -> Vec<QuestionAnswer>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        answers
            .into_iter()
            .enumerate()
            .map(|(index, answer)| QuestionAnswer::new(index as u32 + 1, answer))
            .collect()
    }
}

/// Optional narrowing applied when reading the graduate corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusFilter {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub career_path: Option<String>,
    #[serde(default)]
    pub experience_type: Option<String>,
}

impl CorpusFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn major(major: impl Into<String>) -> Self {
        Self {
            major: Some(major.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &GraduateRecord) -> bool {
        fn accepts(expected: &Option<String>, actual: &Option<String>) -> bool {
            match expected {
                Some(expected) => actual.as_deref() == Some(expected.as_str()),
                None => true,
            }
        }

        accepts(&self.major, &record.major)
            && accepts(&self.career_path, &record.career_path)
            && accepts(&self.experience_type, &record.experience_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(major: Option<&str>, path: Option<&str>, experience: Option<&str>) -> GraduateRecord {
        GraduateRecord {
            id: GraduateId(1),
            name: "Li Wei".to_string(),
            major: major.map(str::to_string),
            graduation_year: None,
            career_path: path.map(str::to_string),
            workplace: None,
            position: None,
            location: None,
            gpa: None,
            awards: None,
            skills: None,
            experience: None,
            experience_type: experience.map(str::to_string),
        }
    }

    #[test]
    fn unrestricted_filter_matches_every_record() {
        let filter = CorpusFilter::all();
        assert!(filter.matches(&record(Some("CS"), Some("出国"), Some("internship"))));
        assert!(filter.matches(&record(None, None, None)));
    }

    #[test]
    fn each_field_narrows_on_its_own() {
        let graduate = record(Some("CS"), Some("考研"), Some("internship"));

        assert!(CorpusFilter::major("CS").matches(&graduate));
        assert!(!CorpusFilter::major("EE").matches(&graduate));

        let by_path = CorpusFilter {
            career_path: Some("考研".to_string()),
            ..CorpusFilter::default()
        };
        assert!(by_path.matches(&graduate));
        let other_path = CorpusFilter {
            career_path: Some("就业".to_string()),
            ..CorpusFilter::default()
        };
        assert!(!other_path.matches(&graduate));

        let by_experience = CorpusFilter {
            experience_type: Some("research".to_string()),
            ..CorpusFilter::default()
        };
        assert!(!by_experience.matches(&graduate));
        assert!(by_experience.matches(&record(Some("CS"), Some("考研"), Some("research"))));
    }

    #[test]
    fn absent_field_never_matches_a_restriction() {
        let graduate = record(Some("CS"), None, None);

        let filter = CorpusFilter {
            major: Some("CS".to_string()),
            experience_type: Some("internship".to_string()),
            ..CorpusFilter::default()
        };
        assert!(!filter.matches(&graduate));
    }
}
