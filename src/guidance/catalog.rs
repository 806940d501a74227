//! Hand-authored guidance tables injected into the engine.
//!
//! The built-in defaults can be replaced wholesale or per table by a JSON
//! document; missing tables fall back to their defaults.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::questionnaire::InterestCategory;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceCatalog {
    #[serde(default)]
    pub careers: CareerCatalog,
    #[serde(default)]
    pub personalities: PersonalityCatalog,
    #[serde(default)]
    pub recommendations: DefaultRecommendations,
}

impl GuidanceCatalog {
    pub fn from_json<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

/// Career labels suggested for each dominant interest category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerCatalog(pub BTreeMap<InterestCategory, Vec<String>>);

impl CareerCatalog {
    pub fn careers_for(&self, category: InterestCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for CareerCatalog {
    fn default() -> Self {
        let table: [(InterestCategory, [&str; 4]); 6] = [
            (
                InterestCategory::Realistic,
                [
                    "Mechanical Engineer",
                    "Civil Engineer",
                    "Electrical Technician",
                    "Network Administrator",
                ],
            ),
            (
                InterestCategory::Investigative,
                [
                    "Research Scientist",
                    "Data Analyst",
                    "Software Engineer",
                    "Laboratory Researcher",
                ],
            ),
            (
                InterestCategory::Artistic,
                [
                    "Product Designer",
                    "Copywriter",
                    "Architect",
                    "Media Producer",
                ],
            ),
            (
                InterestCategory::Social,
                ["Teacher", "Counselor", "Social Worker", "HR Specialist"],
            ),
            (
                InterestCategory::Enterprising,
                [
                    "Product Manager",
                    "Entrepreneur",
                    "Sales Manager",
                    "Management Consultant",
                ],
            ),
            (
                InterestCategory::Conventional,
                [
                    "Accountant",
                    "Auditor",
                    "Administrative Officer",
                    "Financial Analyst",
                ],
            ),
        ];

        Self(
            table
                .into_iter()
                .map(|(category, careers)| {
                    (category, careers.iter().map(|c| c.to_string()).collect())
                })
                .collect(),
        )
    }
}

/// Short description attached to each four-letter personality code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityCatalog {
    pub descriptions: BTreeMap<String, String>,
    pub fallback: String,
}

impl PersonalityCatalog {
    pub fn describe(&self, code: &str) -> &str {
        self.descriptions
            .get(code)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for PersonalityCatalog {
    fn default() -> Self {
        let table = [
            ("ESTJ", "Executive: organized administrator who enforces order"),
            ("ESTP", "Entrepreneur: energetic, pragmatic problem solver"),
            ("ESFJ", "Consul: caring organizer attentive to others"),
            ("ESFP", "Entertainer: spontaneous and people-oriented"),
            ("ENTJ", "Commander: decisive strategic leader"),
            ("ENTP", "Debater: inventive thinker who enjoys challenges"),
            ("ENFJ", "Protagonist: charismatic mentor and motivator"),
            ("ENFP", "Campaigner: enthusiastic, creative collaborator"),
            ("ISTJ", "Logistician: dependable, detail-focused planner"),
            ("ISTP", "Virtuoso: hands-on analyst of how things work"),
            ("ISFJ", "Defender: loyal protector of people and process"),
            ("ISFP", "Adventurer: gentle, flexible creator"),
            ("INTJ", "Architect: strategic thinker with an innovative streak"),
            ("INTP", "Logician: inventive theorist chasing elegant models"),
            ("INFJ", "Advocate: principled idealist with long-range vision"),
            ("INFP", "Mediator: reflective idealist guided by values"),
        ];

        Self {
            descriptions: table
                .into_iter()
                .map(|(code, description)| (code.to_string(), description.to_string()))
                .collect(),
            fallback: "Unknown type".to_string(),
        }
    }
}

/// Default suggestion shown for a destination direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Position for employment, programme for further study.
    pub title: String,
    /// Employer type or institution.
    pub organization: String,
    pub description: String,
}

impl Recommendation {
    fn new(title: &str, organization: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            organization: organization.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRecommendations {
    pub employment: Vec<Recommendation>,
    pub graduate_school: Vec<Recommendation>,
    pub overseas: Vec<Recommendation>,
}

impl Default for DefaultRecommendations {
    fn default() -> Self {
        Self {
            employment: vec![
                Recommendation::new(
                    "Product Manager",
                    "Internet company",
                    "Combines your academic background with an interest in shaping products.",
                ),
                Recommendation::new(
                    "Data Analyst",
                    "Large technology company",
                    "Suits a solid quantitative foundation and curiosity about data.",
                ),
            ],
            graduate_school: vec![
                Recommendation::new(
                    "Information Management and Information Systems",
                    "Tsinghua University",
                    "Research directions align closely with your interests.",
                ),
                Recommendation::new(
                    "Management Science and Engineering",
                    "Peking University",
                    "Interdisciplinary programme that fits a broad knowledge base.",
                ),
            ],
            overseas: vec![
                Recommendation::new(
                    "Information Management",
                    "Columbia University",
                    "Highly ranked programme in a strong job market.",
                ),
                Recommendation::new(
                    "Data Science",
                    "University College London",
                    "Leading programme matched to current hiring demand.",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_category_and_code() {
        let catalog = GuidanceCatalog::default();
        for category in InterestCategory::ordered() {
            assert!(!catalog.careers.careers_for(category).is_empty());
        }
        assert_eq!(catalog.personalities.descriptions.len(), 16);
        assert_eq!(catalog.personalities.describe("XXXX"), "Unknown type");
    }

    #[test]
    fn json_overrides_only_the_tables_it_names() {
        let json = r#"{
            "careers": { "Social": ["Librarian"] },
            "recommendations": {
                "employment": [],
                "graduate_school": [],
                "overseas": [
                    { "title": "Robotics", "organization": "ETH Zurich", "description": "-" }
                ]
            }
        }"#;

        let catalog = GuidanceCatalog::from_json(json.as_bytes()).expect("catalog parses");
        assert_eq!(
            catalog.careers.careers_for(InterestCategory::Social),
            ["Librarian".to_string()]
        );
        assert!(catalog
            .careers
            .careers_for(InterestCategory::Realistic)
            .is_empty());
        assert_eq!(catalog.recommendations.overseas[0].organization, "ETH Zurich");
        assert_eq!(catalog.personalities, PersonalityCatalog::default());
    }
}
