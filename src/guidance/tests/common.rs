use std::sync::Arc;

use crate::guidance::domain::{GraduateId, GraduateRecord, UserProfile};
use crate::guidance::engine::{EngineConfig, GuidanceEngine};
use crate::guidance::repository::{InMemoryGraduateCorpus, InMemoryProfileRepository};
use crate::guidance::service::GuidanceService;

pub(super) type TestService = GuidanceService<InMemoryProfileRepository, InMemoryGraduateCorpus>;

pub(super) fn graduate(
    id: u64,
    major: &str,
    gpa: f64,
    career_path: &str,
    workplace: &str,
) -> GraduateRecord {
    GraduateRecord {
        id: GraduateId(id),
        name: format!("Graduate {id}"),
        major: Some(major.to_string()),
        graduation_year: Some("2023".to_string()),
        career_path: Some(career_path.to_string()),
        workplace: Some(workplace.to_string()),
        position: None,
        location: Some("Beijing".to_string()),
        gpa: Some(gpa),
        awards: None,
        skills: None,
        experience: None,
        experience_type: Some("internship".to_string()),
    }
}

pub(super) fn with_skills(mut record: GraduateRecord, skills: &str) -> GraduateRecord {
    record.skills = Some(skills.to_string());
    record
}

pub(super) fn student(username: &str, major: &str, gpa: f64) -> UserProfile {
    let mut profile = UserProfile::new(username);
    profile.major = Some(major.to_string());
    profile.gpa = Some(gpa);
    profile
}

/// Mixed corpus: two majors, all three career paths.
pub(super) fn corpus() -> Vec<GraduateRecord> {
    vec![
        with_skills(graduate(1, "CS", 3.6, "考研", "Tsinghua University"), "rust, sql"),
        with_skills(graduate(2, "CS", 3.4, "出国", "University College London"), "python"),
        with_skills(graduate(3, "CS", 2.9, "就业", "Huawei"), "java, sql"),
        graduate(4, "EE", 3.5, "考研", "Peking University"),
        graduate(5, "CS", 3.8, "出国", "Columbia University"),
        graduate(6, "EE", 3.1, "就业", "ZTE"),
    ]
}

pub(super) fn engine() -> GuidanceEngine {
    GuidanceEngine::new(EngineConfig::default()).expect("default weights are valid")
}

pub(super) fn service(
    profiles: Vec<UserProfile>,
    records: Vec<GraduateRecord>,
) -> (Arc<InMemoryProfileRepository>, TestService) {
    let repository = Arc::new(InMemoryProfileRepository::new(profiles));
    let corpus = Arc::new(InMemoryGraduateCorpus::new(records));
    let service = GuidanceService::new(repository.clone(), corpus, engine());
    (repository, service)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
