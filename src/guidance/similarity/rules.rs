use super::super::domain::{GraduateRecord, UserProfile};
use super::super::error::ValidationError;
use super::super::kernel;
use super::config::SimilarityWeights;
use super::{SimilarityComponent, SimilaritySignal};

pub(crate) fn score_pair(
    user: &UserProfile,
    record: &GraduateRecord,
    weights: &SimilarityWeights,
) -> Result<Vec<SimilarityComponent>, ValidationError> {
    let mut components = Vec::with_capacity(4);

    let user_major = user.require_major()?;
    let record_major = record.require_major()?;
    if user_major == record_major {
        components.push(SimilarityComponent {
            signal: SimilaritySignal::Major,
            strength: 1.0,
            score: weights.major,
            notes: format!("both studied {record_major}"),
        });
    } else {
        components.push(SimilarityComponent {
            signal: SimilaritySignal::Major,
            strength: 0.0,
            score: 0.0,
            notes: format!("major {user_major} differs from {record_major}"),
        });
    }

    let user_gpa = user.require_gpa()?;
    let record_gpa = record.require_gpa()?;
    let closeness = kernel::closeness(user_gpa, record_gpa, weights.gpa_span);
    components.push(SimilarityComponent {
        signal: SimilaritySignal::Gpa,
        strength: closeness,
        score: weights.gpa * closeness,
        notes: format!(
            "gpa {:.2} vs {:.2} (closeness {:.2})",
            user_gpa, record_gpa, closeness
        ),
    });

    components.push(interest_component(user, record, weights));
    components.push(skill_component(user, record, weights));

    Ok(components)
}

fn interest_component(
    user: &UserProfile,
    record: &GraduateRecord,
    weights: &SimilarityWeights,
) -> SimilarityComponent {
    let path = record
        .career_path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty());

    match (user.career_interests.as_deref(), path) {
        (Some(interests), Some(path))
            if interests.to_lowercase().contains(&path.to_lowercase()) =>
        {
            SimilarityComponent {
                signal: SimilaritySignal::Interest,
                strength: 1.0,
                score: weights.interest,
                notes: format!("interests mention {path}"),
            }
        }
        (Some(_), Some(path)) => SimilarityComponent {
            signal: SimilaritySignal::Interest,
            strength: 0.0,
            score: 0.0,
            notes: format!("interests do not mention {path}"),
        },
        _ => SimilarityComponent {
            signal: SimilaritySignal::Interest,
            strength: 0.0,
            score: 0.0,
            notes: "career interests or path unavailable".to_string(),
        },
    }
}

fn skill_component(
    user: &UserProfile,
    record: &GraduateRecord,
    weights: &SimilarityWeights,
) -> SimilarityComponent {
    let tokens = skill_tokens(record.skills.as_deref().unwrap_or_default());
    if tokens.is_empty() {
        return SimilarityComponent {
            signal: SimilaritySignal::Skills,
            strength: 0.0,
            score: 0.0,
            notes: "graduate lists no skills".to_string(),
        };
    }

    let user_text = user
        .awards
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let matched = tokens
        .iter()
        .filter(|token| user_text.contains(token.as_str()))
        .count();

    let fraction = matched as f64 / tokens.len() as f64;
    SimilarityComponent {
        signal: SimilaritySignal::Skills,
        strength: fraction,
        score: weights.skills * fraction,
        notes: format!("{matched} of {} listed skills present", tokens.len()),
    }
}

/// Comma separated skills, trimmed and lower-cased. Blank entries are dropped.
pub(crate) fn skill_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
