use super::common::engine;
use crate::guidance::catalog::CareerCatalog;
use crate::guidance::domain::QuestionAnswer;
use crate::guidance::error::ValidationError;
use crate::guidance::questionnaire::InterestCategory;

fn sheet(answers: &[&str]) -> Vec<QuestionAnswer> {
    QuestionAnswer::sequence(answers.iter().copied())
}

fn repeated(answer: &str, count: usize) -> Vec<QuestionAnswer> {
    QuestionAnswer::sequence(std::iter::repeat(answer).take(count))
}

#[test]
fn all_first_pole_answers_classify_as_estj() {
    let engine = engine();
    let answers = repeated("A", 40);

    let first = engine.classify_personality(&answers).expect("valid sheet");
    let second = engine.classify_personality(&answers).expect("valid sheet");

    assert_eq!(first.code, "ESTJ");
    assert_eq!(first.axis_scores, [10, 10, 10, 10]);
    assert_eq!(first, second);
    assert_ne!(first.description, "Unknown type");
}

#[test]
fn all_second_pole_answers_classify_as_infp() {
    let result = engine()
        .classify_personality(&repeated("b", 40))
        .expect("valid sheet");
    assert_eq!(result.code, "INFP");
}

#[test]
fn pole_letters_and_ties_resolve_per_axis() {
    let mut answers = Vec::new();
    answers.extend(std::iter::repeat("E").take(6));
    answers.extend(std::iter::repeat("I").take(4));
    answers.extend(std::iter::repeat("S").take(5));
    answers.extend(std::iter::repeat("N").take(5));
    answers.extend(std::iter::repeat("F").take(10));

    let result = engine()
        .classify_personality(&QuestionAnswer::sequence(answers))
        .expect("valid sheet");

    // Unanswered fourth axis tallies zero and falls to its second pole.
    assert_eq!(result.code, "ENFP");
    assert_eq!(result.axis_scores, [2, 0, -10, 0]);
}

#[test]
fn pole_letters_count_on_their_own_axis() {
    // Five E/I, three S/N, two T/F and two J/P questions.
    let answers = sheet(&["E", "E", "E", "I", "E", "S", "S", "N", "T", "T", "J", "J"]);

    let result = engine().classify_personality(&answers).expect("valid sheet");

    assert_eq!(result.code, "ESTJ");
    assert_eq!(result.axis_scores, [3, 1, 2, 2]);
}

#[test]
fn short_letter_sheet_breaks_ties_toward_second_pole() {
    let answers = sheet(&["E", "E", "I", "E", "E", "S", "N", "S", "T", "F", "J", "P"]);

    let result = engine().classify_personality(&answers).expect("valid sheet");

    assert_eq!(result.code, "ESFP");
    assert_eq!(result.axis_scores, [3, 1, 0, 0]);
}

#[test]
fn positional_and_letter_answers_mix_on_the_same_axis() {
    let result = engine()
        .classify_personality(&sheet(&["A", "i", "I", "n"]))
        .expect("valid sheet");

    assert_eq!(result.axis_scores, [-1, -1, 0, 0]);
    assert_eq!(result.code, "INFP");
}

#[test]
fn unknown_tokens_are_rejected_with_their_position() {
    let engine = engine();

    assert_eq!(
        engine.classify_personality(&sheet(&["E", "S", "X"])),
        Err(ValidationError::UnparseableAnswer {
            question_index: 2,
            question_id: 3,
            raw: "X".to_string(),
        })
    );
    assert!(matches!(
        engine.classify_personality(&sheet(&["EI"])),
        Err(ValidationError::UnparseableAnswer {
            question_index: 0,
            ..
        })
    ));
}

#[test]
fn personality_sheet_longer_than_forty_is_rejected() {
    assert!(matches!(
        engine().classify_personality(&repeated("A", 41)),
        Err(ValidationError::QuestionOutOfRange {
            question_index: 40,
            questions: 40,
            ..
        })
    ));
}

#[test]
fn empty_sheets_are_rejected() {
    let engine = engine();
    assert_eq!(
        engine.classify_personality(&[]),
        Err(ValidationError::EmptyQuestionnaire)
    );
    assert_eq!(
        engine.classify_career_interest(&[]),
        Err(ValidationError::EmptyQuestionnaire)
    );
}

#[test]
fn interest_scores_cycle_through_categories() {
    let answers = sheet(&["1", "5", "2", "4", "3", "1", "1", "5", "2", "4", "3", "1"]);

    let result = engine()
        .classify_career_interest(&answers)
        .expect("valid sheet");

    assert_eq!(result.holland_code, "ISE");
    assert_eq!(result.dominant, InterestCategory::Investigative);
    assert_eq!(result.categories, vec!["Investigative", "Social", "Enterprising"]);
    assert_eq!(
        result.careers,
        CareerCatalog::default()
            .careers_for(InterestCategory::Investigative)
            .to_vec()
    );
    assert_eq!(result.ranking[0].score, 10);
}

#[test]
fn interest_ties_favour_earlier_categories() {
    let result = engine()
        .classify_career_interest(&repeated("3", 12))
        .expect("valid sheet");

    assert_eq!(result.holland_code, "RIA");
    assert_eq!(result.dominant, InterestCategory::Realistic);
}

#[test]
fn dominant_category_may_come_last_in_order() {
    let result = engine()
        .classify_career_interest(&sheet(&["1", "1", "1", "1", "1", "5"]))
        .expect("valid sheet");

    assert_eq!(result.dominant, InterestCategory::Conventional);
    assert_eq!(result.holland_code, "CRI");
}

#[test]
fn malformed_interest_answers_report_their_position() {
    let engine = engine();

    assert_eq!(
        engine.classify_career_interest(&sheet(&["3", "4", "2", "x"])),
        Err(ValidationError::UnparseableAnswer {
            question_index: 3,
            question_id: 4,
            raw: "x".to_string(),
        })
    );
    assert_eq!(
        engine.classify_career_interest(&sheet(&["3", "6"])),
        Err(ValidationError::AnswerOutOfRange {
            question_index: 1,
            question_id: 2,
            value: 6,
        })
    );
    assert!(matches!(
        engine.classify_career_interest(&sheet(&["0"])),
        Err(ValidationError::AnswerOutOfRange { value: 0, .. })
    ));
}
