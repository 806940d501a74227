use serde::{Deserialize, Serialize};

use super::super::domain::QuestionAnswer;
use super::super::error::ValidationError;

pub const QUESTIONS_PER_AXIS: usize = 10;

/// One binary personality dimension. The first pole wins on a positive tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityAxis {
    pub first: char,
    pub second: char,
}

/// Axes in the order their letters appear in the final code.
pub const AXES: [PersonalityAxis; 4] = [
    PersonalityAxis {
        first: 'E',
        second: 'I',
    },
    PersonalityAxis {
        first: 'S',
        second: 'N',
    },
    PersonalityAxis {
        first: 'T',
        second: 'F',
    },
    PersonalityAxis {
        first: 'J',
        second: 'P',
    },
];

impl PersonalityAxis {
    fn pole_vote(&self, letter: char) -> Option<i32> {
        if letter == self.first {
            Some(1)
        } else if letter == self.second {
            Some(-1)
        } else {
            None
        }
    }

    /// Ties resolve to the second pole.
    fn winner(&self, tally: i32) -> char {
        if tally > 0 {
            self.first
        } else {
            self.second
        }
    }
}

/// One parsed answer. A pole letter names its own axis; `A`/`B` count on the
/// axis given by the question position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Pole { axis: usize, vote: i32 },
    Positional(i32),
}

fn parse_vote(raw: &str) -> Option<Vote> {
    let mut chars = raw.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }

    match letter {
        'A' => Some(Vote::Positional(1)),
        'B' => Some(Vote::Positional(-1)),
        _ => AXES.iter().enumerate().find_map(|(axis, poles)| {
            poles.pole_vote(letter).map(|vote| Vote::Pole { axis, vote })
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTally {
    pub code: String,
    pub axis_scores: [i32; 4],
}

pub(crate) fn tally(answers: &[QuestionAnswer]) -> Result<PersonalityTally, ValidationError> {
    if answers.is_empty() {
        return Err(ValidationError::EmptyQuestionnaire);
    }

    let questions = AXES.len() * QUESTIONS_PER_AXIS;
    let mut axis_scores = [0i32; 4];

    for (question_index, answer) in answers.iter().enumerate() {
        if question_index >= questions {
            return Err(ValidationError::QuestionOutOfRange {
                question_index,
                question_id: answer.question_id,
                questions,
            });
        }

        let (axis_index, vote) = match parse_vote(&answer.answer) {
            Some(Vote::Pole { axis, vote }) => (axis, vote),
            Some(Vote::Positional(vote)) => (question_index / QUESTIONS_PER_AXIS, vote),
            None => {
                return Err(ValidationError::UnparseableAnswer {
                    question_index,
                    question_id: answer.question_id,
                    raw: answer.answer.clone(),
                })
            }
        };
        axis_scores[axis_index] += vote;
    }

    let code = AXES
        .iter()
        .zip(axis_scores)
        .map(|(axis, score)| axis.winner(score))
        .collect();

    Ok(PersonalityTally { code, axis_scores })
}
