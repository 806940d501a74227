mod common;
mod questionnaire;
