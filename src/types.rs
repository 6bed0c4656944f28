//! Core question types and their on-disk record shape
//!
//! In memory a question is a tagged variant; on disk it is a flat record with
//! a `question_type` discriminator, matching the historical store format.
//! Early versions of the store sometimes wrapped `choices` in an extra
//! single-element list (`[["a","b"]]`, or `[null]` for short answers); that
//! shape is accepted on read and always rewritten flat.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::normalize::normalize;

/// Fixed choice set for True/False questions.
pub const TRUE_FALSE_CHOICES: [&str; 2] = ["True", "False"];

/// A validated question item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    ShortAnswer {
        question: String,
        answer: String,
    },
    MultipleChoice {
        question: String,
        answer: String,
        choices: Vec<String>,
    },
    TrueFalse {
        question: String,
        answer: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    ShortAnswer,
    MultipleChoice,
    TrueFalse,
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::ShortAnswer => "Short Answer",
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
        }
    }
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::ShortAnswer { .. } => QuestionKind::ShortAnswer,
            Question::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Question::TrueFalse { .. } => QuestionKind::TrueFalse,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            Question::ShortAnswer { question, .. }
            | Question::MultipleChoice { question, .. }
            | Question::TrueFalse { question, .. } => question,
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            Question::ShortAnswer { answer, .. }
            | Question::MultipleChoice { answer, .. }
            | Question::TrueFalse { answer, .. } => answer,
        }
    }

    /// Options the host should offer for this question, or `None` for free
    /// text input. The order is storage order; hosts shuffle for display.
    pub fn choices(&self) -> Option<Vec<String>> {
        match self {
            Question::ShortAnswer { .. } => None,
            Question::MultipleChoice { choices, .. } => Some(choices.clone()),
            Question::TrueFalse { .. } => {
                Some(TRUE_FALSE_CHOICES.iter().map(|s| s.to_string()).collect())
            }
        }
    }

    /// Check the storage invariants: non-empty question and answer after
    /// normalization, and for multiple choice a choice list that contains
    /// the answer exactly once (case-sensitive).
    pub fn validate(&self) -> Result<(), CoreError> {
        if normalize(self.question()).is_empty() {
            return Err(CoreError::ValidationFailed(
                "question text is empty".to_string(),
            ));
        }
        if normalize(self.answer()).is_empty() {
            return Err(CoreError::ValidationFailed("answer is empty".to_string()));
        }
        match self {
            Question::MultipleChoice { answer, choices, .. } => {
                if choices.is_empty() {
                    return Err(CoreError::ValidationFailed(
                        "multiple choice question has no choices".to_string(),
                    ));
                }
                let hits = choices.iter().filter(|c| *c == answer).count();
                if hits != 1 {
                    return Err(CoreError::ValidationFailed(format!(
                        "answer must appear in choices exactly once, found {} times",
                        hits
                    )));
                }
            }
            Question::TrueFalse { answer, .. } => {
                if !TRUE_FALSE_CHOICES.contains(&answer.as_str()) {
                    return Err(CoreError::ValidationFailed(format!(
                        "true/false answer must be \"True\" or \"False\", got {:?}",
                        answer
                    )));
                }
            }
            Question::ShortAnswer { .. } => {}
        }
        Ok(())
    }
}

/// On-disk record. The store is a JSON array of these, rewritten in full on
/// every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_type: String,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<ChoicesField>,
}

/// The `choices` field as found in the wild: either the canonical flat list
/// or the legacy single-element wrapper (possibly wrapping null).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoicesField {
    Flat(Vec<String>),
    Nested(Vec<Option<Vec<String>>>),
}

impl ChoicesField {
    /// Unwrap the legacy nesting; canonical flat lists pass through.
    fn into_flat(self) -> Option<Vec<String>> {
        match self {
            ChoicesField::Flat(choices) => Some(choices),
            ChoicesField::Nested(wrapped) => wrapped.into_iter().flatten().next(),
        }
    }
}

impl From<&Question> for QuestionRecord {
    fn from(q: &Question) -> Self {
        let choices = match q {
            Question::ShortAnswer { .. } => None,
            Question::MultipleChoice { choices, .. } => {
                Some(ChoicesField::Flat(choices.clone()))
            }
            Question::TrueFalse { .. } => Some(ChoicesField::Flat(
                TRUE_FALSE_CHOICES.iter().map(|s| s.to_string()).collect(),
            )),
        };
        QuestionRecord {
            question_type: q.kind().name().to_string(),
            question: q.question().to_string(),
            answer: q.answer().to_string(),
            choices,
        }
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = CoreError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let QuestionRecord {
            question_type,
            question,
            answer,
            choices,
        } = record;

        let q = match question_type.as_str() {
            "Short Answer" => Question::ShortAnswer { question, answer },
            "True/False" => Question::TrueFalse { question, answer },
            "Multiple Choice" => {
                let choices = choices.and_then(ChoicesField::into_flat).ok_or_else(|| {
                    CoreError::ValidationFailed(
                        "multiple choice record has no choices".to_string(),
                    )
                })?;
                Question::MultipleChoice {
                    question,
                    answer,
                    choices,
                }
            }
            other => {
                return Err(CoreError::ValidationFailed(format!(
                    "unknown question type {:?}",
                    other
                )))
            }
        };
        q.validate()?;
        Ok(q)
    }
}
