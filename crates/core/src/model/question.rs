use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("answer options cannot be empty")]
    EmptyOption,

    #[error("duplicate answer option: {0}")]
    DuplicateOption(String),

    #[error("correct answer is not one of the options")]
    AnswerNotInOptions,
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as produced by a question source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, options: I, correct_answer: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Validate the draft and assign it an identifier.
    ///
    /// The prompt is trimmed; options are kept verbatim so that the correct
    /// answer compares exactly against what the player selects.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options,
    /// an option is blank or repeated, or the correct answer is not offered.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption);
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }

        if !seen.contains(self.correct_answer.as_str()) {
            return Err(QuestionError::AnswerNotInOptions);
        }

        Ok(Question {
            id,
            prompt,
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

/// A single multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answer options in presentation order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft::new("Capital of France?", ["Paris", "Rome", "Berlin"], "Paris")
    }

    #[test]
    fn valid_question_keeps_option_order() {
        let id = QuestionId::generate();
        let question = draft().validate(id).unwrap();

        assert_eq!(question.id(), id);
        assert_eq!(question.prompt(), "Capital of France?");
        assert_eq!(question.options(), ["Paris", "Rome", "Berlin"]);
        assert!(question.is_correct("Paris"));
        assert!(!question.is_correct("Rome"));
    }

    #[test]
    fn prompt_is_trimmed_and_required() {
        let mut blank = draft();
        blank.prompt = "   ".into();
        assert_eq!(
            blank.validate(QuestionId::generate()).unwrap_err(),
            QuestionError::EmptyPrompt
        );

        let mut padded = draft();
        padded.prompt = "  Capital?  ".into();
        let question = padded.validate(QuestionId::generate()).unwrap();
        assert_eq!(question.prompt(), "Capital?");
    }

    #[test]
    fn rejects_missing_or_blank_options() {
        let none = QuestionDraft::new("Q", Vec::<String>::new(), "A");
        assert_eq!(
            none.validate(QuestionId::generate()).unwrap_err(),
            QuestionError::NoOptions
        );

        let blank = QuestionDraft::new("Q", ["A", " "], "A");
        assert_eq!(
            blank.validate(QuestionId::generate()).unwrap_err(),
            QuestionError::EmptyOption
        );
    }

    #[test]
    fn rejects_duplicate_options() {
        let dup = QuestionDraft::new("Q", ["A", "B", "A"], "A");
        assert_eq!(
            dup.validate(QuestionId::generate()).unwrap_err(),
            QuestionError::DuplicateOption("A".into())
        );
    }

    #[test]
    fn correct_answer_must_be_offered() {
        let missing = QuestionDraft::new("Q", ["A", "B"], "C");
        assert_eq!(
            missing.validate(QuestionId::generate()).unwrap_err(),
            QuestionError::AnswerNotInOptions
        );
    }
}
