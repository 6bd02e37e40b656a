//! Question pool providers.
//!
//! A `QuestionSource` hands the engine a ready-to-play list: text decoded,
//! options shuffled, and the correct answer guaranteed among the options.
//! Sources never fail loudly; a broken bank yields an empty list, which the
//! engine treats as a game with no questions.

use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use trivia_core::model::{Difficulty, Question, QuestionDraft, QuestionId};

const MULTIPLE_CHOICE: &str = "multiple";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies the question pool for a new game.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load every question matching the filters, in no particular order.
    ///
    /// Returns an empty list when the source is missing or unreadable.
    async fn load(&self, multiple_choice_only: bool, difficulty: Difficulty) -> Vec<Question>;
}

//
// ─── OPEN TRIVIA DB PAYLOAD ────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct OpenTdbPayload {
    #[serde(default)]
    response_code: i64,
    results: Vec<OpenTdbRecord>,
}

#[derive(Debug, Deserialize)]
struct OpenTdbRecord {
    #[serde(rename = "type")]
    kind: String,
    difficulty: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl OpenTdbRecord {
    fn into_draft<R: Rng + ?Sized>(self, rng: &mut R) -> QuestionDraft {
        let correct_answer = decode(&self.correct_answer);
        let mut options: Vec<String> = std::iter::once(self.correct_answer.as_str())
            .chain(self.incorrect_answers.iter().map(String::as_str))
            .map(decode)
            .collect();
        options.shuffle(rng);

        QuestionDraft {
            prompt: decode(&self.question),
            options,
            correct_answer,
        }
    }
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Parse an Open Trivia DB response body into playable questions.
///
/// Records that fail validation after decoding (for example two options that
/// decode to the same text) are skipped.
///
/// # Errors
///
/// Returns `BankError::Json` if the payload is not a valid response body.
pub fn parse_open_tdb<R: Rng + ?Sized>(
    payload: &str,
    multiple_choice_only: bool,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<Question>, BankError> {
    let parsed: OpenTdbPayload = serde_json::from_str(payload)?;
    if parsed.response_code != 0 {
        debug!(code = parsed.response_code, "question bank reports non-zero response code");
    }

    let mut questions = Vec::with_capacity(parsed.results.len());
    for record in parsed.results {
        if multiple_choice_only && record.kind != MULTIPLE_CHOICE {
            continue;
        }
        if !difficulty.matches(&record.difficulty) {
            continue;
        }
        match record.into_draft(rng).validate(QuestionId::generate()) {
            Ok(question) => questions.push(question),
            Err(err) => debug!(%err, "skipping invalid question record"),
        }
    }
    Ok(questions)
}

//
// ─── BUNDLED BANK ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
enum BankOrigin {
    File(PathBuf),
    Inline(String),
}

/// Question bank stored in the Open Trivia DB response format.
#[derive(Debug, Clone)]
pub struct OpenTdbQuestionBank {
    origin: BankOrigin,
}

impl OpenTdbQuestionBank {
    /// Bank read from a JSON file each time a game starts.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: BankOrigin::File(path.into()),
        }
    }

    /// Bank backed by an in-memory JSON document.
    #[must_use]
    pub fn from_json(payload: impl Into<String>) -> Self {
        Self {
            origin: BankOrigin::Inline(payload.into()),
        }
    }

    async fn read_payload(&self) -> Result<String, BankError> {
        match &self.origin {
            BankOrigin::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            BankOrigin::Inline(payload) => Ok(payload.clone()),
        }
    }

    /// Load and parse the bank, reporting failures instead of hiding them.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bank cannot be read or parsed.
    pub async fn try_load(
        &self,
        multiple_choice_only: bool,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, BankError> {
        let payload = self.read_payload().await?;
        parse_open_tdb(
            &payload,
            multiple_choice_only,
            difficulty,
            &mut rand::rng(),
        )
    }
}

#[async_trait]
impl QuestionSource for OpenTdbQuestionBank {
    async fn load(&self, multiple_choice_only: bool, difficulty: Difficulty) -> Vec<Question> {
        match self.try_load(multiple_choice_only, difficulty).await {
            Ok(questions) => {
                debug!(count = questions.len(), %difficulty, "loaded question bank");
                questions
            }
            Err(err) => {
                warn!(%err, "question bank unavailable; starting with no questions");
                Vec::new()
            }
        }
    }
}
