use rand::seq::SliceRandom;
use storage::QuestionSource;
use trivia_core::model::{GameSettings, Question};

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Size of the pool the plan was drawn from.
    pub available: usize,
}

impl SessionPlan {
    /// Number of questions selected for play.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Picks the questions for one game from a loaded pool.
pub struct SessionBuilder<'a> {
    settings: &'a GameSettings,
    shuffle: bool,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(settings: &'a GameSettings) -> Self {
        Self {
            settings,
            shuffle: true,
        }
    }

    /// Enable or disable shuffling the pool before selection.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build a plan holding `min(pool size, effective question count)` questions.
    pub fn build(self, pool: impl IntoIterator<Item = Question>) -> SessionPlan {
        let mut questions: Vec<Question> = pool.into_iter().collect();
        let available = questions.len();

        if self.shuffle {
            questions.shuffle(&mut rand::rng());
        }

        let limit =
            usize::try_from(self.settings.effective_question_count()).unwrap_or(usize::MAX);
        questions.truncate(limit);

        SessionPlan {
            questions,
            available,
        }
    }
}

/// Pull a fresh pool from `source` and select this game's questions.
pub(crate) async fn load_plan(
    source: &dyn QuestionSource,
    settings: &GameSettings,
    shuffle: bool,
) -> SessionPlan {
    let pool = source.load(true, settings.difficulty()).await;
    SessionBuilder::new(settings).with_shuffle(shuffle).build(pool)
}
