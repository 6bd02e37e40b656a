use crate::model::{GameMode, GameSettings, Question};

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Something that happened while applying an intent.
///
/// Intents return their events in the order they occurred. Consumers use them
/// to drive the real countdown (`TimerArmed`/`TimerCancelled`), to give
/// feedback on answers, and to persist the score on `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// An explicit answer was scored.
    AnswerResolved { correct: bool },
    /// The countdown for question `index` ran out before an answer.
    TimedOut { index: usize },
    /// Question `index` is now current.
    Advanced { index: usize },
    /// A fresh per-question countdown started.
    TimerArmed { seconds: u32 },
    TimerCancelled,
    /// Emitted once per session.
    GameOver { score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Unanswered,
    Answered,
    GameOver,
}

/// Read-only copy of the session state for consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub phase: SessionPhase,
    pub current_question: Option<Question>,
    pub current_index: usize,
    pub total_questions: usize,
    pub score: u32,
    pub lives: u32,
    pub has_answered_current: bool,
    pub selected_option: Option<String>,
    pub is_current_correct: bool,
    pub time_remaining: u32,
    pub time_limit: Option<u32>,
    pub is_game_over: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one play-through.
///
/// Invalid intents (double submission, advancing an unanswered untimed
/// question, anything after game over) are ignored and return no events.
/// Once game over, only `start` mutates the session again.
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: GameSettings,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    lives: u32,
    has_answered_current: bool,
    selected_option: Option<String>,
    is_current_correct: bool,
    time_remaining: u32,
    timer_armed: bool,
    started: bool,
    is_game_over: bool,
    game_over_emitted: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            lives: settings.mode().starting_lives(),
            has_answered_current: false,
            selected_option: None,
            is_current_correct: false,
            time_remaining: 0,
            timer_armed: false,
            started: false,
            is_game_over: false,
            game_over_emitted: false,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if !self.started {
            SessionPhase::NotStarted
        } else if self.is_game_over {
            SessionPhase::GameOver
        } else if self.has_answered_current {
            SessionPhase::Answered
        } else {
            SessionPhase::Unanswered
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn has_answered_current(&self) -> bool {
        self.has_answered_current
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    #[must_use]
    pub fn is_current_correct(&self) -> bool {
        self.is_current_correct
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<u32> {
        self.settings.mode().time_per_question_secs()
    }

    #[must_use]
    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.settings.mode(),
            phase: self.phase(),
            current_question: self.current_question().cloned(),
            current_index: self.current_index,
            total_questions: self.questions.len(),
            score: self.score,
            lives: self.lives,
            has_answered_current: self.has_answered_current,
            selected_option: self.selected_option.clone(),
            is_current_correct: self.is_current_correct,
            time_remaining: self.time_remaining,
            time_limit: self.time_limit(),
            is_game_over: self.is_game_over,
        }
    }

    /// Reset the session and play `questions`, keeping at most the effective count.
    ///
    /// An empty list leaves the session over immediately without a
    /// `GameOver` event, so nothing is persisted for a game that never ran.
    pub fn start(&mut self, mut questions: Vec<Question>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.cancel_timer(&mut events);

        let limit = usize::try_from(self.settings.effective_question_count()).unwrap_or(usize::MAX);
        questions.truncate(limit);

        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.lives = self.settings.mode().starting_lives();
        self.clear_answer();
        self.time_remaining = 0;
        self.started = true;
        self.is_game_over = self.questions.is_empty();
        self.game_over_emitted = self.is_game_over;

        if !self.is_game_over {
            self.arm_timer(&mut events);
        }
        events
    }

    /// Score `option` against the current question.
    pub fn submit_answer(&mut self, option: &str) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.is_game_over || self.has_answered_current {
            return events;
        }
        let correct = match self.current_question() {
            Some(question) => question.is_correct(option),
            None => return events,
        };

        self.has_answered_current = true;
        self.selected_option = Some(option.to_owned());
        self.is_current_correct = correct;
        if correct {
            self.score += 1;
        } else {
            self.lives = self.lives.saturating_sub(1);
        }
        self.cancel_timer(&mut events);
        events.push(SessionEvent::AnswerResolved { correct });

        // Sudden death ends on the first miss regardless of remaining lives.
        if !correct && self.settings.mode() == GameMode::SuddenDeath {
            self.end_game(&mut events);
        } else if self.lives == 0 {
            self.end_game(&mut events);
        }
        events
    }

    /// Move past the current question.
    ///
    /// Allowed once the question is answered, or in a timed mode once the
    /// countdown has reached zero, in which case the miss costs a life first.
    pub fn advance(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.started || self.is_game_over {
            return events;
        }

        if !self.has_answered_current {
            if self.time_limit().is_none() || self.time_remaining > 0 {
                return events;
            }
            self.cancel_timer(&mut events);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.end_game(&mut events);
                return events;
            }
        }

        self.clear_answer();
        self.cancel_timer(&mut events);

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            events.push(SessionEvent::Advanced {
                index: self.current_index,
            });
            self.arm_timer(&mut events);
        } else {
            self.end_game(&mut events);
        }
        events
    }

    /// One second of countdown. Reaching zero scores the question as a miss
    /// and advances.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.is_game_over
            || self.has_answered_current
            || !self.timer_armed
            || self.time_limit().is_none()
        {
            return events;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.cancel_timer(&mut events);
            events.push(SessionEvent::TimedOut {
                index: self.current_index,
            });
            events.extend(self.advance());
        }
        events
    }

    fn end_game(&mut self, events: &mut Vec<SessionEvent>) {
        self.cancel_timer(events);
        self.is_game_over = true;
        if !self.game_over_emitted {
            self.game_over_emitted = true;
            events.push(SessionEvent::GameOver { score: self.score });
        }
    }

    fn clear_answer(&mut self) {
        self.has_answered_current = false;
        self.selected_option = None;
        self.is_current_correct = false;
    }

    fn arm_timer(&mut self, events: &mut Vec<SessionEvent>) {
        if let Some(limit) = self.time_limit() {
            self.time_remaining = limit;
            self.timer_armed = true;
            events.push(SessionEvent::TimerArmed { seconds: limit });
        }
    }

    fn cancel_timer(&mut self, events: &mut Vec<SessionEvent>) {
        if self.timer_armed {
            self.timer_armed = false;
            events.push(SessionEvent::TimerCancelled);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, GameSettingsDraft, QuestionDraft, QuestionId};

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                QuestionDraft::new(format!("Q{i}"), ["right", "wrong"], "right")
                    .validate(QuestionId::generate())
                    .unwrap()
            })
            .collect()
    }

    fn started(mode: GameMode, n: usize) -> GameSession {
        let mut session = GameSession::new(GameSettings::new(mode, Difficulty::All));
        session.start(questions(n));
        session
    }

    fn game_overs(events: &[SessionEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn new_session_is_not_started() {
        let mut session = GameSession::new(GameSettings::default());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.submit_answer("right").is_empty());
        assert!(session.advance().is_empty());
        assert!(session.tick().is_empty());
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn classic_all_correct_finishes_with_full_score() {
        let mut session = started(GameMode::Classic, 3);
        let mut overs = 0;
        for _ in 0..3 {
            overs += game_overs(&session.submit_answer("right"));
            overs += game_overs(&session.advance());
        }

        assert!(session.is_game_over());
        assert_eq!(session.score(), 3);
        assert_eq!(session.lives(), 3);
        assert_eq!(overs, 1);
    }

    #[test]
    fn classic_ends_after_third_miss_with_questions_left() {
        let mut session = started(GameMode::Classic, 10);
        session.submit_answer("wrong");
        session.advance();
        session.submit_answer("wrong");
        session.advance();
        let events = session.submit_answer("wrong");

        assert_eq!(
            events,
            vec![
                SessionEvent::AnswerResolved { correct: false },
                SessionEvent::GameOver { score: 0 },
            ]
        );
        assert!(session.is_game_over());
        assert_eq!(session.lives(), 0);
        assert_eq!(session.current_index(), 2);
        assert!(session.advance().is_empty());
    }

    #[test]
    fn sudden_death_first_miss_ends_game() {
        let mut session = started(GameMode::SuddenDeath, 15);
        assert_eq!(session.lives(), 1);

        let events = session.submit_answer("wrong");
        assert_eq!(game_overs(&events), 1);
        assert!(session.is_game_over());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn double_submit_is_ignored() {
        let mut session = started(GameMode::Classic, 3);
        session.submit_answer("wrong");
        assert!(session.submit_answer("wrong").is_empty());
        assert!(session.submit_answer("right").is_empty());

        assert_eq!(session.lives(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_option(), Some("wrong"));
    }

    #[test]
    fn advance_before_answer_is_ignored_in_untimed_modes() {
        let mut session = started(GameMode::Classic, 3);
        assert!(session.advance().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn advance_before_timeout_is_ignored_in_timed_mode() {
        let mut session = started(GameMode::Timed, 3);
        session.tick();
        assert!(session.advance().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.time_remaining(), 14);
    }

    #[test]
    fn advance_clears_answer_and_rearms_timer() {
        let mut session = started(GameMode::Timed, 3);
        session.tick();
        session.submit_answer("right");
        assert!(!session.is_timer_armed());
        assert_eq!(session.phase(), SessionPhase::Answered);

        let events = session.advance();
        assert_eq!(
            events,
            vec![
                SessionEvent::Advanced { index: 1 },
                SessionEvent::TimerArmed { seconds: 15 },
            ]
        );
        assert_eq!(session.phase(), SessionPhase::Unanswered);
        assert_eq!(session.selected_option(), None);
        assert!(!session.is_current_correct());
        assert_eq!(session.time_remaining(), 15);
    }

    #[test]
    fn timed_timeout_counts_as_miss_and_advances() {
        let mut session = started(GameMode::Timed, 3);
        for _ in 0..14 {
            assert!(session.tick().is_empty());
        }
        let events = session.tick();

        assert_eq!(
            events,
            vec![
                SessionEvent::TimerCancelled,
                SessionEvent::TimedOut { index: 0 },
                SessionEvent::Advanced { index: 1 },
                SessionEvent::TimerArmed { seconds: 15 },
            ]
        );
        assert_eq!(session.lives(), 2);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.time_remaining(), 15);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn timeout_on_last_life_ends_game() {
        let mut session = started(GameMode::Timed, 5);
        session.submit_answer("wrong");
        session.advance();
        session.submit_answer("wrong");
        session.advance();

        let mut events = Vec::new();
        for _ in 0..15 {
            events.extend(session.tick());
        }
        assert_eq!(game_overs(&events), 1);
        assert!(session.is_game_over());
        assert_eq!(session.lives(), 0);
        assert_eq!(session.current_index(), 2);
        assert!(!session.is_timer_armed());
    }

    #[test]
    fn timeout_on_last_question_ends_game() {
        let mut session = started(GameMode::Timed, 1);
        let mut events = Vec::new();
        for _ in 0..15 {
            events.extend(session.tick());
        }
        assert_eq!(game_overs(&events), 1);
        assert_eq!(session.lives(), 2);
    }

    #[test]
    fn tick_is_ignored_after_answer_and_in_untimed_modes() {
        let mut timed = started(GameMode::Timed, 2);
        timed.submit_answer("right");
        assert!(timed.tick().is_empty());
        assert_eq!(timed.time_remaining(), 15);

        let mut classic = started(GameMode::Classic, 2);
        assert!(classic.tick().is_empty());
        assert_eq!(classic.time_remaining(), 0);
    }

    #[test]
    fn start_truncates_to_requested_count() {
        let settings = GameSettingsDraft::new(GameMode::Classic, Difficulty::All)
            .with_question_count(5)
            .validate()
            .unwrap();
        let mut session = GameSession::new(settings);
        session.start(questions(12));
        assert_eq!(session.total_questions(), 5);

        let mut short = GameSession::new(settings);
        short.start(questions(3));
        assert_eq!(short.total_questions(), 3);
    }

    #[test]
    fn empty_start_is_game_over_without_event() {
        let mut session = GameSession::new(GameSettings::new(GameMode::Timed, Difficulty::All));
        let events = session.start(Vec::new());

        assert!(events.is_empty());
        assert!(session.is_game_over());
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.score(), 0);
        assert!(session.current_question().is_none());
        assert!(session.tick().is_empty());
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut session = started(GameMode::SuddenDeath, 3);
        session.submit_answer("wrong");
        assert!(session.is_game_over());

        session.start(questions(3));
        assert_eq!(session.phase(), SessionPhase::Unanswered);
        assert_eq!(session.lives(), 1);
        assert_eq!(session.score(), 0);

        let events = session.submit_answer("wrong");
        assert_eq!(game_overs(&events), 1);
    }

    #[test]
    fn score_and_lives_stay_in_bounds() {
        let mut session = started(GameMode::Timed, 4);
        let answers = ["right", "wrong", "right", "wrong"];
        for answer in answers {
            session.submit_answer(answer);
            session.advance();
            let snap = session.snapshot();
            assert!(snap.score as usize <= snap.total_questions);
        }
        assert!(session.is_game_over());
        assert_eq!(session.score(), 2);
        assert_eq!(session.lives(), 1);
    }

    #[test]
    fn snapshot_reflects_current_question() {
        let mut session = started(GameMode::Timed, 2);
        session.submit_answer("wrong");
        let snap = session.snapshot();

        assert_eq!(snap.phase, SessionPhase::Answered);
        assert_eq!(snap.current_question.as_ref().map(Question::prompt), Some("Q0"));
        assert_eq!(snap.selected_option.as_deref(), Some("wrong"));
        assert_eq!(snap.time_limit, Some(15));
        assert!(!snap.is_current_correct);
    }
}
