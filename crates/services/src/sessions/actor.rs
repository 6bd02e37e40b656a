//! Single-writer game task.
//!
//! Each game runs in its own tokio task that owns the `GameSession`. Player
//! intents and countdown ticks are funnelled through one `select!` loop, so
//! the session is only ever touched from that task. The countdown interval
//! exists only while the session reports an armed timer and is dropped when
//! the task stops.

use std::sync::Arc;
use std::time::Duration;

use storage::QuestionSource;
use storage::repository::HighScoreRepository;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trivia_core::model::{GameSettings, HighScore, HighScorePolicy};
use trivia_core::{Clock, GameSession, SessionEvent, SessionSnapshot};

use super::plan::load_plan;
use crate::error::GameServiceError;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 16;
const EVENT_BUFFER: usize = 64;

enum Intent {
    SubmitAnswer(String),
    Advance,
    Restart,
}

struct Command {
    intent: Intent,
    reply: oneshot::Sender<SessionSnapshot>,
}

enum Step {
    Command(Command),
    Tick,
    Stop,
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Caller-side handle to a running game.
///
/// Dropping the handle stops the game task and its countdown.
pub struct GameHandle {
    settings: GameSettings,
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
}

impl GameHandle {
    async fn send(&self, intent: Intent) -> Result<SessionSnapshot, GameServiceError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { intent, reply })
            .await
            .map_err(|_| GameServiceError::Closed)?;
        response.await.map_err(|_| GameServiceError::Closed)
    }

    /// Answer the current question with `option`.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Closed` if the game task has stopped.
    pub async fn submit_answer(
        &self,
        option: impl Into<String>,
    ) -> Result<SessionSnapshot, GameServiceError> {
        self.send(Intent::SubmitAnswer(option.into())).await
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Closed` if the game task has stopped.
    pub async fn advance(&self) -> Result<SessionSnapshot, GameServiceError> {
        self.send(Intent::Advance).await
    }

    /// Play again with the same settings and a freshly loaded pool.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Closed` if the game task has stopped.
    pub async fn restart(&self) -> Result<SessionSnapshot, GameServiceError> {
        self.send(Intent::Restart).await
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change, including countdown ticks.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    /// Receiver for session events such as `AnswerResolved` (haptics) and `GameOver`.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Stop the game task. Pending countdowns are dropped.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

//
// ─── ACTOR ─────────────────────────────────────────────────────────────────────
//

pub(crate) struct GameActor {
    session: GameSession,
    source: Arc<dyn QuestionSource>,
    high_scores: Arc<dyn HighScoreRepository>,
    policy: HighScorePolicy,
    clock: Clock,
    shuffle: bool,
    ticker: Option<Interval>,
    state: watch::Sender<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

impl GameActor {
    pub(crate) fn new(
        session: GameSession,
        source: Arc<dyn QuestionSource>,
        high_scores: Arc<dyn HighScoreRepository>,
    ) -> Self {
        let (state, _) = watch::channel(session.snapshot());
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            session,
            source,
            high_scores,
            policy: HighScorePolicy::default(),
            clock: Clock::default(),
            shuffle: true,
            ticker: None,
            state,
            events,
        }
    }

    pub(crate) fn with_policy(mut self, policy: HighScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub(crate) fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Spawn the game task. `initial` are the events produced by `start`.
    pub(crate) fn spawn(self, initial: Vec<SessionEvent>) -> GameHandle {
        let (commands, inbox) = mpsc::channel(COMMAND_BUFFER);
        let cancel = CancellationToken::new();
        let handle = GameHandle {
            settings: *self.session.settings(),
            commands,
            state: self.state.subscribe(),
            events: self.events.clone(),
            cancel: cancel.clone(),
        };
        tokio::spawn(self.run(initial, inbox, cancel));
        handle
    }

    async fn run(
        mut self,
        initial: Vec<SessionEvent>,
        mut inbox: mpsc::Receiver<Command>,
        cancel: CancellationToken,
    ) {
        self.apply(initial).await;

        loop {
            let step = tokio::select! {
                biased;
                () = cancel.cancelled() => Step::Stop,
                command = inbox.recv() => command.map_or(Step::Stop, Step::Command),
                () = next_tick(self.ticker.as_mut()) => Step::Tick,
            };

            match step {
                Step::Command(Command { intent, reply }) => {
                    let events = self.handle(intent).await;
                    self.apply(events).await;
                    // The caller may have given up waiting; the state is published anyway.
                    let _ = reply.send(self.session.snapshot());
                }
                Step::Tick => {
                    let events = self.session.tick();
                    self.apply(events).await;
                }
                Step::Stop => break,
            }
        }

        self.ticker = None;
        debug!("game task stopped");
    }

    async fn handle(&mut self, intent: Intent) -> Vec<SessionEvent> {
        match intent {
            Intent::SubmitAnswer(option) => self.session.submit_answer(&option),
            Intent::Advance => self.session.advance(),
            Intent::Restart => {
                let settings = *self.session.settings();
                let plan = load_plan(self.source.as_ref(), &settings, self.shuffle).await;
                info!(
                    mode = %settings.mode(),
                    selected = plan.total(),
                    available = plan.available,
                    "restarting game"
                );
                self.session.start(plan.questions)
            }
        }
    }

    async fn apply(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::TimerArmed { .. } => self.ticker = Some(countdown()),
                SessionEvent::TimerCancelled => self.ticker = None,
                SessionEvent::TimedOut { index } => debug!(index, "question timed out"),
                SessionEvent::GameOver { score } => {
                    info!(score, "game over");
                    self.record_high_score(score).await;
                }
                SessionEvent::AnswerResolved { .. } | SessionEvent::Advanced { .. } => {}
            }
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        self.state.send_replace(self.session.snapshot());
    }

    async fn record_high_score(&self, score: u32) {
        let mode = self.session.settings().mode();
        let difficulty = self.session.settings().difficulty();

        let existing = if self.policy.needs_existing() {
            match self.high_scores.get_high_score(mode, difficulty).await {
                Ok(existing) => existing,
                Err(err) => {
                    warn!(%err, "failed to read high score; leaving it untouched");
                    return;
                }
            }
        } else {
            None
        };

        if !self.policy.should_replace(existing.as_ref(), score) {
            debug!(score, "score does not replace stored high score");
            return;
        }

        let record = HighScore::new(mode, difficulty, score, self.clock.now());
        match self.high_scores.save_high_score(&record).await {
            Ok(()) => debug!(%mode, %difficulty, score, "high score saved"),
            Err(err) => warn!(%err, "failed to save high score"),
        }
    }
}

fn countdown() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
