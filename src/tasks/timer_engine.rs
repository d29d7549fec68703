//! Timer engine background task
//!
//! The engine task is the single owner of the [`TimerState`]. Intents arrive
//! over an mpsc channel and are processed one at a time, interleaved with the
//! tick deadline inside a single `select!` loop. Every processed intent and
//! tick publishes a fresh snapshot on a watch channel.

use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::Instant,
};
use tracing::{debug, info, trace};

use super::tick_scheduler::TickScheduler;
use crate::{
    error::EngineError,
    state::{format_clock, Intent, ModeCatalogue, ModeKey, TimerState},
};

const COMMAND_CHANNEL_CAPACITY: usize = 64;

type Reply = oneshot::Sender<Result<TimerState, EngineError>>;

/// An intent paired with the channel its outcome is reported on
#[derive(Debug)]
pub struct EngineCommand {
    pub intent: Intent,
    pub reply: Reply,
}

/// Cloneable client side of a running engine
#[derive(Debug, Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<EngineCommand>,
    snapshot_rx: watch::Receiver<TimerState>,
    catalogue: Arc<ModeCatalogue>,
}

impl EngineHandle {
    /// Submit an intent and wait for the resulting state
    pub async fn send(&self, intent: Intent) -> Result<TimerState, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(EngineCommand {
                intent,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::Closed)?;

        reply_rx.await.map_err(|_| EngineError::Closed)?
    }

    pub async fn select_mode(&self, mode: ModeKey) -> Result<TimerState, EngineError> {
        self.send(Intent::SelectMode(mode)).await
    }

    pub async fn toggle_run(&self) -> Result<TimerState, EngineError> {
        self.send(Intent::ToggleRun).await
    }

    pub async fn reset(&self) -> Result<TimerState, EngineError> {
        self.send(Intent::Reset).await
    }

    pub async fn increment(&self, seconds: i64) -> Result<TimerState, EngineError> {
        self.send(Intent::Increment(seconds)).await
    }

    pub async fn edit_time(&self, text: impl Into<String>) -> Result<TimerState, EngineError> {
        self.send(Intent::EditTime(text.into())).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> TimerState {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified after every processed intent and tick
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.snapshot_rx.clone()
    }

    pub fn catalogue(&self) -> &ModeCatalogue {
        &self.catalogue
    }
}

/// Owner of the timer state and its tick schedule
#[derive(Debug)]
pub struct TimerEngine {
    state: TimerState,
    catalogue: Arc<ModeCatalogue>,
    scheduler: TickScheduler,
    command_rx: mpsc::Receiver<EngineCommand>,
    snapshot_tx: watch::Sender<TimerState>,
}

impl TimerEngine {
    /// Create an idle engine on `initial_mode` together with its handle
    pub fn new(catalogue: Arc<ModeCatalogue>, initial_mode: ModeKey) -> (Self, EngineHandle) {
        let state = TimerState::new(initial_mode, &catalogue);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.clone());

        let handle = EngineHandle {
            command_tx,
            snapshot_rx,
            catalogue: Arc::clone(&catalogue),
        };
        let engine = Self {
            state,
            catalogue,
            scheduler: TickScheduler::default(),
            command_rx,
            snapshot_tx,
        };

        (engine, handle)
    }

    /// Create an engine and run it on the current tokio runtime
    pub fn spawn(catalogue: Arc<ModeCatalogue>, initial_mode: ModeKey) -> EngineHandle {
        let (engine, handle) = Self::new(catalogue, initial_mode);
        tokio::spawn(engine.run());
        handle
    }

    /// Process intents and ticks until every handle has been dropped
    pub async fn run(mut self) {
        info!(
            "Starting timer engine in {} mode ({})",
            self.state.active_mode,
            format_clock(self.state.remaining_seconds)
        );

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    let result = self.process(&command.intent);
                    // The caller may have stopped waiting; the state change stands either way
                    let _ = command.reply.send(result);
                }
                _ = self.scheduler.expired(), if self.scheduler.is_armed() => {
                    let fired_at = self.scheduler.deadline().unwrap_or_else(Instant::now);
                    self.process_tick(fired_at);
                }
            }
        }

        info!("Timer engine stopped");
    }

    fn process(&mut self, intent: &Intent) -> Result<TimerState, EngineError> {
        let before = self.state.clone();
        let result = self.state.apply(intent, &self.catalogue);
        self.publish(&before, Instant::now());

        match result {
            Ok(()) => {
                self.log_transition(intent);
                Ok(self.state.clone())
            }
            Err(e) => {
                debug!("Discarded {} intent: {}", intent.name(), e);
                Err(e.into())
            }
        }
    }

    /// Apply one elapsed second; only reachable from the armed deadline.
    ///
    /// The next period is measured from `fired_at` so loop latency does not
    /// accumulate over a long countdown.
    fn process_tick(&mut self, fired_at: Instant) {
        let before = self.state.clone();
        self.state.tick();
        self.publish(&before, fired_at);

        trace!("Tick: {}", format_clock(self.state.remaining_seconds));
        if before.remaining_seconds > 0 && self.state.remaining_seconds == 0 {
            info!("Countdown reached zero in {} mode", self.state.active_mode);
        }
    }

    fn publish(&mut self, before: &TimerState, now: Instant) {
        self.scheduler.sync(before, &self.state, now);
        self.snapshot_tx.send_replace(self.state.clone());
    }

    fn log_transition(&self, intent: &Intent) {
        let clock = format_clock(self.state.remaining_seconds);
        match intent {
            Intent::SelectMode(_) => {
                let mode = self.catalogue.get(self.state.active_mode);
                info!("Switched to {} mode ({})", mode.label, clock);
            }
            Intent::ToggleRun if self.state.is_running => info!("Timer started at {}", clock),
            Intent::ToggleRun => info!("Timer stopped at {}", clock),
            Intent::Reset => info!("Timer reset to {}", clock),
            Intent::Increment(seconds) => debug!("Added {}s, now {}", seconds, clock),
            Intent::EditTime(_) => info!("Time set to {}", clock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;
    use std::time::Duration;
    use tokio::time::sleep;

    fn spawn_default() -> EngineHandle {
        TimerEngine::spawn(Arc::new(ModeCatalogue::default()), ModeKey::Pomodoro)
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_and_stops_on_toggle() {
        let engine = spawn_default();
        assert_eq!(engine.snapshot().remaining_seconds, 1500);
        assert!(!engine.snapshot().is_running);

        let started = engine.toggle_run().await.unwrap();
        assert!(started.is_running);

        sleep(Duration::from_millis(3500)).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.remaining_seconds, 1497);
        assert!(snapshot.is_running);

        let stopped = engine.toggle_run().await.unwrap();
        assert_eq!(stopped.remaining_seconds, 1497);
        assert!(!stopped.is_running);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_toggles_never_double_tick() {
        let engine = spawn_default();
        engine.toggle_run().await.unwrap();
        engine.toggle_run().await.unwrap();
        engine.toggle_run().await.unwrap();

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1499);
    }

    #[tokio::test(start_paused = true)]
    async fn only_elapsed_time_decrements() {
        let engine = spawn_default();
        engine.toggle_run().await.unwrap();

        for _ in 0..5 {
            engine.increment(0).await.unwrap();
        }
        sleep(Duration::from_millis(500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1500);

        sleep(Duration::from_millis(700)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1499);
    }

    #[tokio::test(start_paused = true)]
    async fn late_tick_rearms_from_its_deadline() {
        let (mut engine, _handle) =
            TimerEngine::new(Arc::new(ModeCatalogue::default()), ModeKey::Pomodoro);
        engine.process(&Intent::ToggleRun).unwrap();
        let first = engine.scheduler.deadline().unwrap();

        tokio::time::advance(Duration::from_millis(1300)).await;
        engine.process_tick(first);

        assert_eq!(engine.state.remaining_seconds, 1499);
        assert_eq!(engine.scheduler.deadline(), Some(first + Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn select_mode_while_running_stops_ticking() {
        let engine = spawn_default();
        engine.toggle_run().await.unwrap();
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1498);

        let state = engine.select_mode(ModeKey::ShortBreak).await.unwrap();
        assert_eq!(state.remaining_seconds, 300);
        assert!(!state.is_running);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn halts_at_zero_but_accepts_adjustments() {
        let engine = spawn_default();
        engine.edit_time("0:03").await.unwrap();
        engine.toggle_run().await.unwrap();

        sleep(Duration::from_secs(10)).await;
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.remaining_seconds, 0);
        assert!(snapshot.is_running);

        let state = engine.increment(-10).await.unwrap();
        assert_eq!(state.remaining_seconds, -10);
        sleep(Duration::from_secs(3)).await;
        assert_eq!(engine.snapshot().remaining_seconds, -10);

        engine.increment(12).await.unwrap();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1);

        engine.toggle_run().await.unwrap();
        let state = engine.edit_time("1:00").await.unwrap();
        assert_eq!(state.remaining_seconds, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn increment_restarts_tick_period() {
        let engine = spawn_default();
        engine.toggle_run().await.unwrap();

        sleep(Duration::from_millis(700)).await;
        engine.increment(60).await.unwrap();

        sleep(Duration::from_millis(800)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1560);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(engine.snapshot().remaining_seconds, 1559);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_is_rejected_while_running() {
        let engine = spawn_default();
        engine.toggle_run().await.unwrap();

        let result = engine.edit_time("5:00").await;
        assert_eq!(result, Err(EngineError::Edit(EditError::Running)));
        assert_eq!(engine.snapshot().remaining_seconds, 1500);
    }

    #[tokio::test]
    async fn malformed_edit_is_discarded() {
        let engine = spawn_default();
        engine.edit_time("5:30").await.unwrap();

        let result = engine.edit_time("abc:30").await;
        assert!(matches!(
            result,
            Err(EngineError::Edit(EditError::Malformed { .. }))
        ));
        assert_eq!(engine.snapshot().remaining_seconds, 330);
    }

    #[tokio::test]
    async fn publishes_snapshot_after_each_intent() {
        let engine = spawn_default();
        let mut rx = engine.subscribe();
        rx.borrow_and_update();

        engine.select_mode(ModeKey::LongBreak).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().active_mode, ModeKey::LongBreak);

        engine.reset().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().remaining_seconds, 900);
    }

    #[tokio::test]
    async fn handle_reports_closed_engine() {
        let (engine, handle) = TimerEngine::new(Arc::new(ModeCatalogue::default()), ModeKey::Pomodoro);
        drop(engine);

        assert_eq!(handle.toggle_run().await, Err(EngineError::Closed));
    }
}
