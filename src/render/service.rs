//! The periodic render loop.
//!
//! Each iteration renders the current panel, sleeps for one refresh interval, increments the
//! tick counter, and drains queued input. The sleep is a `select!` against the interrupt
//! token so an external signal ends the loop without waiting for the next tick. Quit keys
//! are only observed after the increment, so a key pressed mid-sleep takes effect within
//! one iteration and never produces an extra render.

use crate::error::{Result, TickloopError};
use crate::input::{InputEvent, QuitKey};
use crate::render::protocol::{ExitReason, LoopReport, RunState, Scene};
use crate::render::ui::Surface;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Loop configuration. Holds no run state, so one instance can drive several runs.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    refresh_interval: Duration,
    on_quit_key: QuitKey,
    scene: Scene,
}

/// State owned by a single call to [`RenderLoop::run`].
#[derive(Debug)]
struct LoopState {
    tick: u64,
    renders: u64,
    run_state: RunState,
}

impl LoopState {
    fn new() -> Self {
        Self {
            tick: 0,
            renders: 0,
            run_state: RunState::Running,
        }
    }
}

impl RenderLoop {
    /// Create a loop with the default quit key and the counter scene.
    pub fn new(refresh_interval: Duration) -> Result<Self> {
        if refresh_interval.is_zero() {
            return Err(TickloopError::invalid_argument(
                "refresh interval must be positive",
            ));
        }
        Ok(Self {
            refresh_interval,
            on_quit_key: QuitKey::default(),
            scene: Scene::default(),
        })
    }

    pub fn with_quit_key(mut self, on_quit_key: QuitKey) -> Self {
        self.on_quit_key = on_quit_key;
        self
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Run until a quit key or an interrupt.
    ///
    /// Returns a [`LoopReport`] when the quit key ends the loop and
    /// [`TickloopError::Interrupted`] when `interrupt` is cancelled or an
    /// [`InputEvent::Interrupt`] is queued. The surface is released on every exit path,
    /// including render failures.
    pub async fn run<S: Surface>(
        &self,
        surface: &mut S,
        events: &mut UnboundedReceiver<InputEvent>,
        interrupt: &CancellationToken,
    ) -> Result<LoopReport> {
        if let Err(err) = surface.initialize() {
            let _ = surface.release();
            return Err(err);
        }
        let mut state = LoopState::new();

        let outcome = self.drive(surface, events, interrupt, &mut state).await;
        let released = surface.release();

        log::debug!(
            "render loop stopped after {} ticks / {} renders ({:?})",
            state.tick,
            state.renders,
            state.run_state
        );

        // A render failure outranks a failure to restore the terminal.
        outcome?;
        released?;

        match state.run_state {
            RunState::Exiting(ExitReason::Interrupted) => {
                Err(TickloopError::Interrupted { ticks: state.tick })
            }
            RunState::Exiting(exit) => Ok(LoopReport {
                ticks: state.tick,
                renders: state.renders,
                exit,
            }),
            RunState::Running => Err(TickloopError::other("render loop stopped while running")),
        }
    }

    async fn drive<S: Surface>(
        &self,
        surface: &mut S,
        events: &mut UnboundedReceiver<InputEvent>,
        interrupt: &CancellationToken,
        state: &mut LoopState,
    ) -> Result<()> {
        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so each sleep is a full interval.
        ticker.tick().await;

        log::info!(
            "render loop running: scene={} interval={:?}",
            self.scene,
            self.refresh_interval
        );

        loop {
            if interrupt.is_cancelled() {
                state.run_state.exit(ExitReason::Interrupted);
            }
            if !state.run_state.is_running() {
                return Ok(());
            }

            surface.render(&self.scene.panel(state.tick))?;
            state.renders += 1;

            tokio::select! {
                biased;
                _ = interrupt.cancelled() => {
                    log::info!("interrupt received mid-sleep");
                    state.run_state.exit(ExitReason::Interrupted);
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            state.tick += 1;
            self.drain_events(events, state);
        }
    }

    /// Consume everything queued since the last iteration.
    fn drain_events(&self, events: &mut UnboundedReceiver<InputEvent>, state: &mut LoopState) {
        loop {
            match events.try_recv() {
                Ok(InputEvent::Key(key)) => {
                    if self.on_quit_key.matches(&key) {
                        log::info!("quit key pressed at tick {}", state.tick);
                        state.run_state.exit(ExitReason::QuitKey);
                    }
                }
                Ok(InputEvent::Interrupt) => {
                    log::info!("interrupt key pressed at tick {}", state.tick);
                    state.run_state.exit(ExitReason::Interrupted);
                }
                Ok(InputEvent::Resize { width, height }) => {
                    log::debug!("terminal resized to {}x{}", width, height);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}
