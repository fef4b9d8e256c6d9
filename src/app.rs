//! Application orchestration layer
//!
//! Wires settings, the terminal surface, the input thread, and the signal listener around a
//! single render loop run. Everything is created in [`Application::run`] and torn down before
//! it returns.

pub mod runtime;

use crate::config::Settings;
use crate::error::Result;
use crate::input::{spawn_input_thread, InputEvent};
use crate::render::protocol::LoopReport;
use crate::render::service::RenderLoop;
use crate::render::ui::{Surface, TerminalSurface};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;

/// How long the input thread blocks in one crossterm poll.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Application orchestrator
pub struct Application {
    settings: Settings,
    render_loop: RenderLoop,
}

impl Application {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let render_loop = RenderLoop::new(settings.refresh_interval())?
            .with_quit_key(settings.quit_key())
            .with_scene(settings.scene);

        Ok(Self {
            settings,
            render_loop,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run against the real terminal.
    pub async fn run(&self) -> Result<LoopReport> {
        let mut surface = TerminalSurface::stdout()?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.run_with(&mut surface, &mut rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        result
    }

    /// Run against any surface and event queue, with process signals wired to the interrupt.
    pub async fn run_with<S: Surface>(
        &self,
        surface: &mut S,
        events: &mut UnboundedReceiver<InputEvent>,
    ) -> Result<LoopReport> {
        let interrupt = CancellationToken::new();
        let signals = runtime::spawn_signal_listener(interrupt.clone());

        let result = self.render_loop.run(surface, events, &interrupt).await;

        // Stops the listener if the loop ended for another reason.
        interrupt.cancel();
        runtime::join_signal_listener(signals).await;
        result
    }
}
