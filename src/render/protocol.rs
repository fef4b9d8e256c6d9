//! Types shared between the render loop, the display surface, and the application layer.

use crate::error::TickloopError;
use ratatui::text::Line;
use std::fmt;
use std::str::FromStr;

/// Why the loop left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A key event satisfied the quit predicate
    QuitKey,
    /// SIGINT/SIGTERM or Ctrl+C in raw mode
    Interrupted,
}

/// Two-state lifecycle of a single loop run. `Exiting` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Exiting(ExitReason),
}

impl RunState {
    pub fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Apply a quit signal. Once exiting, the first reason sticks.
    pub fn exit(&mut self, reason: ExitReason) {
        if self.is_running() {
            *self = RunState::Exiting(reason);
        }
    }
}

/// Summary of a run that ended through the quit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Value of the tick counter when the loop stopped
    pub ticks: u64,
    /// Number of frames handed to the surface
    pub renders: u64,
    pub exit: ExitReason,
}

/// Text content drawn inside the bordered panel for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl Panel {
    pub fn new(lines: Vec<String>) -> Self {
        Self { title: None, lines }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Widest line in terminal columns.
    pub fn content_width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| Line::from(line.as_str()).width())
            .max()
            .unwrap_or(0)
    }
}

/// What the loop draws each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Scene {
    /// Static greeting; identical every tick
    #[cfg_attr(feature = "config", serde(alias = "hello"))]
    Greeting,
    /// Shows the current tick counter
    #[default]
    #[cfg_attr(feature = "config", serde(alias = "ticks"))]
    Counter,
}

impl Scene {
    /// Build the panel for the given tick.
    pub fn panel(self, tick: u64) -> Panel {
        match self {
            Scene::Greeting => Panel::new(vec![
                "Hello TUI 👋".to_string(),
                "Press Q to quit.".to_string(),
            ])
            .with_title("hello"),
            Scene::Counter => Panel::new(vec![
                format!("Ticks: {}", tick),
                "Press Q or Ctrl+C to quit".to_string(),
            ])
            .with_title("ticks"),
        }
    }
}

impl FromStr for Scene {
    type Err = TickloopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hello" | "greeting" => Ok(Scene::Greeting),
            "ticks" | "counter" => Ok(Scene::Counter),
            other => Err(TickloopError::invalid_argument(format!(
                "unknown scene '{}' (expected 'hello' or 'ticks')",
                other
            ))),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Greeting => write!(f, "hello"),
            Scene::Counter => write!(f, "ticks"),
        }
    }
}
