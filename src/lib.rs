//! # tickloop - Terminal Render Loop
//!
//! A small terminal render-loop primitive: a tick counter re-rendered into a bordered panel
//! on a fixed cadence, stopped by a quit key or an external interrupt.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Runtime settings (CLI overrides, optional TOML file)
//! - [`input`] - Crossterm polling thread and the quit-key predicate
//! - [`render`] - The render loop, its run-state machine, and display surfaces
//! - [`app`] - Wires surface, input, and signals around one loop run

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{Result, TickloopError};

pub use app::Application;
pub use config::Settings;
pub use input::{InputEvent, QuitKey};
pub use render::ui::{Surface, TerminalSurface};
pub use render::{ExitReason, LoopReport, Panel, RenderLoop, RunState, Scene};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
