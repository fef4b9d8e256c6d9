//! Rendering subsystem: the periodic render loop, its shared types, and display surfaces.

pub mod protocol;
pub mod service;
pub mod ui;

pub use protocol::{ExitReason, LoopReport, Panel, RunState, Scene};
pub use service::RenderLoop;
