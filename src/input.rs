//! Input subsystem: crossterm polling on a blocking thread and the quit-key predicate.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use service::{spawn_input_thread, InputEvent, InputService, QuitKey};
