//! Display surface components.
//!
//! Hosts the `Surface` trait and the ratatui-backed terminal implementation.

pub mod renderer;
pub mod terminal;

pub use renderer::Surface;
pub use terminal::TerminalSurface;

#[cfg(test)]
pub use renderer::tests::MockSurface;
