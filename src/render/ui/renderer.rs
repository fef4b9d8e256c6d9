//! Display surface trait
//!
//! This module defines the `Surface` trait the render loop draws into and its lifecycle
//! hooks (initialization and release).

use crate::error::Result;
use crate::render::protocol::Panel;

/// Core trait for anything the render loop can draw a panel onto
pub trait Surface {
    /// Prepare the device for drawing
    ///
    /// For a terminal this means:
    /// - Enable raw mode
    /// - Enter the alternate screen
    /// - Hide the cursor
    fn initialize(&mut self) -> Result<()>;

    /// Draw one frame from the given panel
    fn render(&mut self, panel: &Panel) -> Result<()>;

    /// Release the device and restore its original state
    ///
    /// Must be idempotent; the loop calls it on every exit path.
    fn release(&mut self) -> Result<()>;

    /// Current drawable dimensions
    fn size(&self) -> Result<(u16, u16)>; // (width, height)
}
