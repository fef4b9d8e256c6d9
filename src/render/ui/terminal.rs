//! Terminal surface implementation using ratatui
//!
//! This module provides the concrete `Surface` used by the binary. It owns the ratatui
//! terminal and, for the real stdout backend, the raw-mode and alternate-screen state
//! that must be restored on exit.

use crate::error::{Result, TickloopError};
use crate::render::protocol::Panel;
use crate::render::ui::Surface;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

/// Border plus one column of padding on each side.
const HORIZONTAL_CHROME: u16 = 4;
/// Top and bottom border.
const VERTICAL_CHROME: u16 = 2;

/// Ratatui-backed display surface
///
/// `B` defaults to the crossterm stdout backend; tests use `TestBackend`.
pub struct TerminalSurface<B: Backend = CrosstermBackend<Stdout>> {
    terminal: Terminal<B>,
    /// Whether initialize/release should toggle raw mode and the alternate screen
    manages_screen: bool,
    active: bool,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Surface drawing to the process's stdout
    pub fn stdout() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(|err| TickloopError::render_io("terminal unavailable", err))?;
        Ok(Self {
            terminal,
            manages_screen: true,
            active: false,
        })
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Surface drawing into an arbitrary backend without touching the real terminal
    pub fn with_backend(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend)
            .map_err(|err| TickloopError::render_io("terminal unavailable", err))?;
        Ok(Self {
            terminal,
            manages_screen: false,
            active: false,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    fn draw_panel(frame: &mut Frame, panel: &Panel) {
        let area = Self::panel_area(frame.size(), panel);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        if let Some(title) = &panel.title {
            block = block.title(title.as_str());
        }

        let lines: Vec<Line> = panel
            .lines
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    /// Center the panel box inside `outer`, shrinking it when the terminal is too small.
    fn panel_area(outer: Rect, panel: &Panel) -> Rect {
        let content_width = u16::try_from(panel.content_width()).unwrap_or(u16::MAX);
        let content_height = u16::try_from(panel.lines.len()).unwrap_or(u16::MAX);

        let width = content_width
            .saturating_add(HORIZONTAL_CHROME)
            .min(outer.width);
        let height = content_height
            .saturating_add(VERTICAL_CHROME)
            .min(outer.height);

        Rect {
            x: outer.x + (outer.width - width) / 2,
            y: outer.y + (outer.height - height) / 2,
            width,
            height,
        }
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn initialize(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        if self.manages_screen {
            enable_raw_mode()?;
            // From here on release() has something to undo.
            self.active = true;
            execute!(io::stdout(), EnterAlternateScreen)?;
        }
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        log::debug!("terminal surface initialized");
        Ok(())
    }

    fn render(&mut self, panel: &Panel) -> Result<()> {
        let (width, height) = self.size()?;
        if width == 0 || height == 0 {
            return Err(TickloopError::render(format!(
                "terminal has no drawable area ({}x{})",
                width, height
            )));
        }

        self.terminal
            .draw(|frame| Self::draw_panel(frame, panel))
            .map_err(|err| TickloopError::render_io("draw failed", err))?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        // Attempt every restore step even if an earlier one fails.
        let mut first_error = None;
        if self.manages_screen {
            if let Err(err) = disable_raw_mode() {
                first_error.get_or_insert(err);
            }
            if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
                first_error.get_or_insert(err);
            }
        }
        if let Err(err) = self.terminal.show_cursor() {
            first_error.get_or_insert(err);
        }
        log::debug!("terminal surface released");

        match first_error {
            Some(err) => Err(TickloopError::render_io("failed to restore terminal", err)),
            None => Ok(()),
        }
    }

    fn size(&self) -> Result<(u16, u16)> {
        let area = self.terminal.size()?;
        Ok((area.width, area.height))
    }
}

impl<B: Backend> Drop for TerminalSurface<B> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
