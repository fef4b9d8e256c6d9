//! Low-level input collection: crossterm polling and translation into primitive events
//! that the higher-level input service can consume.

use crate::error::{Result, TickloopError};
use ratatui::crossterm::event::{self, Event, KeyEvent};
use std::collections::VecDeque;
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// Collector that polls crossterm for events and drops the kinds the loop never uses
/// (mouse, focus, paste).
#[derive(Debug, Default)]
pub struct RawInputCollector {
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self {
            pending_events: VecDeque::new(),
        }
    }

    /// Check whether the collector has no queued events.
    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty()
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Pop the next queued event without polling crossterm.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        let ready = event::poll(poll_timeout)
            .map_err(|err| TickloopError::input(format!("poll failed: {}", err)))?;
        if !ready {
            return Ok(None);
        }

        let event =
            event::read().map_err(|err| TickloopError::input(format!("read failed: {}", err)))?;
        self.enqueue_event(event);
        Ok(self.try_flush())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

    #[test]
    fn keys_and_resizes_are_queued_in_order() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )));
        collector.process_event(Event::Resize(100, 40));

        assert!(matches!(
            collector.try_flush(),
            Some(RawInputEvent::Key(KeyEvent {
                code: KeyCode::Char('x'),
                ..
            }))
        ));
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Resize {
                width: 100,
                height: 40
            })
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn mouse_and_focus_events_are_dropped() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        collector.process_event(Event::FocusGained);

        assert!(collector.is_idle());
        assert_eq!(collector.try_flush(), None);
    }
}
