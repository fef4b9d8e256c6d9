//! High-level input service.
//!
//! Consumes raw events, filters them down to key presses and resizes, and yields
//! `InputEvent`s for the render loop. Deciding whether a key quits the loop is left to
//! the loop's [`QuitKey`] predicate.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Events delivered to the render loop's queue.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Ctrl+C pressed while the terminal is in raw mode
    Interrupt,
}

/// Predicate deciding whether a key event ends the loop.
#[derive(Clone)]
pub struct QuitKey {
    matcher: Arc<dyn Fn(&KeyEvent) -> bool + Send + Sync>,
}

impl QuitKey {
    /// Match `ch` case-insensitively, with no Ctrl/Alt modifier held.
    pub fn char(ch: char) -> Self {
        Self::custom(move |key: &KeyEvent| match key.code {
            KeyCode::Char(c) => {
                c.to_lowercase().eq(ch.to_lowercase())
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            }
            _ => false,
        })
    }

    /// Use an arbitrary predicate.
    pub fn custom<F>(matcher: F) -> Self
    where
        F: Fn(&KeyEvent) -> bool + Send + Sync + 'static,
    {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        (self.matcher)(key)
    }
}

impl Default for QuitKey {
    fn default() -> Self {
        Self::char('q')
    }
}

impl fmt::Debug for QuitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuitKey").finish_non_exhaustive()
    }
}

/// Service wrapping the raw collector.
pub struct InputService {
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_events(&mut self, timeout: Option<Duration>) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            if let Some(event) = Self::translate(raw_event) {
                events.push(event);
            }

            while let Some(extra_event) = self.raw_input.try_flush() {
                if let Some(event) = Self::translate(extra_event) {
                    events.push(event);
                }
            }
        }

        Ok(events)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputEvent> {
        self.raw_input.process_event(event);
        let mut events = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            if let Some(event) = Self::translate(raw_event) {
                events.push(event);
            }
        }
        events
    }

    fn translate(event: RawInputEvent) -> Option<InputEvent> {
        match event {
            RawInputEvent::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                if key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Some(InputEvent::Interrupt);
                }
                Some(InputEvent::Key(key_event))
            }
            RawInputEvent::Resize { width, height } => Some(InputEvent::Resize { width, height }),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards them to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputEvent>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_events(Some(poll_interval)) {
                Ok(events) => {
                    for event in events {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::warn!("Input thread error: {}", err);
                    break;
                }
            }
        }
        log::debug!("input thread stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_quit_key_is_case_insensitive_q() {
        let quit = QuitKey::default();
        assert!(quit.matches(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(quit.matches(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(!quit.matches(&key(KeyCode::Char('w'), KeyModifiers::NONE)));
        assert!(!quit.matches(&key(KeyCode::Esc, KeyModifiers::NONE)));
    }

    #[test]
    fn quit_key_ignores_control_and_alt_chords() {
        let quit = QuitKey::default();
        assert!(!quit.matches(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!quit.matches(&key(KeyCode::Char('q'), KeyModifiers::ALT)));
    }

    #[test]
    fn custom_quit_key() {
        let quit = QuitKey::custom(|key| key.code == KeyCode::Esc);
        assert!(quit.matches(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!quit.matches(&key(KeyCode::Char('q'), KeyModifiers::NONE)));

        let x = QuitKey::char('X');
        assert!(x.matches(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn ctrl_c_becomes_interrupt() {
        let mut service = InputService::new();
        let events = service.process_event(Event::Key(key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(events, vec![InputEvent::Interrupt]);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut service = InputService::new();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(service.process_event(Event::Key(release)).is_empty());
    }

    #[test]
    fn presses_and_resizes_pass_through() {
        let mut service = InputService::new();
        let press = key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            service.process_event(Event::Key(press)),
            vec![InputEvent::Key(press)]
        );
        assert_eq!(
            service.process_event(Event::Resize(80, 24)),
            vec![InputEvent::Resize {
                width: 80,
                height: 24
            }]
        );
    }
}
