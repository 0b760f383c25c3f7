//! Input dispatcher: crossterm events in, symbolic `Key`s out.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::input::Key;

/// Translate one terminal event. `None` for events the navigator never sees
/// (key releases, mouse, focus, paste).
pub fn dispatch(event: &Event) -> Option<Key> {
    match event {
        Event::Key(key_event) => dispatch_key(key_event),
        Event::Resize(_, _) => Some(Key::Resize),
        _ => None,
    }
}

fn dispatch_key(key_event: &KeyEvent) -> Option<Key> {
    // Windows reports releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match key_event.code {
        KeyCode::Char('c') if ctrl => Key::Interrupt,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Finish,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if !ctrl => Key::Char(c),
        _ => Key::Other,
    };
    Some(key)
}

/// Somewhere keys come from. Blocks until one is available.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Reads the real terminal. Events that do not dispatch are skipped.
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = dispatch(&event::read()?) {
                return Ok(key);
            }
        }
    }
}

/// A fixed script of keys, for headless runs. Fails once exhausted.
impl KeySource for VecDeque<Key> {
    fn next_key(&mut self) -> io::Result<Key> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(dispatch(&press(KeyCode::Up)), Some(Key::Up));
        assert_eq!(dispatch(&press(KeyCode::Down)), Some(Key::Down));
        assert_eq!(dispatch(&press(KeyCode::Enter)), Some(Key::Confirm));
        assert_eq!(dispatch(&press(KeyCode::Esc)), Some(Key::Finish));
        assert_eq!(dispatch(&press(KeyCode::Backspace)), Some(Key::Backspace));
    }

    #[test]
    fn test_characters_and_ctrl_c() {
        assert_eq!(dispatch(&press(KeyCode::Char('a'))), Some(Key::Char('a')));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(dispatch(&ctrl_c), Some(Key::Interrupt));
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(dispatch(&ctrl_x), Some(Key::Other));
        let shifted = Event::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(dispatch(&shifted), Some(Key::Char('A')));
    }

    #[test]
    fn test_unmapped_and_ignored_events() {
        assert_eq!(dispatch(&press(KeyCode::Tab)), Some(Key::Other));
        assert_eq!(dispatch(&Event::Resize(80, 24)), Some(Key::Resize));
        assert_eq!(dispatch(&Event::FocusGained), None);
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(dispatch(&release), None);
    }

    #[test]
    fn test_scripted_keys_run_out() {
        let mut keys: VecDeque<Key> = vec![Key::Up].into();
        assert_eq!(keys.next_key().unwrap(), Key::Up);
        assert_eq!(keys.next_key().unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
