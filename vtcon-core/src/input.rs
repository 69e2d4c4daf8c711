//! Synthetic keyboard input.
//!
//! Status-report replies travel back to the client application through the
//! console's input queue, dressed up as key presses: one key-down and one
//! key-up record per character, with no key or scan codes attached.

use serde::{Deserialize, Serialize};

/// A keyboard input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_down: bool,
    pub ch: char,
    pub repeat_count: u16,
    pub virtual_key_code: u16,
    pub virtual_scan_code: u16,
    pub control_key_state: u16,
}

impl KeyEvent {
    /// A record that never came from a real keyboard.
    pub fn synthesized(ch: char, key_down: bool) -> Self {
        KeyEvent {
            key_down,
            ch,
            repeat_count: 1,
            virtual_key_code: 0,
            virtual_scan_code: 0,
            control_key_state: 0,
        }
    }
}

/// Expand a response string into paired key-down/key-up events.
pub fn response_events(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .flat_map(|ch| [KeyEvent::synthesized(ch, true), KeyEvent::synthesized(ch, false)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_events_pairs() {
        let events = response_events("ab");
        assert_eq!(events.len(), 4);
        assert!(events[0].key_down);
        assert!(!events[1].key_down);
        assert_eq!(events[0].ch, 'a');
        assert_eq!(events[1].ch, 'a');
        assert_eq!(events[2].ch, 'b');
        assert_eq!(events[3].ch, 'b');
        assert!(events.iter().all(|e| e.repeat_count == 1
            && e.virtual_key_code == 0
            && e.virtual_scan_code == 0
            && e.control_key_state == 0));
    }
}
