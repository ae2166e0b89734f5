use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::pose::Intent;

/// Keys currently held down.
#[derive(Debug, Default)]
pub struct Keys {
    down: HashSet<KeyCode>,
}

impl Keys {
    pub fn press(&mut self, code: KeyCode) {
        self.down.insert(code);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.down.remove(&code);
    }

    fn axis(&self, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> i8 {
        let held = |codes: [KeyCode; 2]| codes.iter().any(|c| self.down.contains(c));
        i8::from(held(positive)) - i8::from(held(negative))
    }

    /// Arrow keys or WASD. Up/W walks forward, Right/D turns clockwise.
    pub fn intent(&self) -> Intent {
        Intent::new(
            self.axis(
                [KeyCode::ArrowUp, KeyCode::KeyW],
                [KeyCode::ArrowDown, KeyCode::KeyS],
            ),
            self.axis(
                [KeyCode::ArrowRight, KeyCode::KeyD],
                [KeyCode::ArrowLeft, KeyCode::KeyA],
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_without_keys() {
        assert_eq!(Keys::default().intent(), Intent::default());
    }

    #[test]
    fn arrows_and_wasd_map_to_intent() {
        let mut keys = Keys::default();
        keys.press(KeyCode::ArrowUp);
        keys.press(KeyCode::KeyA);
        assert_eq!(keys.intent(), Intent { walk: 1, turn: -1 });

        keys.release(KeyCode::ArrowUp);
        keys.press(KeyCode::KeyS);
        assert_eq!(keys.intent(), Intent { walk: -1, turn: -1 });
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = Keys::default();
        keys.press(KeyCode::ArrowLeft);
        keys.press(KeyCode::ArrowRight);
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::ArrowDown);
        assert_eq!(keys.intent(), Intent::default());
    }
}
