use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::player::Intents;

/// Keys currently held down, fed from window keyboard events
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys_down: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn set(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(code);
        } else {
            self.keys_down.remove(&code);
        }
    }

    /// Forgets every key. Releases are not delivered while the window is unfocused.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    #[inline]
    fn held(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    /// Samples the held keys once per frame
    pub fn intents(&self) -> Intents {
        Intents {
            forward: self.held(KeyCode::KeyW),
            back: self.held(KeyCode::KeyS),
            strafe_left: self.held(KeyCode::KeyA),
            strafe_right: self.held(KeyCode::KeyD),
            turn_left: self.held(KeyCode::KeyH) || self.held(KeyCode::ArrowLeft),
            turn_right: self.held(KeyCode::KeyL) || self.held(KeyCode::ArrowRight),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.held(KeyCode::Escape) || self.held(KeyCode::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(codes: &[KeyCode]) -> HeldKeys {
        let mut keys = HeldKeys::default();
        for &code in codes {
            keys.set(code, true);
        }
        keys
    }

    #[test]
    fn no_keys_is_idle() {
        let keys = HeldKeys::default();
        assert_eq!(keys.intents(), Intents::default());
        assert!(!keys.quit_requested());
    }

    #[test]
    fn keys_map_to_intents() {
        let i = holding(&[KeyCode::KeyW, KeyCode::KeyD, KeyCode::ArrowLeft]).intents();
        assert!(i.forward && i.strafe_right && i.turn_left);
        assert!(!i.back && !i.strafe_left && !i.turn_right);
    }

    #[test]
    fn release_clears_one_key() {
        let mut keys = holding(&[KeyCode::KeyW, KeyCode::KeyA]);
        keys.set(KeyCode::KeyW, false);
        let i = keys.intents();
        assert!(!i.forward && i.strafe_left);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut keys = holding(&[KeyCode::KeyW, KeyCode::KeyL, KeyCode::Escape]);
        keys.release_all();
        assert_eq!(keys.intents(), Intents::default());
        assert!(!keys.quit_requested());
    }

    #[test]
    fn escape_and_end_quit() {
        assert!(holding(&[KeyCode::Escape]).quit_requested());
        assert!(holding(&[KeyCode::End]).quit_requested());
    }
}
