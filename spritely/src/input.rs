pub use winit::keyboard::KeyCode as Key;

use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

/// Tracks which keys are held this frame and which were held last
/// frame, so edge-triggered queries (`pressed`/`released`) work
/// without the caller bookkeeping winit events.
pub struct Input {
    now_keys: Box<[bool]>,
    prev_keys: Box<[bool]>,
}
impl Default for Input {
    fn default() -> Self {
        Self {
            now_keys: vec![false; 256].into_boxed_slice(),
            prev_keys: vec![false; 256].into_boxed_slice(),
        }
    }
}
impl Input {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.now_keys[key as usize]
    }
    pub fn is_key_up(&self, key: Key) -> bool {
        !self.now_keys[key as usize]
    }
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.now_keys[key as usize] && !self.prev_keys[key as usize]
    }
    pub fn is_key_released(&self, key: Key) -> bool {
        !self.now_keys[key as usize] && self.prev_keys[key as usize]
    }
    /// A -1/0/1 axis from a pair of keys, e.g. left/right arrows.
    pub fn key_axis(&self, neg: Key, pos: Key) -> f32 {
        (self.is_key_down(pos) as i8 - self.is_key_down(neg) as i8) as f32
    }
    /// Roll the current key state into the previous frame's.  Call
    /// once per simulation step.
    pub fn next_frame(&mut self) {
        self.prev_keys.copy_from_slice(&self.now_keys);
    }
    pub fn process_input_event<T>(&mut self, evt: &winit::event::Event<T>) {
        if let winit::event::Event::WindowEvent {
            event: winit::event::WindowEvent::KeyboardInput { event, .. },
            ..
        } = evt
        {
            if let PhysicalKey::Code(code) = event.physical_key {
                self.handle_key(code, event.state);
            }
        }
    }
    fn handle_key(&mut self, code: Key, state: ElementState) {
        let idx = code as usize;
        if idx < self.now_keys.len() {
            self.now_keys[idx] = state.is_pressed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_an_edge_not_a_level() {
        let mut input = Input::default();
        input.handle_key(Key::KeyW, ElementState::Pressed);
        assert!(input.is_key_down(Key::KeyW));
        assert!(input.is_key_pressed(Key::KeyW));
        input.next_frame();
        // still held, but no longer a fresh press
        assert!(input.is_key_down(Key::KeyW));
        assert!(!input.is_key_pressed(Key::KeyW));
        input.handle_key(Key::KeyW, ElementState::Released);
        assert!(input.is_key_released(Key::KeyW));
    }

    #[test]
    fn key_axis_combines_the_pair() {
        let mut input = Input::default();
        assert_eq!(input.key_axis(Key::ArrowLeft, Key::ArrowRight), 0.0);
        input.handle_key(Key::ArrowRight, ElementState::Pressed);
        assert_eq!(input.key_axis(Key::ArrowLeft, Key::ArrowRight), 1.0);
        input.handle_key(Key::ArrowLeft, ElementState::Pressed);
        assert_eq!(input.key_axis(Key::ArrowLeft, Key::ArrowRight), 0.0);
        input.handle_key(Key::ArrowRight, ElementState::Released);
        assert_eq!(input.key_axis(Key::ArrowLeft, Key::ArrowRight), -1.0);
    }
}
