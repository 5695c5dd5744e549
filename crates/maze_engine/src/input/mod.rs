//! Keyboard and mouse state
//!
//! [`InputHandle`] is shared between the window layer, which feeds events in,
//! and scenes, which poll it. Pointer-down events are delivered to
//! [`PointerSubscription`]s; a subscription unsubscribes itself when dropped.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use log::trace;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// C key
    C,
    /// D key
    D,
    /// G key
    G,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[derive(Debug, Default)]
struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    cursor: (f32, f32),
    next_subscription: u64,
    subscribers: Vec<(u64, VecDeque<MouseButton>)>,
}

/// Shared input state
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    state: Rc<RefCell<InputState>>,
}

impl InputHandle {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down
    pub fn press_key(&self, key: KeyCode) {
        let mut state = self.state.borrow_mut();
        if state.keys_down.insert(key) {
            state.keys_pressed.insert(key);
        }
    }

    /// Record a key going up
    pub fn release_key(&self, key: KeyCode) {
        self.state.borrow_mut().keys_down.remove(&key);
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.state.borrow().keys_down.contains(&key)
    }

    /// Whether `key` went down since the last [`end_frame`](Self::end_frame)
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.state.borrow().keys_pressed.contains(&key)
    }

    /// Record a mouse button going down and notify subscribers
    pub fn press_button(&self, button: MouseButton) {
        let mut state = self.state.borrow_mut();
        trace!("pointer down {:?} -> {} subscribers", button, state.subscribers.len());
        for (_, queue) in &mut state.subscribers {
            queue.push_back(button);
        }
    }

    /// Record the cursor position in window pixels
    pub fn move_cursor(&self, x: f32, y: f32) {
        self.state.borrow_mut().cursor = (x, y);
    }

    /// Cursor position in window pixels
    pub fn cursor(&self) -> (f32, f32) {
        self.state.borrow().cursor
    }

    /// Clear per-frame edges; call once at the end of each frame
    pub fn end_frame(&self) {
        self.state.borrow_mut().keys_pressed.clear();
    }

    /// Forget everything held; used when a scene is replaced
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.keys_down.clear();
        state.keys_pressed.clear();
    }

    /// Start receiving pointer-down events
    pub fn subscribe_pointer_down(&self) -> PointerSubscription {
        let mut state = self.state.borrow_mut();
        state.next_subscription += 1;
        let id = state.next_subscription;
        state.subscribers.push((id, VecDeque::new()));
        PointerSubscription {
            input: self.clone(),
            id,
        }
    }

    /// Live pointer subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }
}

/// Pointer-down subscription guard
#[derive(Debug)]
pub struct PointerSubscription {
    input: InputHandle,
    id: u64,
}

impl PointerSubscription {
    /// Take the events received since the last poll
    pub fn drain(&self) -> Vec<MouseButton> {
        let mut state = self.input.state.borrow_mut();
        state
            .subscribers
            .iter_mut()
            .find(|(id, _)| *id == self.id)
            .map(|(_, queue)| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        let id = self.id;
        self.input
            .state
            .borrow_mut()
            .subscribers
            .retain(|(sub, _)| *sub != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_edge_lasts_one_frame() {
        let input = InputHandle::new();
        input.press_key(KeyCode::G);
        assert!(input.was_key_pressed(KeyCode::G));
        input.end_frame();
        assert!(input.is_key_down(KeyCode::G));
        assert!(!input.was_key_pressed(KeyCode::G));

        // holding does not re-trigger
        input.press_key(KeyCode::G);
        assert!(!input.was_key_pressed(KeyCode::G));
    }

    #[test]
    fn test_subscription_receives_and_unsubscribes() {
        let input = InputHandle::new();
        let sub = input.subscribe_pointer_down();
        input.press_button(MouseButton::Left);
        assert_eq!(sub.drain(), vec![MouseButton::Left]);
        assert!(sub.drain().is_empty());

        drop(sub);
        assert_eq!(input.subscriber_count(), 0);
        input.press_button(MouseButton::Left);
    }
}
