//! Held-key tracking
//!
//! Key events arrive whenever the host delivers them; the loop reads one
//! snapshot per frame.

use std::collections::HashSet;

use crate::sim::ControlInput;

/// Logical control a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// Map a DOM-style key name to a binding
pub fn binding_for(key: &str) -> Option<Binding> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Binding::Left),
        "ArrowRight" | "d" | "D" => Some(Binding::Right),
        "ArrowUp" | "w" | "W" => Some(Binding::Up),
        "ArrowDown" | "s" | "S" => Some(Binding::Down),
        " " | "Space" | "Spacebar" => Some(Binding::Fire),
        _ => None,
    }
}

/// Set of currently held bindings
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Binding>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound to something.
    pub fn key_down(&mut self, key: &str) -> bool {
        match binding_for(key) {
            Some(binding) => {
                self.held.insert(binding);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(binding) = binding_for(key) {
            self.held.remove(&binding);
        }
    }

    /// Drop everything (window blur, restart)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, binding: Binding) -> bool {
        self.held.contains(&binding)
    }

    pub fn snapshot(&self) -> ControlInput {
        ControlInput {
            left: self.is_held(Binding::Left),
            right: self.is_held(Binding::Right),
            up: self.is_held(Binding::Up),
            down: self.is_held(Binding::Down),
            fire: self.is_held(Binding::Fire),
        }
    }
}
