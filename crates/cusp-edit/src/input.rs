//! Pointer input as delivered by the shell

use cusp_core::ModifierKey;
use glam::DVec2;

/// Which button a pointer-down came from. Touch and pen contacts are `Primary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn only(key: ModifierKey) -> Self {
        let mut m = Self::NONE;
        match key {
            ModifierKey::Shift => m.shift = true,
            ModifierKey::Ctrl => m.ctrl = true,
            ModifierKey::Alt => m.alt = true,
        }
        m
    }

    pub fn is_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
        }
    }
}

/// A pointer event.
///
/// `position` is normalized to `[-1, 1]` across the viewport with x growing
/// right and y growing down, like window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub button: PointerButton,
    pub position: DVec2,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(pointer_id: u32, position: DVec2) -> Self {
        Self {
            pointer_id,
            button: PointerButton::Primary,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Build from physical pixel coordinates within a viewport.
    pub fn from_pixels(pointer_id: u32, x: f64, y: f64, viewport: [f64; 2]) -> Self {
        let position = DVec2::new(2.0 * x / viewport[0] - 1.0, 2.0 * y / viewport[1] - 1.0);
        Self::new(pointer_id, position)
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}
