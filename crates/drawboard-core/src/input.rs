//! Pointer events fed to the board by the host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Only Alt held.
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }

    /// Whether these modifiers turn a press into a pan and a wheel into a zoom.
    pub fn pans(&self) -> bool {
        self.alt
    }
}

/// Pointer event type. Positions are raw device pixels relative to the
/// drawing area, before the window scale is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        position: Point,
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            modifiers: Modifiers::default(),
        }
    }

    pub fn moved(position: Point) -> Self {
        PointerEvent::Move {
            position,
            modifiers: Modifiers::default(),
        }
    }

    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            modifiers: Modifiers::default(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Wheel { position, .. } => *position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Up { modifiers, .. }
            | PointerEvent::Wheel { modifiers, .. } => *modifiers,
        }
    }

    /// Same event with different modifiers.
    pub fn with_modifiers(mut self, new: Modifiers) -> Self {
        match &mut self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Up { modifiers, .. }
            | PointerEvent::Wheel { modifiers, .. } => *modifiers = new,
        }
        self
    }
}
