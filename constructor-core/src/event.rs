//! Pointer and touch input for canvas interaction.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in screen coordinates.
    pub x: f32,
    /// Y position in screen coordinates.
    pub y: f32,
}

impl TouchPoint {
    /// The position as a [`Point`].
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A touch event with all currently active touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All current touch points.
    pub touches: Vec<TouchPoint>,
}

impl TouchInput {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// The primary (first) touch point.
    #[must_use]
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Whether this is a two-finger gesture candidate. Pinch-zoom and
    /// two-finger pan require exactly two active points.
    #[must_use]
    pub fn is_two_finger(&self) -> bool {
        self.touches.len() == 2
    }
}
