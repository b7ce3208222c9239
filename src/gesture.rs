//! Horizontal drag tracking for the episode card.
//!
//! The tracker is a small state machine: `Idle` until a press, `Dragging`
//! while the pointer moves, and back to `Idle` on release or when the pointer
//! leaves the card. The release decision is a pure function of the offset.

/// Default distance (in pointer units) a drag must exceed to navigate.
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 50;

/// Navigation outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Leftward drag past the threshold.
    Next,
    /// Rightward drag past the threshold.
    Previous,
    /// Within the threshold; the card springs back.
    SpringBack,
}

/// Map a drag offset to a navigation decision.
///
/// ```
/// use geheimzentrale::gesture::{decide, Swipe};
///
/// assert_eq!(decide(-60, 50), Swipe::Next);
/// assert_eq!(decide(60, 50), Swipe::Previous);
/// assert_eq!(decide(-50, 50), Swipe::SpringBack);
/// ```
pub fn decide(offset: i32, threshold: u16) -> Swipe {
    let threshold = i32::from(threshold);
    if offset < -threshold {
        Swipe::Next
    } else if offset > threshold {
        Swipe::Previous
    } else {
        Swipe::SpringBack
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start_x: i32, offset: i32 },
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: DragState,
    threshold: u16,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl GestureTracker {
    /// A zero threshold is raised to 1 so that a plain click never navigates.
    pub fn new(threshold: u16) -> Self {
        Self {
            state: DragState::Idle,
            threshold: threshold.max(1),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Current offset; 0 while idle.
    pub fn offset(&self) -> i32 {
        match self.state {
            DragState::Dragging { offset, .. } => offset,
            DragState::Idle => 0,
        }
    }

    /// Pointer down at `x`. A press while already dragging restarts the drag.
    pub fn press(&mut self, x: i32) {
        self.state = DragState::Dragging {
            start_x: x,
            offset: 0,
        };
    }

    /// Pointer moved to `x`. Ignored while idle.
    pub fn drag_to(&mut self, x: i32) {
        if let DragState::Dragging { start_x, offset } = &mut self.state {
            *offset = x.saturating_sub(*start_x);
        }
    }

    /// Pointer up or left the card.
    ///
    /// Returns the decision for the accumulated offset and goes back to
    /// idle, or `None` when no drag was in progress.
    pub fn release(&mut self) -> Option<Swipe> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { offset, .. } => Some(decide(offset, self.threshold)),
            DragState::Idle => None,
        }
    }
}
