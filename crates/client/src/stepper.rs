//! Linear stage progression.
//!
//! Responsibilities:
//! - Track the current position in a fixed, non-empty stage sequence.
//! - Advance one stage at a time, saturating at the last stage.
//! - Gate advances on an expected current stage.
//!
//! Does NOT handle:
//! - Deciding when to advance (the session drives that).
//!
//! Invariants:
//! - The index starts at 0, never decreases and never exceeds `len() - 1`.
//! - The stage sequence is immutable after construction.

use crate::stage::Stage;

/// Ordered stages with a current index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stepper<T> {
    stages: Vec<T>,
    current: usize,
}

impl<T> Stepper<T> {
    /// Create a stepper positioned at the first stage.
    ///
    /// Returns `None` for an empty sequence.
    pub fn new(stages: Vec<T>) -> Option<Self> {
        if stages.is_empty() {
            return None;
        }
        Some(Self { stages, current: 0 })
    }

    /// Move to the next stage. Returns whether the index moved.
    pub fn advance(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.current += 1;
        true
    }

    /// The stage at the current index.
    pub fn current(&self) -> &T {
        &self.stages[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[T] {
        &self.stages
    }

    /// Whether the current stage is the last one.
    pub fn is_terminal(&self) -> bool {
        self.current + 1 == self.stages.len()
    }

    /// Completion percentage (0 at the first stage, 100 at the last).
    pub fn progress_percent(&self) -> u8 {
        let last = self.stages.len() - 1;
        if last == 0 {
            return 100;
        }
        ((self.current * 100) / last) as u8
    }
}

impl<T: PartialEq> Stepper<T> {
    /// Advance only when the current stage equals `expected`.
    pub fn advance_from(&mut self, expected: &T) -> bool {
        if self.current() != expected {
            return false;
        }
        self.advance()
    }
}

impl Default for Stepper<Stage> {
    fn default() -> Self {
        Self {
            stages: Stage::ALL.to_vec(),
            current: 0,
        }
    }
}
