//! The energy track.
//!
//! Energy is a clamped integer between zero and a configured maximum. Every
//! mutation goes through [`EnergyTrack::adjust`], so the value can never
//! leave its range.

use serde::Serialize;

/// A clamped energy reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnergyTrack {
    current: i32,
    max: i32,
}

impl EnergyTrack {
    /// Create a track holding `current` out of `max`.
    ///
    /// `max` is raised to at least 1 and `current` is clamped into `[0, max]`.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Current energy.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum energy.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Returns true if the reserve is exhausted.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the reserve is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current == self.max
    }
}

impl std::fmt::Display for EnergyTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
