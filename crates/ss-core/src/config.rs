//! Configuration for a play session.

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Energy a new session starts with (clamped into `[0, max_energy]`).
    pub initial_energy: i32,
    /// Upper bound of the energy track.
    pub max_energy: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_energy: 10,
            max_energy: 12,
        }
    }
}

impl SessionConfig {
    /// Set the starting energy (at least 0).
    pub fn with_initial_energy(mut self, energy: i32) -> Self {
        self.initial_energy = energy.max(0);
        self
    }

    /// Set the maximum energy (at least 1).
    pub fn with_max_energy(mut self, max: i32) -> Self {
        self.max_energy = max.max(1);
        self
    }
}
