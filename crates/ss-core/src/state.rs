//! Session state.

use serde::Serialize;

use crate::flag::Flags;
use crate::node::NodeId;
use crate::track::EnergyTrack;

/// One choice taken during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// The node the choice was taken at.
    pub node: NodeId,
    /// The label of the choice.
    pub choice: String,
}

/// The state of one play session.
///
/// Created by [`Engine::start`](crate::engine::Engine::start) and mutated only
/// by [`Engine::advance`](crate::engine::Engine::advance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// The energy reserve.
    pub energy: EnergyTrack,
    /// Story flags.
    pub flags: Flags,
    /// The node the player is at.
    pub current: NodeId,
    /// Choices taken so far, oldest first.
    pub history: Vec<Step>,
}

impl GameState {
    /// Create a state at `start` with the given energy and flags.
    pub fn new(start: NodeId, energy: EnergyTrack, flags: Flags) -> Self {
        Self {
            energy,
            flags,
            current: start,
            history: Vec::new(),
        }
    }

    /// Number of choices taken so far.
    pub fn turns(&self) -> usize {
        self.history.len()
    }
}
