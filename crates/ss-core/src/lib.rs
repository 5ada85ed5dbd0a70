//! Story graph, state model, and choice engine for Swimming Star.
//!
//! A story is a fixed graph of [`Node`]s built with a [`StoryBuilder`] and
//! validated up front. A [`GameState`] holds one session's energy, typed
//! flags, and position; the [`Engine`] applies choices to it.

/// Choice preconditions.
pub mod condition;
/// Session configuration.
pub mod config;
/// Effects applied by choices.
pub mod effect;
/// The engine that advances sessions.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Typed flag schema and values.
pub mod flag;
/// The story graph and its builder.
pub mod graph;
/// Nodes, choices, and targets.
pub mod node;
/// Session state.
pub mod state;
/// The clamped energy track.
pub mod track;
/// Construction-time graph validation.
pub mod validate;

pub use condition::Condition;
pub use config::SessionConfig;
pub use effect::Effect;
pub use engine::{Engine, Selection, Status, Transition};
pub use error::{StoryError, StoryResult};
pub use flag::{FlagKind, FlagSchema, FlagValue, Flags};
pub use graph::{StoryBuilder, StoryGraph};
pub use node::{Choice, Node, NodeId, Outcome, Target};
pub use state::{GameState, Step};
pub use track::EnergyTrack;
pub use validate::ValidationIssue;
