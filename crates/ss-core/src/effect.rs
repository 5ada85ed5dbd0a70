//! Effects applied when a choice is taken.

use crate::condition::Condition;
use crate::error::StoryResult;
use crate::state::GameState;

/// A state mutation attached to a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add to (or subtract from) energy, clamped to the track's range.
    Energy(i32),
    /// Turn a switch on or off.
    Switch {
        /// Flag key.
        key: String,
        /// New value.
        on: bool,
    },
    /// Set a variant flag.
    Variant {
        /// Flag key.
        key: String,
        /// New variant.
        value: String,
    },
    /// Adjust a counter, clamped to its range.
    Counter {
        /// Flag key.
        key: String,
        /// Amount to add.
        delta: i32,
    },
    /// Apply nested effects only if a condition holds at that point.
    When {
        /// Condition checked against the in-progress state.
        condition: Condition,
        /// Effects applied when it holds.
        effects: Vec<Effect>,
    },
}

/// What applying a list of effects did to energy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectReport {
    /// True if a negative energy effect left the track empty.
    pub drained: bool,
}

impl Effect {
    /// Shorthand for turning a switch on.
    pub fn set(key: impl Into<String>) -> Self {
        Effect::Switch {
            key: key.into(),
            on: true,
        }
    }

    /// Shorthand for turning a switch off.
    pub fn clear(key: impl Into<String>) -> Self {
        Effect::Switch {
            key: key.into(),
            on: false,
        }
    }

    /// Shorthand for [`Effect::Variant`].
    pub fn variant(key: impl Into<String>, value: impl Into<String>) -> Self {
        Effect::Variant {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Effect::Counter`].
    pub fn counter(key: impl Into<String>, delta: i32) -> Self {
        Effect::Counter {
            key: key.into(),
            delta,
        }
    }

    /// Shorthand for [`Effect::When`].
    pub fn when(condition: Condition, effects: Vec<Effect>) -> Self {
        Effect::When { condition, effects }
    }

    /// Apply this effect to the state.
    pub fn apply(&self, state: &mut GameState, report: &mut EffectReport) -> StoryResult<()> {
        match self {
            Effect::Energy(delta) => {
                state.energy.adjust(*delta);
                if *delta < 0 && state.energy.is_empty() {
                    report.drained = true;
                }
            }
            Effect::Switch { key, on } => state.flags.set_switch(key, *on)?,
            Effect::Variant { key, value } => state.flags.set_variant(key, value)?,
            Effect::Counter { key, delta } => {
                state.flags.adjust_counter(key, *delta)?;
            }
            Effect::When { condition, effects } => {
                if condition.evaluate(state) {
                    apply_all(effects, state, report)?;
                }
            }
        }
        Ok(())
    }
}

/// Apply effects in order.
pub fn apply_all(
    effects: &[Effect],
    state: &mut GameState,
    report: &mut EffectReport,
) -> StoryResult<()> {
    for effect in effects {
        effect.apply(state, report)?;
    }
    Ok(())
}
