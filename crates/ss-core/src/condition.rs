//! Preconditions for choices and branch targets.

use crate::state::GameState;

/// A condition that can be evaluated against session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Condition {
    /// Energy is at least the given amount.
    EnergyAtLeast(i32),
    /// Energy is at most the given amount.
    EnergyAtMost(i32),
    /// A switch is on.
    SwitchOn(String),
    /// A variant flag has a specific value.
    VariantIs {
        /// Flag key.
        key: String,
        /// Expected variant.
        value: String,
    },
    /// A counter is at least a value.
    CounterAtLeast {
        /// Flag key.
        key: String,
        /// Lower bound (inclusive).
        value: i32,
    },
    /// A counter is at most a value.
    CounterAtMost {
        /// Flag key.
        key: String,
        /// Upper bound (inclusive).
        value: i32,
    },
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Shorthand for [`Condition::SwitchOn`].
    pub fn switch_on(key: impl Into<String>) -> Self {
        Condition::SwitchOn(key.into())
    }

    /// Shorthand for a switch that is off.
    pub fn switch_off(key: impl Into<String>) -> Self {
        Condition::Not(Box::new(Condition::SwitchOn(key.into())))
    }

    /// Shorthand for [`Condition::VariantIs`].
    pub fn variant_is(key: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::VariantIs {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Condition::CounterAtLeast`].
    pub fn at_least(key: impl Into<String>, value: i32) -> Self {
        Condition::CounterAtLeast {
            key: key.into(),
            value,
        }
    }

    /// Shorthand for [`Condition::CounterAtMost`].
    pub fn at_most(key: impl Into<String>, value: i32) -> Self {
        Condition::CounterAtMost {
            key: key.into(),
            value,
        }
    }

    /// Evaluate the condition against the current state.
    ///
    /// Flags that are missing or of the wrong kind evaluate to false; graph
    /// validation rejects such references before play begins.
    pub fn evaluate(&self, state: &GameState) -> bool {
        match self {
            Condition::EnergyAtLeast(n) => state.energy.current() >= *n,
            Condition::EnergyAtMost(n) => state.energy.current() <= *n,
            Condition::SwitchOn(key) => state.flags.switch(key).unwrap_or(false),
            Condition::VariantIs { key, value } => {
                state.flags.variant(key).is_ok_and(|v| v == value.as_str())
            }
            Condition::CounterAtLeast { key, value } => {
                state.flags.counter(key).is_ok_and(|n| n >= *value)
            }
            Condition::CounterAtMost { key, value } => {
                state.flags.counter(key).is_ok_and(|n| n <= *value)
            }
            Condition::Not(inner) => !inner.evaluate(state),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(state)),
            Condition::Always => true,
        }
    }
}
