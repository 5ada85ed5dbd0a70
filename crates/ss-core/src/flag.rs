//! Typed story flags.
//!
//! A story declares its flags up front in a [`FlagSchema`]. The live
//! [`Flags`] of a session are created from that schema and can only hold
//! values of the declared kinds, so conditions and effects can be checked
//! against the schema before play begins.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::error::{StoryError, StoryResult};

/// The declared kind of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagKind {
    /// A boolean switch, off by default.
    Switch,
    /// One of a fixed list of named variants.
    Variant(Vec<String>),
    /// An integer clamped to `[min, max]`.
    Counter {
        /// Lowest value.
        min: i32,
        /// Highest value.
        max: i32,
    },
}

impl FlagKind {
    /// Human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            FlagKind::Switch => "switch",
            FlagKind::Variant(_) => "variant",
            FlagKind::Counter { .. } => "counter",
        }
    }
}

/// The current value of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// Value of a switch.
    Switch(bool),
    /// Value of a variant flag.
    Variant(String),
    /// Value of a counter.
    Counter(i32),
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Switch(on) => write!(f, "{}", if *on { "yes" } else { "no" }),
            FlagValue::Variant(v) => write!(f, "{v}"),
            FlagValue::Counter(n) => write!(f, "{n}"),
        }
    }
}

/// A single flag declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    /// The flag's kind.
    pub kind: FlagKind,
    /// The value a new session starts with.
    pub initial: FlagValue,
}

/// The set of flags a story declares.
#[derive(Debug, Clone, Default)]
pub struct FlagSchema {
    defs: BTreeMap<String, FlagDef>,
}

impl FlagSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a switch, initially off.
    pub fn with_switch(mut self, key: impl Into<String>) -> Self {
        self.defs.insert(
            key.into(),
            FlagDef {
                kind: FlagKind::Switch,
                initial: FlagValue::Switch(false),
            },
        );
        self
    }

    /// Declare a variant flag. The first variant is the initial value.
    pub fn with_variant<I, S>(mut self, key: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        let initial = FlagValue::Variant(variants.first().cloned().unwrap_or_default());
        self.defs.insert(
            key.into(),
            FlagDef {
                kind: FlagKind::Variant(variants),
                initial,
            },
        );
        self
    }

    /// Declare a counter clamped to `[min, max]`, starting at `initial`.
    pub fn with_counter(mut self, key: impl Into<String>, min: i32, max: i32, initial: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.defs.insert(
            key.into(),
            FlagDef {
                kind: FlagKind::Counter { min, max },
                initial: FlagValue::Counter(initial.clamp(min, max)),
            },
        );
        self
    }

    /// Look up a declaration.
    pub fn get(&self, key: &str) -> Option<&FlagDef> {
        self.defs.get(key)
    }

    /// Iterate declarations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagDef)> {
        self.defs.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Number of declared flags.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if no flags are declared.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Build the live flag set a new session starts with.
    pub fn defaults(&self) -> Flags {
        Flags {
            kinds: self
                .defs
                .iter()
                .map(|(k, d)| (k.clone(), d.kind.clone()))
                .collect(),
            values: self
                .defs
                .iter()
                .map(|(k, d)| (k.clone(), d.initial.clone()))
                .collect(),
        }
    }
}

/// The live flags of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    kinds: BTreeMap<String, FlagKind>,
    values: BTreeMap<String, FlagValue>,
}

impl Flags {
    /// Get a flag's value.
    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.values.get(key)
    }

    /// Iterate all flags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read a switch.
    pub fn switch(&self, key: &str) -> StoryResult<bool> {
        match self.lookup(key)? {
            FlagValue::Switch(on) => Ok(*on),
            _ => Err(mismatch(key, "switch")),
        }
    }

    /// Read a variant flag.
    pub fn variant(&self, key: &str) -> StoryResult<&str> {
        match self.lookup(key)? {
            FlagValue::Variant(v) => Ok(v),
            _ => Err(mismatch(key, "variant")),
        }
    }

    /// Read a counter.
    pub fn counter(&self, key: &str) -> StoryResult<i32> {
        match self.lookup(key)? {
            FlagValue::Counter(n) => Ok(*n),
            _ => Err(mismatch(key, "counter")),
        }
    }

    /// Turn a switch on or off.
    pub fn set_switch(&mut self, key: &str, on: bool) -> StoryResult<()> {
        match self.kinds.get(key) {
            Some(FlagKind::Switch) => {
                self.values.insert(key.to_string(), FlagValue::Switch(on));
                Ok(())
            }
            Some(_) => Err(mismatch(key, "switch")),
            None => Err(StoryError::UnknownFlag(key.to_string())),
        }
    }

    /// Set a variant flag to one of its declared variants.
    pub fn set_variant(&mut self, key: &str, value: &str) -> StoryResult<()> {
        match self.kinds.get(key) {
            Some(FlagKind::Variant(variants)) => {
                if !variants.iter().any(|v| v == value) {
                    return Err(StoryError::UnknownVariant {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.values
                    .insert(key.to_string(), FlagValue::Variant(value.to_string()));
                Ok(())
            }
            Some(_) => Err(mismatch(key, "variant")),
            None => Err(StoryError::UnknownFlag(key.to_string())),
        }
    }

    /// Adjust a counter by a delta, clamping to its range. Returns the new value.
    pub fn adjust_counter(&mut self, key: &str, delta: i32) -> StoryResult<i32> {
        let (min, max) = match self.kinds.get(key) {
            Some(FlagKind::Counter { min, max }) => (*min, *max),
            Some(_) => return Err(mismatch(key, "counter")),
            None => return Err(StoryError::UnknownFlag(key.to_string())),
        };
        let current = self.counter(key)?;
        let next = current.saturating_add(delta).clamp(min, max);
        self.values.insert(key.to_string(), FlagValue::Counter(next));
        Ok(next)
    }

    fn lookup(&self, key: &str) -> StoryResult<&FlagValue> {
        self.values
            .get(key)
            .ok_or_else(|| StoryError::UnknownFlag(key.to_string()))
    }
}

impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

fn mismatch(key: &str, expected: &'static str) -> StoryError {
    StoryError::FlagKindMismatch {
        key: key.to_string(),
        expected,
    }
}
