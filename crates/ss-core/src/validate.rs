//! Construction-time validation of a story graph.
//!
//! Checks that every target resolves, that terminal markers are consistent,
//! that conditions and effects only reference declared flags of the right
//! kind, and that an ending is reachable from the root.

use std::collections::{HashSet, VecDeque};

use crate::condition::Condition;
use crate::effect::Effect;
use crate::flag::{FlagKind, FlagSchema};
use crate::graph::StoryGraph;
use crate::node::NodeId;

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found (node, and choice if any).
    pub location: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    pub(crate) fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: true,
        }
    }

    pub(crate) fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}

/// Validate a story graph. Returns every issue found.
pub fn validate(graph: &StoryGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !graph.contains(graph.root()) {
        issues.push(ValidationIssue::error(
            "story",
            format!("root node '{}' does not exist", graph.root()),
        ));
    }

    if let Some(depleted) = graph.on_depleted() {
        match graph.node(depleted) {
            Ok(node) if !node.is_terminal() => issues.push(ValidationIssue::error(
                "story",
                format!("on-depleted node '{depleted}' is not terminal"),
            )),
            Ok(_) => {}
            Err(_) => issues.push(ValidationIssue::error(
                "story",
                format!("on-depleted node '{depleted}' does not exist"),
            )),
        }
    }

    for node in graph.nodes() {
        let at_node = format!("node '{}'", node.id);
        if node.is_terminal() && !node.choices.is_empty() {
            issues.push(ValidationIssue::error(&at_node, "terminal node has choices"));
        }
        if !node.is_terminal() && node.choices.is_empty() {
            issues.push(ValidationIssue::error(
                &at_node,
                "non-terminal node has no choices",
            ));
        }

        for choice in &node.choices {
            let at_choice = format!("{at_node}, choice '{}'", choice.label);
            for id in choice.target.node_ids() {
                if !graph.contains(id) {
                    issues.push(ValidationIssue::error(
                        &at_choice,
                        format!("target '{id}' does not exist"),
                    ));
                }
            }
            for condition in &choice.conditions {
                check_condition(condition, graph.schema(), &at_choice, &mut issues);
            }
            if let crate::node::Target::Branch { cases, .. } = &choice.target {
                for (condition, _) in cases {
                    check_condition(condition, graph.schema(), &at_choice, &mut issues);
                }
            }
            for effect in &choice.effects {
                check_effect(effect, graph.schema(), &at_choice, &mut issues);
            }
        }
    }

    if graph.contains(graph.root()) {
        check_reachability(graph, &mut issues);
    }

    issues
}

fn check_reachability(graph: &StoryGraph, issues: &mut Vec<ValidationIssue>) {
    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut queue = VecDeque::from([graph.root()]);
    let mut ending_reachable = false;

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        let Ok(node) = graph.node(id) else {
            continue;
        };
        ending_reachable |= node.is_terminal();
        for choice in &node.choices {
            queue.extend(choice.target.node_ids());
        }
    }

    if !ending_reachable {
        issues.push(ValidationIssue::error(
            "story",
            format!("no terminal node is reachable from '{}'", graph.root()),
        ));
    }

    for node in graph.nodes() {
        let is_depleted_target = graph.on_depleted() == Some(&node.id);
        if !seen.contains(&node.id) && !is_depleted_target {
            issues.push(ValidationIssue::warning(
                format!("node '{}'", node.id),
                "unreachable from the root",
            ));
        }
    }
}

fn check_condition(
    condition: &Condition,
    schema: &FlagSchema,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match condition {
        Condition::SwitchOn(key) => expect_kind(key, "switch", schema, location, issues),
        Condition::VariantIs { key, value } => {
            check_variant(key, value, schema, location, issues)
        }
        Condition::CounterAtLeast { key, .. } | Condition::CounterAtMost { key, .. } => {
            expect_kind(key, "counter", schema, location, issues)
        }
        Condition::Not(inner) => check_condition(inner, schema, location, issues),
        Condition::All(conditions) | Condition::Any(conditions) => {
            for c in conditions {
                check_condition(c, schema, location, issues);
            }
        }
        Condition::EnergyAtLeast(_) | Condition::EnergyAtMost(_) | Condition::Always => {}
    }
}

fn check_effect(
    effect: &Effect,
    schema: &FlagSchema,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match effect {
        Effect::Energy(_) => {}
        Effect::Switch { key, .. } => expect_kind(key, "switch", schema, location, issues),
        Effect::Variant { key, value } => check_variant(key, value, schema, location, issues),
        Effect::Counter { key, .. } => expect_kind(key, "counter", schema, location, issues),
        Effect::When { condition, effects } => {
            check_condition(condition, schema, location, issues);
            for e in effects {
                check_effect(e, schema, location, issues);
            }
        }
    }
}

fn expect_kind(
    key: &str,
    expected: &str,
    schema: &FlagSchema,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match schema.get(key) {
        None => issues.push(ValidationIssue::error(
            location,
            format!("flag '{key}' is not declared"),
        )),
        Some(def) if def.kind.name() != expected => issues.push(ValidationIssue::error(
            location,
            format!("flag '{key}' is a {}, not a {expected}", def.kind.name()),
        )),
        Some(_) => {}
    }
}

fn check_variant(
    key: &str,
    value: &str,
    schema: &FlagSchema,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match schema.get(key).map(|def| &def.kind) {
        Some(FlagKind::Variant(variants)) => {
            if !variants.iter().any(|v| v == value) {
                issues.push(ValidationIssue::error(
                    location,
                    format!("flag '{key}' has no variant '{value}'"),
                ));
            }
        }
        _ => expect_kind(key, "variant", schema, location, issues),
    }
}
