//! Story nodes and the choices that connect them.

use serde::Serialize;

use crate::condition::Condition;
use crate::effect::Effect;

/// Unique identifier of a story node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How a terminal node ends the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The story ends well.
    Success,
    /// The story ends badly.
    Failure,
    /// Neither.
    Neutral,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Neutral => "neutral ending",
        };
        f.write_str(label)
    }
}

/// Where a choice leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Always the same node.
    Node(NodeId),
    /// The first case whose condition holds after the choice's effects were
    /// applied, otherwise the fallback.
    Branch {
        /// Conditions checked in order.
        cases: Vec<(Condition, NodeId)>,
        /// Target when no case holds.
        otherwise: NodeId,
    },
}

impl Target {
    /// Every node id this target can resolve to.
    pub fn node_ids(&self) -> Vec<&NodeId> {
        match self {
            Target::Node(id) => vec![id],
            Target::Branch { cases, otherwise } => cases
                .iter()
                .map(|(_, id)| id)
                .chain(std::iter::once(otherwise))
                .collect(),
        }
    }
}

/// A player-selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The text shown in the menu.
    pub label: String,
    /// Narration shown after the choice is taken.
    pub response: Option<String>,
    /// Conditions that must all hold for the choice to be offered.
    pub conditions: Vec<Condition>,
    /// Effects applied in order when the choice is taken.
    pub effects: Vec<Effect>,
    /// Where the choice leads.
    pub target: Target,
}

impl Choice {
    /// Create a choice leading to a fixed node.
    pub fn new(label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self::branching(label, Target::Node(target.into()))
    }

    /// Create a choice with an arbitrary target.
    pub fn branching(label: impl Into<String>, target: Target) -> Self {
        Self {
            label: label.into(),
            response: None,
            conditions: Vec::new(),
            effects: Vec::new(),
            target,
        }
    }

    /// Set the response narration.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Add a precondition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if every condition holds.
    pub fn is_available(&self, state: &crate::state::GameState) -> bool {
        self.conditions.iter().all(|c| c.evaluate(state))
    }

    /// Returns true if the choice can only lead back to `node`.
    pub fn is_self_loop(&self, node: &NodeId) -> bool {
        self.target.node_ids().iter().all(|id| *id == node)
    }
}

/// One narrative beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique id.
    pub id: NodeId,
    /// Descriptive text.
    pub text: String,
    /// Choices in declaration order.
    pub choices: Vec<Choice>,
    /// Set on terminal nodes.
    pub outcome: Option<Outcome>,
}

impl Node {
    /// Create a non-terminal node.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
            outcome: None,
        }
    }

    /// Create a terminal node.
    pub fn ending(id: impl Into<NodeId>, text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::new(id, text)
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Returns true if the node ends the story.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_builder() {
        let node = Node::new("tree", "A tree of light.")
            .with_choice(Choice::new("Rest", "tree").with_effect(Effect::Energy(4)))
            .with_choice(Choice::new("Move on", "planet"));

        assert_eq!(node.id, NodeId::new("tree"));
        assert_eq!(node.choices.len(), 2);
        assert!(!node.is_terminal());
    }

    #[test]
    fn ending_is_terminal() {
        let node = Node::ending("collapse", "The light goes out.", Outcome::Failure);
        assert!(node.is_terminal());
        assert_eq!(node.outcome, Some(Outcome::Failure));
    }

    #[test]
    fn choice_builder() {
        let choice = Choice::new("Learn the lullaby (cost 2)", "tree")
            .with_condition(Condition::EnergyAtLeast(2))
            .with_effect(Effect::Energy(-2))
            .with_effect(Effect::set("lullaby"))
            .with_response("The branch hums.");

        assert_eq!(choice.label, "Learn the lullaby (cost 2)");
        assert_eq!(choice.conditions.len(), 1);
        assert_eq!(choice.effects.len(), 2);
        assert_eq!(choice.response.as_deref(), Some("The branch hums."));
    }

    #[test]
    fn self_loop_detection() {
        let here = NodeId::new("tree");
        assert!(Choice::new("Rest", "tree").is_self_loop(&here));
        assert!(!Choice::new("Leave", "planet").is_self_loop(&here));

        let branch = Choice::branching(
            "Wander",
            Target::Branch {
                cases: vec![(Condition::Always, NodeId::new("tree"))],
                otherwise: NodeId::new("planet"),
            },
        );
        assert!(!branch.is_self_loop(&here));
    }

    #[test]
    fn target_ids() {
        let target = Target::Branch {
            cases: vec![
                (Condition::Always, NodeId::new("a")),
                (Condition::Always, NodeId::new("b")),
            ],
            otherwise: NodeId::new("c"),
        };
        let ids: Vec<&str> = target.node_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
