//! The story graph.
//!
//! A [`StoryGraph`] is built once through a [`StoryBuilder`], validated, and
//! never mutated afterwards.

use std::collections::{HashMap, HashSet};

use crate::error::{StoryError, StoryResult};
use crate::flag::FlagSchema;
use crate::node::{Choice, Node, NodeId};
use crate::state::GameState;
use crate::validate::{ValidationIssue, validate};

/// An immutable, validated graph of story nodes.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    title: String,
    root: NodeId,
    on_depleted: Option<NodeId>,
    schema: FlagSchema,
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl StoryGraph {
    /// The story's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The node every session starts at.
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// The terminal node forced when energy runs out, if the story has one.
    pub fn on_depleted(&self) -> Option<&NodeId> {
        self.on_depleted.as_ref()
    }

    /// The declared flags.
    pub fn schema(&self) -> &FlagSchema {
        &self.schema
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> StoryResult<&Node> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| StoryError::UnknownNode(id.clone()))
    }

    /// The choices of `node` whose preconditions hold, in declaration order.
    pub fn available_choices<'a>(&self, node: &'a Node, state: &GameState) -> Vec<&'a Choice> {
        node.choices
            .iter()
            .filter(|choice| choice.is_available(state))
            .collect()
    }

    /// Number of transitions on the longest acyclic path from the root to an
    /// ending, not counting self-loops.
    ///
    /// Explores every simple path, so the cost grows with the number of
    /// distinct routes through the graph.
    pub fn longest_path(&self) -> usize {
        let mut on_path = HashSet::new();
        self.longest_from(&self.root, &mut on_path)
    }

    fn longest_from<'a>(&'a self, id: &'a NodeId, on_path: &mut HashSet<&'a NodeId>) -> usize {
        let Ok(node) = self.node(id) else {
            return 0;
        };
        if node.is_terminal() {
            return 0;
        }

        on_path.insert(id);
        let mut best = 0;
        for choice in &node.choices {
            for next in choice.target.node_ids() {
                if on_path.contains(next) {
                    continue;
                }
                best = best.max(1 + self.longest_from(next, on_path));
            }
        }
        on_path.remove(id);

        best
    }
}

/// Builder for a [`StoryGraph`].
#[derive(Debug, Clone)]
pub struct StoryBuilder {
    title: String,
    root: NodeId,
    on_depleted: Option<NodeId>,
    schema: FlagSchema,
    nodes: Vec<Node>,
}

impl StoryBuilder {
    /// Start a story with a title and root node id.
    pub fn new(title: impl Into<String>, root: impl Into<NodeId>) -> Self {
        Self {
            title: title.into(),
            root: root.into(),
            on_depleted: None,
            schema: FlagSchema::new(),
            nodes: Vec::new(),
        }
    }

    /// Set the flag schema.
    pub fn schema(mut self, schema: FlagSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the terminal node forced when energy runs out.
    pub fn on_depleted(mut self, id: impl Into<NodeId>) -> Self {
        self.on_depleted = Some(id.into());
        self
    }

    /// Add a node.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add several nodes.
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Validate and build the graph.
    ///
    /// Fails with [`StoryError::InvalidContent`] listing every error found.
    /// Warnings are logged and do not fail the build.
    pub fn build(self) -> StoryResult<StoryGraph> {
        let mut issues = Vec::new();
        let mut index = HashMap::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for node in self.nodes {
            if index.contains_key(&node.id) {
                issues.push(ValidationIssue::error(
                    format!("node '{}'", node.id),
                    "duplicate node id",
                ));
                continue;
            }
            index.insert(node.id.clone(), nodes.len());
            nodes.push(node);
        }

        let graph = StoryGraph {
            title: self.title,
            root: self.root,
            on_depleted: self.on_depleted,
            schema: self.schema,
            nodes,
            index,
        };

        issues.extend(validate(&graph));
        for warning in issues.iter().filter(|i| !i.is_error) {
            log::warn!("{warning}");
        }
        issues.retain(|i| i.is_error);

        if issues.is_empty() {
            log::debug!(
                "built story '{}' with {} nodes",
                graph.title,
                graph.nodes.len()
            );
            Ok(graph)
        } else {
            Err(StoryError::InvalidContent(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::effect::Effect;
    use crate::node::Outcome;
    use crate::track::EnergyTrack;

    fn test_graph() -> StoryGraph {
        StoryBuilder::new("Test", "start")
            .schema(FlagSchema::new().with_switch("lantern"))
            .node(
                Node::new("start", "The void.")
                    .with_choice(
                        Choice::new("Light the lantern", "start")
                            .with_condition(Condition::switch_off("lantern"))
                            .with_effect(Effect::set("lantern")),
                    )
                    .with_choice(
                        Choice::new("Follow the lantern", "middle")
                            .with_condition(Condition::switch_on("lantern")),
                    )
                    .with_choice(Choice::new("Drift", "middle")),
            )
            .node(
                Node::new("middle", "A planet.")
                    .with_choice(Choice::new("Land", "end"))
                    .with_choice(Choice::new("Rest", "middle").with_effect(Effect::Energy(4))),
            )
            .node(Node::ending("end", "Home.", Outcome::Success))
            .build()
            .unwrap()
    }

    fn state_at(graph: &StoryGraph, id: &str) -> GameState {
        GameState::new(
            NodeId::new(id),
            EnergyTrack::new(10, 10),
            graph.schema().defaults(),
        )
    }

    #[test]
    fn node_lookup() {
        let graph = test_graph();
        assert_eq!(graph.node(&NodeId::new("middle")).unwrap().text, "A planet.");
        assert!(matches!(
            graph.node(&NodeId::new("nowhere")),
            Err(StoryError::UnknownNode(_))
        ));
    }

    #[test]
    fn available_choices_filter_in_order() {
        let graph = test_graph();
        let mut state = state_at(&graph, "start");
        let node = graph.node(graph.root()).unwrap();

        let labels: Vec<&str> = graph
            .available_choices(node, &state)
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ["Light the lantern", "Drift"]);

        state.flags.set_switch("lantern", true).unwrap();
        let labels: Vec<&str> = graph
            .available_choices(node, &state)
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, ["Follow the lantern", "Drift"]);
    }

    #[test]
    fn available_choices_is_idempotent() {
        let graph = test_graph();
        let state = state_at(&graph, "start");
        let node = graph.node(graph.root()).unwrap();
        assert_eq!(
            graph.available_choices(node, &state),
            graph.available_choices(node, &state)
        );
    }

    #[test]
    fn longest_path_ignores_self_loops() {
        assert_eq!(test_graph().longest_path(), 2);
    }

    #[test]
    fn longest_path_follows_routes_through_a_cycle() {
        let graph = StoryBuilder::new("Cycle", "a")
            .node(
                Node::new("a", "A.")
                    .with_choice(Choice::new("To b", "b"))
                    .with_choice(Choice::new("To c", "c")),
            )
            .node(
                Node::new("b", "B.")
                    .with_choice(Choice::new("To c", "c"))
                    .with_choice(Choice::new("To f", "f")),
            )
            .node(
                Node::new("c", "C.")
                    .with_choice(Choice::new("To b", "b"))
                    .with_choice(Choice::new("To e", "e")),
            )
            .node(Node::new("f", "F.").with_choice(Choice::new("To g", "g")))
            .node(Node::new("g", "G.").with_choice(Choice::new("To e", "e")))
            .node(Node::ending("e", "End.", Outcome::Success))
            .build()
            .unwrap();

        // a -> c -> b -> f -> g -> e
        assert_eq!(graph.longest_path(), 5);
    }

    #[test]
    fn nodes_keep_declaration_order() {
        let graph = test_graph();
        let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["start", "middle", "end"]);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.title(), "Test");
    }
}
