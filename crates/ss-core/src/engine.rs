//! The story engine.
//!
//! The engine walks a [`StoryGraph`] on behalf of one [`GameState`]. It owns
//! no state itself: every call takes the session state explicitly, so any
//! number of independent sessions can share one graph.

use log::{debug, info};

use crate::config::SessionConfig;
use crate::effect::{EffectReport, apply_all};
use crate::error::{StoryError, StoryResult};
use crate::graph::StoryGraph;
use crate::node::{Choice, Node, NodeId, Outcome, Target};
use crate::state::{GameState, Step};
use crate::track::EnergyTrack;

/// Whether a session can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The current node offers choices.
    Running,
    /// The current node is an ending.
    Terminated(Outcome),
}

/// How the player picks a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position among the currently available choices.
    Number(usize),
    /// Choice label, matched case-insensitively.
    Label(String),
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Number(n) => write!(f, "#{n}"),
            Selection::Label(label) => write!(f, "'{label}'"),
        }
    }
}

/// The result of a successful [`Engine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Label of the choice taken.
    pub label: String,
    /// Narration attached to the choice.
    pub response: Option<String>,
    /// Node the choice was taken at.
    pub from: NodeId,
    /// Node the session moved to.
    pub to: NodeId,
    /// Energy before the choice.
    pub energy_before: i32,
    /// Energy after the choice.
    pub energy_after: i32,
    /// True if running out of energy overrode the choice's target.
    pub forced: bool,
    /// Status after the transition.
    pub status: Status,
}

/// Drives sessions through a story graph.
#[derive(Debug, Clone)]
pub struct Engine<'g> {
    graph: &'g StoryGraph,
    config: SessionConfig,
}

impl<'g> Engine<'g> {
    /// Create an engine for a graph.
    pub fn new(graph: &'g StoryGraph, config: SessionConfig) -> Self {
        Self { graph, config }
    }

    /// The graph being played.
    pub fn graph(&self) -> &'g StoryGraph {
        self.graph
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create the state of a new session at the root node.
    pub fn start(&self) -> GameState {
        GameState::new(
            self.graph.root().clone(),
            EnergyTrack::new(self.config.initial_energy, self.config.max_energy),
            self.graph.schema().defaults(),
        )
    }

    /// The node the session is at.
    pub fn current_node(&self, state: &GameState) -> StoryResult<&'g Node> {
        self.graph.node(&state.current)
    }

    /// The choices currently offered, in declaration order.
    pub fn available_choices(&self, state: &GameState) -> StoryResult<Vec<&'g Choice>> {
        let node = self.current_node(state)?;
        Ok(self.graph.available_choices(node, state))
    }

    /// Whether the session is still running.
    pub fn status(&self, state: &GameState) -> StoryResult<Status> {
        Ok(match self.current_node(state)?.outcome {
            Some(outcome) => Status::Terminated(outcome),
            None => Status::Running,
        })
    }

    /// Take a choice.
    ///
    /// Applies the choice's effects and moves to its target. On error the
    /// state is left untouched.
    pub fn advance(&self, state: &mut GameState, selection: &Selection) -> StoryResult<Transition> {
        let node = self.current_node(state)?;
        if let Some(outcome) = node.outcome {
            return Err(StoryError::SessionOver(outcome));
        }

        let available = self.graph.available_choices(node, state);
        let choice = resolve(&available, selection)
            .ok_or_else(|| StoryError::InvalidChoice(selection.to_string()))?;

        let mut next = state.clone();
        let mut report = EffectReport::default();
        apply_all(&choice.effects, &mut next, &mut report)?;

        let nominal = resolve_target(&choice.target, &next);
        let (to, forced) = match self.graph.on_depleted() {
            Some(depleted) if report.drained => (depleted.clone(), depleted != nominal),
            _ => (nominal.clone(), false),
        };
        if forced {
            info!(
                "energy ran out at '{}': '{}' diverted from '{}' to '{}'",
                node.id, choice.label, nominal, to
            );
        }

        let status = match self.graph.node(&to)?.outcome {
            Some(outcome) => Status::Terminated(outcome),
            None => Status::Running,
        };

        next.history.push(Step {
            node: node.id.clone(),
            choice: choice.label.clone(),
        });
        next.current = to.clone();

        let transition = Transition {
            label: choice.label.clone(),
            response: choice.response.clone(),
            from: node.id.clone(),
            to,
            energy_before: state.energy.current(),
            energy_after: next.energy.current(),
            forced,
            status,
        };
        *state = next;

        debug!(
            "'{}' -> '{}' via '{}' (energy {} -> {})",
            transition.from,
            transition.to,
            transition.label,
            transition.energy_before,
            transition.energy_after
        );
        if let Status::Terminated(outcome) = status {
            info!(
                "session ended at '{}' ({outcome}) after {} turns",
                transition.to,
                state.turns()
            );
        }

        Ok(transition)
    }
}

fn resolve<'c>(available: &[&'c Choice], selection: &Selection) -> Option<&'c Choice> {
    match selection {
        Selection::Number(n) => n
            .checked_sub(1)
            .and_then(|i| available.get(i))
            .copied(),
        Selection::Label(label) => available
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label.trim()))
            .copied(),
    }
}

fn resolve_target<'t>(target: &'t Target, state: &GameState) -> &'t NodeId {
    match target {
        Target::Node(id) => id,
        Target::Branch { cases, otherwise } => cases
            .iter()
            .find(|(condition, _)| condition.evaluate(state))
            .map(|(_, id)| id)
            .unwrap_or(otherwise),
    }
}
