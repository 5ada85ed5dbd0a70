//! The built-in Swimming Star narrative.
//!
//! Flung from a celestial city by a supernova, SwimmingStar must rekindle the
//! cosmos: grow a tree of skills, meet the planets drifting in the void, and
//! be reborn in ever smaller forms before building a beacon as a human.
//! Every action spends energy; resting restores it, and running dry ends the
//! journey.

/// Flag keys and the story's flag schema.
pub mod flags;

mod planets;
mod prologue;
mod rebirth;

use ss_core::{Choice, Condition, Effect, NodeId, StoryBuilder, StoryGraph, StoryResult};

pub use prologue::{CAT_PLANET, PROLOGUE, SKILL_TREE};
pub use rebirth::{EXTINGUISHED, SERENE, SHADOWS};

/// Title of the built-in story.
pub const TITLE: &str = "Swimming Star";

/// Energy restored by resting.
pub const REST_ENERGY: i32 = 4;

/// Build the story graph.
pub fn swimming_star() -> StoryResult<StoryGraph> {
    StoryBuilder::new(TITLE, PROLOGUE)
        .schema(flags::schema())
        .on_depleted(EXTINGUISHED)
        .nodes(prologue::nodes(planets::FIRST))
        .nodes(planets::nodes(rebirth::FIRST, &rebirth::entry_effects()))
        .nodes(rebirth::nodes())
        .build()
}

/// A resting choice: a self-loop that restores energy and lets the entity
/// draw closer.
pub(crate) fn rest(label: &str, here: &str) -> Choice {
    Choice::new(label, here)
        .with_effect(Effect::Energy(REST_ENERGY))
        .with_effect(Effect::counter(flags::RESTS, 1))
        .with_effect(Effect::counter(flags::PRESENCE, 1))
        .with_response(
            "SwimmingStar lets herself float, gathering the scraps of warmth that \
             linger in the void.",
        )
}

/// The entity can only be consulted while it is present.
pub(crate) fn entity_present() -> Condition {
    Condition::at_least(flags::PRESENCE, 1)
}

pub(crate) fn node_id(id: &str) -> NodeId {
    NodeId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::{Engine, GameState, Outcome, Selection, SessionConfig, Status};

    fn play(config: SessionConfig, labels: &[&str]) -> (GameState, Status) {
        let graph = swimming_star().unwrap();
        let engine = Engine::new(&graph, config);
        let mut state = engine.start();
        for label in labels {
            engine
                .advance(&mut state, &Selection::Label((*label).to_string()))
                .unwrap_or_else(|e| panic!("'{label}' at '{}': {e}", state.current));
        }
        let status = engine.status(&state).unwrap();
        (state, status)
    }

    const SERENE_PATH: [&str; 16] = [
        "Follow the fragments of memory",
        "Nourish 'Resonant Lullaby' (cost 2)",
        "Nourish 'Guiding Lanterns' (cost 3)",
        "Continue on her way",
        "Let the cats of Ronronia gather around her",
        "Approach",
        "Approach",
        "Call on an allied planet",
        "Approach",
        "Approach",
        "Resist on her own (cost 2)",
        "Listen to the entity",
        "Follow her impulse",
        "Ask for help",
        "Ask for help",
        "Listen to the entity",
    ];

    #[test]
    fn story_builds() {
        let graph = swimming_star().unwrap();
        assert_eq!(graph.title(), TITLE);
        assert_eq!(graph.root(), &node_id(PROLOGUE));
        assert_eq!(graph.on_depleted(), Some(&node_id(EXTINGUISHED)));
    }

    #[test]
    fn every_target_resolves() {
        let graph = swimming_star().unwrap();
        for node in graph.nodes() {
            for choice in &node.choices {
                for id in choice.target.node_ids() {
                    assert!(graph.contains(id), "{} -> {id}", node.id);
                }
            }
        }
    }

    #[test]
    fn three_endings() {
        let graph = swimming_star().unwrap();
        let endings: Vec<(&str, Outcome)> = graph
            .nodes()
            .iter()
            .filter_map(|n| n.outcome.map(|o| (n.id.as_str(), o)))
            .collect();
        assert_eq!(endings.len(), 3);
        assert!(endings.contains(&(SERENE, Outcome::Success)));
        assert!(endings.contains(&(SHADOWS, Outcome::Neutral)));
        assert!(endings.contains(&(EXTINGUISHED, Outcome::Failure)));
    }

    #[test]
    fn longest_path() {
        let graph = swimming_star().unwrap();
        assert_eq!(graph.longest_path(), 14);
    }

    #[test]
    fn serene_walkthrough() {
        let (state, status) = play(SessionConfig::default(), &SERENE_PATH);
        assert_eq!(status, Status::Terminated(Outcome::Success));
        assert_eq!(state.current, node_id(SERENE));
        assert_eq!(state.energy.current(), 12);
        assert_eq!(state.flags.counter(flags::INFLUENCE).unwrap(), 0);
        assert_eq!(state.flags.counter(flags::ALLIES).unwrap(), 4);
        assert_eq!(state.flags.variant(flags::FORM).unwrap(), "human");
        assert_eq!(state.turns(), 16);
    }

    #[test]
    fn lingering_influence_leaves_shadows() {
        let path = [
            "Follow the fragments of memory",
            "Nourish 'Spark of Solidarity' (cost 2)",
            "Continue on her way",
            "Let the cats of Ronronia gather around her",
            "Keep her distance",
            "Approach",
            "Endure the pull and rest",
            "Approach",
            "Keep her distance",
            "Follow her impulse",
            "Follow her impulse",
            "Follow her impulse",
            "Follow her impulse",
            "Follow her impulse",
        ];
        let (state, status) = play(SessionConfig::default(), &path);
        assert_eq!(status, Status::Terminated(Outcome::Neutral));
        assert_eq!(state.current, node_id(SHADOWS));
        assert_eq!(state.flags.counter(flags::INFLUENCE).unwrap(), 1);
        assert_eq!(state.flags.counter(flags::TRUST).unwrap(), 0);
        assert_eq!(state.energy.current(), 12);
    }

    #[test]
    fn advice_is_offered_once_per_beat() {
        let graph = swimming_star().unwrap();
        let engine = Engine::new(&graph, SessionConfig::default());
        let mut state = engine.start();
        for label in [
            "Follow the fragments of memory",
            "Nourish 'Spark of Solidarity' (cost 2)",
            "Continue on her way",
            "Let the cats of Ronronia gather around her",
            "Ask the entity for advice",
        ] {
            engine
                .advance(&mut state, &Selection::Label(label.to_string()))
                .unwrap();
        }
        assert_eq!(state.flags.counter(flags::TRUST).unwrap(), 1);
        let err = engine
            .advance(&mut state, &Selection::Label("Ask the entity for advice".into()))
            .unwrap_err();
        assert!(matches!(err, ss_core::StoryError::InvalidChoice(_)));

        engine
            .advance(&mut state, &Selection::Label("Keep her distance".into()))
            .unwrap();
        assert!(!state.flags.switch(flags::COUNSEL).unwrap());
    }

    #[test]
    fn running_dry_extinguishes_the_star() {
        let config = SessionConfig::default().with_initial_energy(2);
        let (state, status) = play(
            config,
            &[
                "Follow the fragments of memory",
                "Nourish 'Resonant Lullaby' (cost 2)",
            ],
        );
        assert_eq!(status, Status::Terminated(Outcome::Failure));
        assert_eq!(state.current, node_id(EXTINGUISHED));
        assert_eq!(state.energy.current(), 0);
    }

    #[test]
    fn resting_restores_without_moving() {
        let (state, _) = play(
            SessionConfig::default(),
            &["Follow the fragments of memory", "Rest"],
        );
        assert_eq!(state.current, node_id(SKILL_TREE));
        assert_eq!(state.energy.current(), 12);
        assert_eq!(state.flags.counter(flags::RESTS).unwrap(), 1);
        assert_eq!(state.flags.counter(flags::PRESENCE).unwrap(), 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_play_respects_bounds(
                initial in 0i32..15,
                picks in proptest::collection::vec(1usize..6, 0..80),
            ) {
                let graph = swimming_star().unwrap();
                let config = SessionConfig::default().with_initial_energy(initial);
                let engine = Engine::new(&graph, config);
                let mut state = engine.start();
                let mut moves = 0;

                for pick in picks {
                    if engine.status(&state).unwrap() != Status::Running {
                        break;
                    }
                    let available = engine.available_choices(&state).unwrap();
                    prop_assert!(!available.is_empty());
                    let n = (pick - 1) % available.len() + 1;
                    let t = engine.advance(&mut state, &Selection::Number(n)).unwrap();
                    if t.from != t.to {
                        moves += 1;
                    }
                    prop_assert!(state.energy.current() >= 0);
                    prop_assert!(state.energy.current() <= state.energy.max());
                }
                prop_assert!(moves <= graph.longest_path());
            }
        }
    }
}
