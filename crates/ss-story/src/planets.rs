//! Encounters with the planets drifting in the void.
//!
//! Beneficial worlds offer allies and warmth. Exhausting worlds drain the
//! star when she approaches and hold her in their pull until she resists,
//! calls an ally, or gives in and rests.

use ss_core::{Choice, Condition, Effect, Node};

use crate::flags::{ALLIES, COUNSEL, INFLUENCE, PRESENCE, RESTS, TRUST};
use crate::{REST_ENERGY, entity_present, rest};

/// The first planet met after Ronronia.
pub(crate) const FIRST: &str = "planet_chrysalis";

const REWARD: i32 = 3;
const PENALTY: i32 = 3;
const RESIST_COST: i32 = 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Beneficial,
    Exhausting,
}

struct Encounter {
    id: &'static str,
    name: &'static str,
    disposition: Disposition,
    description: &'static str,
}

const ENCOUNTERS: [Encounter; 4] = [
    Encounter {
        id: FIRST,
        name: "the Dawn Chrysalis",
        disposition: Disposition::Beneficial,
        description: "A translucent sphere pulses softly. Each pulse releases spores of \
                      light in search of a companion.",
    },
    Encounter {
        id: "planet_fortress",
        name: "the Fortress of Echoes",
        disposition: Disposition::Exhausting,
        description: "An angular world turns every ray into a metallic cry. Drawing near \
                      promises a difficult dialogue.",
    },
    Encounter {
        id: "planet_compass",
        name: "the Crystal Compass",
        disposition: Disposition::Beneficial,
        description: "Its glittering rings seem able to realign the stars themselves.",
    },
    Encounter {
        id: "planet_torment",
        name: "the Dark Torment",
        disposition: Disposition::Exhausting,
        description: "A vortex of dark clouds pulls SwimmingStar into an exhausting dance, \
                      fed by discordant whispers.",
    },
];

/// Nodes for every encounter. The last one leads to `exit`, applying
/// `on_exit` on the way out.
pub(crate) fn nodes(exit: &str, on_exit: &[Effect]) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, encounter) in ENCOUNTERS.iter().enumerate() {
        let (next, leaving) = match ENCOUNTERS.get(i + 1) {
            Some(following) => (following.id, &[][..]),
            None => (exit, on_exit),
        };
        nodes.push(encounter_node(encounter, next, leaving));
        if encounter.disposition == Disposition::Exhausting {
            nodes.push(grip_node(encounter, next, leaving));
        }
    }
    nodes
}

fn grip_id(encounter: &Encounter) -> String {
    format!("{}_grip", encounter.id)
}

/// A choice that moves on to the next beat.
fn onward(label: &str, next: &str, leaving: &[Effect]) -> Choice {
    leaving
        .iter()
        .cloned()
        .fold(Choice::new(label, next), Choice::with_effect)
        .with_effect(Effect::clear(COUNSEL))
}

fn encounter_node(encounter: &Encounter, next: &str, leaving: &[Effect]) -> Node {
    let node = Node::new(encounter.id, encounter.description);
    let node = match encounter.disposition {
        Disposition::Beneficial => node
            .with_choice(
                onward("Approach", next, leaving)
                    .with_effect(Effect::counter(ALLIES, 1))
                    .with_effect(Effect::Energy(REWARD))
                    .with_effect(Effect::counter(TRUST, 1))
                    .with_response(format!(
                        "{} draws near and radiates a regenerating warmth. It will answer \
                         when she calls.",
                        capitalize(encounter.name)
                    )),
            )
            .with_choice(
                onward("Keep her distance", next, leaving)
                    .with_effect(Effect::counter(TRUST, 1))
                    .with_response(
                        "SwimmingStar stays at a safe distance, watching the world turn \
                         without touching it for now.",
                    ),
            ),
        Disposition::Exhausting => node
            .with_choice(
                Choice::new("Approach", grip_id(encounter))
                    .with_effect(Effect::Energy(-PENALTY))
                    .with_effect(Effect::counter(INFLUENCE, 1))
                    .with_effect(Effect::counter(PRESENCE, -1))
                    .with_effect(Effect::clear(COUNSEL))
                    .with_response(format!(
                        "{} radiates an exhausting light. SwimmingStar loses {PENALTY} energy.",
                        capitalize(encounter.name)
                    )),
            )
            .with_choice(
                onward("Keep her distance", next, leaving)
                    .with_effect(Effect::when(
                        Condition::at_least(INFLUENCE, 1),
                        vec![Effect::counter(TRUST, -1)],
                    ))
                    .with_response(
                        "SwimmingStar stays at a safe distance, watching the world turn \
                         without touching it for now.",
                    ),
            ),
    };

    let advice = match encounter.disposition {
        Disposition::Beneficial => {
            "This world sings on your frequency. Approach without fear, but mind your breath."
        }
        Disposition::Exhausting => {
            "This planet wants to mend its fractures with your strength. Let your allies \
             lend a hand."
        }
    };

    node.with_choice(counsel(encounter.id, advice, false))
        .with_choice(counsel(encounter.id, advice, true))
        .with_choice(rest("Rest", encounter.id))
}

/// Asking the entity for advice. When negative influence piles up, the
/// entity adds a warning.
fn counsel(here: &str, advice: &str, burdened: bool) -> Choice {
    let load = if burdened {
        Condition::at_least(INFLUENCE, 2)
    } else {
        Condition::at_most(INFLUENCE, 1)
    };
    let mut response = format!("The voice of the wise entity resonates: \u{ab} {advice} \u{bb}");
    if burdened {
        response.push_str(
            "\n\u{ab} Heavy influences are piling up. Grant yourself rest, and call on an \
             ally if you can. \u{bb}",
        );
    }

    Choice::new("Ask the entity for advice", here)
        .with_condition(entity_present())
        .with_condition(Condition::switch_off(COUNSEL))
        .with_condition(load)
        .with_effect(Effect::counter(TRUST, 1))
        .with_effect(Effect::set(COUNSEL))
        .with_response(response)
}

fn grip_node(encounter: &Encounter, next: &str, leaving: &[Effect]) -> Node {
    Node::new(
        grip_id(encounter),
        format!(
            "The pull of {} clings to her light. How can she break free?",
            encounter.name
        ),
    )
    .with_choice(
        onward(&format!("Resist on her own (cost {RESIST_COST})"), next, leaving)
            .with_condition(Condition::EnergyAtLeast(RESIST_COST))
            .with_effect(Effect::Energy(-RESIST_COST))
            .with_effect(Effect::counter(INFLUENCE, -1))
            .with_response(format!(
                "Focusing her inner glow, SwimmingStar splits the grip of {}.",
                encounter.name
            )),
    )
    .with_choice(
        onward("Call on an allied planet", next, leaving)
            .with_condition(Condition::at_least(ALLIES, 1))
            .with_effect(Effect::counter(ALLIES, -1))
            .with_effect(Effect::counter(INFLUENCE, -1))
            .with_effect(Effect::counter(PRESENCE, 1))
            .with_response(format!(
                "An allied world surges forth and turns {} from its orbit, scattering the \
                 shadows it cast.",
                encounter.name
            )),
    )
    .with_choice(
        onward("Endure the pull and rest", next, leaving)
            .with_effect(Effect::when(
                Condition::at_least(INFLUENCE, 1),
                vec![Effect::counter(TRUST, -1)],
            ))
            .with_effect(Effect::Energy(REST_ENERGY))
            .with_effect(Effect::counter(RESTS, 1))
            .with_effect(Effect::counter(PRESENCE, 1))
            .with_response(
                "She lets the tension wash over her and gathers what warmth she can. The \
                 world releases her, but its shadow lingers.",
            ),
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
