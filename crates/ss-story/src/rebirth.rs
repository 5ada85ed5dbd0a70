//! The cycle of rebirths and the three endings.

use ss_core::{Choice, Condition, Effect, Node, Outcome, Target};

use crate::flags::{ALLIES, FORM, INFLUENCE, LANTERNS, LULLABY, MAX_ALLIES, PRESENCE, TRUST};
use crate::{entity_present, node_id, rest};

/// The first rebirth.
pub(crate) const FIRST: &str = "rebirth_stardust";
/// Forced ending when energy runs out.
pub const EXTINGUISHED: &str = "extinguished";
/// Ending reached with no negative influence left.
pub const SERENE: &str = "serene";
/// Ending reached while some negative influence remains.
pub const SHADOWS: &str = "shadows";

struct Stage {
    id: &'static str,
    form: &'static str,
    text: &'static str,
    clarity: i32,
    impulse_cost: i32,
    impulse_gain: i32,
}

const STAGES: [Stage; 5] = [
    Stage {
        id: FIRST,
        form: "stardust",
        text: "Reduced to a glittering grain of stardust, she floats freely, sensitive to \
               the faintest cosmic breath.",
        clarity: 2,
        impulse_cost: 1,
        impulse_gain: 2,
    },
    Stage {
        id: "rebirth_droplet",
        form: "droplet",
        text: "She becomes a droplet of light hanging at the edge of a comet, ready to \
               seed a new dawn.",
        clarity: 2,
        impulse_cost: 2,
        impulse_gain: 3,
    },
    Stage {
        id: "rebirth_comet",
        form: "comet",
        text: "As a young comet she traces an unpredictable course, laughing at her own \
               sparks.",
        clarity: 3,
        impulse_cost: 3,
        impulse_gain: 4,
    },
    Stage {
        id: "rebirth_cell",
        form: "cell",
        text: "She becomes a living cell, feeling the first emotions rise like so many \
               chemical signals.",
        clarity: 3,
        impulse_cost: 4,
        impulse_gain: 5,
    },
    Stage {
        id: "rebirth_human",
        form: "human",
        text: "In human form she builds a city inspired by the stories of the worlds she \
               met, surrounded by counsellors more or less enlightened.",
        clarity: 4,
        impulse_cost: 5,
        impulse_gain: 6,
    },
];

/// Effects applied when entering the first rebirth.
pub(crate) fn entry_effects() -> Vec<Effect> {
    vec![Effect::variant(FORM, STAGES[0].form)]
}

pub(crate) fn nodes() -> Vec<Node> {
    let mut nodes: Vec<Node> = STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| stage_node(i, stage))
        .collect();
    nodes.extend([serene(), shadows(), extinguished()]);
    nodes
}

fn stage_node(i: usize, stage: &Stage) -> Node {
    let text = if i == 0 {
        format!(
            "To understand the origin of life and emotions, SwimmingStar must be reborn \
             in ever smaller forms.\n\n{}",
            stage.text
        )
    } else {
        stage.text.to_string()
    };

    let onward = |label: &str| match STAGES.get(i + 1) {
        Some(next) => {
            Choice::new(label, next.id).with_effect(Effect::variant(FORM, next.form))
        }
        None => Choice::branching(
            label,
            Target::Branch {
                cases: vec![(Condition::at_most(INFLUENCE, 0), node_id(SERENE))],
                otherwise: node_id(SHADOWS),
            },
        ),
    };

    let help = help_effects(stage.form)
        .into_iter()
        .fold(onward("Ask for help"), Choice::with_effect);

    Node::new(stage.id, text)
        .with_choice(
            onward("Listen to the entity")
                .with_condition(entity_present())
                .with_effect(Effect::counter(TRUST, 1))
                .with_effect(Effect::Energy(stage.clarity))
                .with_effect(Effect::counter(PRESENCE, 1))
                .with_response(format!(
                    "She listens closely to the wise entity. Clarity springs forth and \
                     restores {} energy.",
                    stage.clarity
                )),
        )
        .with_choice(
            onward("Follow her impulse")
                .with_effect(Effect::Energy(-stage.impulse_cost))
                .with_effect(Effect::Energy(stage.impulse_gain))
                .with_response(format!(
                    "She follows her intuition without a filter. The gamble costs {} energy \
                     and luck returns {}.",
                    stage.impulse_cost, stage.impulse_gain
                )),
        )
        .with_choice(
            help.with_condition(entity_present())
                .with_response(help_response(stage.form)),
        )
        .with_choice(rest("Rest", stage.id))
}

fn help_effects(form: &str) -> Vec<Effect> {
    match form {
        "stardust" => vec![Effect::counter(PRESENCE, 2), Effect::Energy(1)],
        "droplet" => vec![Effect::counter(INFLUENCE, -1), Effect::Energy(2)],
        "comet" => vec![
            Effect::when(Condition::at_least(ALLIES, 1), vec![Effect::Energy(3)]),
            Effect::when(Condition::at_most(ALLIES, 0), vec![Effect::Energy(1)]),
        ],
        "cell" => vec![
            Effect::when(Condition::switch_on(LANTERNS), vec![Effect::counter(ALLIES, 1)]),
            Effect::when(Condition::switch_on(LULLABY), vec![Effect::counter(ALLIES, 1)]),
            Effect::Energy(3),
        ],
        // One energy per ally, at least one.
        _ => std::iter::once(Effect::Energy(1))
            .chain((2..=MAX_ALLIES).map(|n| {
                Effect::when(Condition::at_least(ALLIES, n), vec![Effect::Energy(1)])
            }))
            .chain(std::iter::once(Effect::counter(TRUST, 1)))
            .collect(),
    }
}

fn help_response(form: &str) -> &'static str {
    match form {
        "stardust" => {
            "The entity weaves a protective veil, its presence growing stronger around \
             SwimmingStar."
        }
        "droplet" => "Heavy influences settle like waves calmed by a luminous breeze.",
        "comet" => {
            "An ally shares the emotional weight of this transformation. Without one, the \
             entity carries what it can."
        }
        "cell" => {
            "Her skills call new benevolent presences to her side, and she forges her own \
             resilience."
        }
        _ => {
            "SwimmingStar gathers a council of allied worlds. Every sincere voice gives her \
             back some energy."
        }
    }
}

const BEACON: &str = "At the heart of the city she built, SwimmingStar lights a beacon gathering \
                      every glimmer she met along the way.\n\n\
                      The wise entity, clearer now, smiles: \u{ab} Your decisions have \
                      sculpted the light around us. \u{bb}";

fn serene() -> Node {
    Node::ending(
        SERENE,
        format!(
            "{BEACON}\n\nThe negative influences have faded: the universe is reborn in a \
             serene burst of light."
        ),
        Outcome::Success,
    )
}

fn shadows() -> Node {
    Node::ending(
        SHADOWS,
        format!(
            "{BEACON}\n\nSome shadows remain, but SwimmingStar now knows how to light them."
        ),
        Outcome::Neutral,
    )
}

fn extinguished() -> Node {
    Node::ending(
        EXTINGUISHED,
        "Spent by her efforts, SwimmingStar goes out and drifts in the void. The universe \
         will wait for another cycle to wake.",
        Outcome::Failure,
    )
}
