//! The opening: the supernova, the tree of skills, and Ronronia.

use ss_core::{Choice, Condition, Effect, Node};

use crate::flags::{ALLIES, LANTERNS, LULLABY, PRESENCE, SOLIDARITY, TRUST};
use crate::{entity_present, rest};

/// Root node.
pub const PROLOGUE: &str = "prologue";
/// The tree of skills.
pub const SKILL_TREE: &str = "skill_tree";
/// The planet of cats.
pub const CAT_PLANET: &str = "cat_planet";

struct Skill {
    key: &'static str,
    name: &'static str,
    promise: &'static str,
    cost: i32,
}

const SKILLS: [Skill; 3] = [
    Skill {
        key: SOLIDARITY,
        name: "Spark of Solidarity",
        promise: "A luminous thread reaches toward potential allies, easing the encounters to come.",
        cost: 2,
    },
    Skill {
        key: LULLABY,
        name: "Resonant Lullaby",
        promise: "It soothes weary worlds and reminds hostile planets that they can change.",
        cost: 2,
    },
    Skill {
        key: LANTERNS,
        name: "Guiding Lanterns",
        promise: "It traces safe paths through the void, back to her anchor.",
        cost: 3,
    },
];

pub(crate) fn nodes(next: &str) -> Vec<Node> {
    vec![prologue(), skill_tree(), cat_planet(next)]
}

fn prologue() -> Node {
    Node::new(
        PROLOGUE,
        "SwimmingStar drifts among the iridescent towers of a celestial city when the \
         shockwave of a supernova flings her far from her kin. The ramparts of light \
         vanish; only darkness and silence remain.\n\n\
         To rekindle the cosmos she must weave new glimmers, yet every action spends the \
         energy pulsing in her heart. She can always rest to catch her breath.\n\n\
         A wise entity, shifting like a tide of emotions, glides up to her and promises \
         to stay at her side through every rebirth.",
    )
    .with_choice(Choice::new("Follow the fragments of memory", SKILL_TREE))
    .with_choice(
        Choice::new("Ask the wise entity what to do", SKILL_TREE)
            .with_condition(entity_present())
            .with_effect(Effect::counter(TRUST, 1))
            .with_response(
                "\u{ab} You need not burn at once. Observe, then choose what feeds your \
                 light. \u{bb}",
            ),
    )
}

fn skill_tree() -> Node {
    let mut node = Node::new(
        SKILL_TREE,
        "The fragments of her memories form a tree of skills. Each branch asks for a \
         spark before it can bloom.",
    );

    for skill in &SKILLS {
        node = node.with_choice(
            Choice::new(
                format!("Nourish '{}' (cost {})", skill.name, skill.cost),
                SKILL_TREE,
            )
            .with_condition(Condition::switch_off(skill.key))
            .with_condition(Condition::EnergyAtLeast(skill.cost))
            .with_effect(Effect::Energy(-skill.cost))
            .with_effect(Effect::set(skill.key))
            .with_response(format!(
                "SwimmingStar feeds the branch '{}' and feels its promise. {}",
                skill.name, skill.promise
            )),
        );
    }

    let any_skill = Condition::Any(SKILLS.iter().map(|s| Condition::switch_on(s.key)).collect());
    node.with_choice(
        Choice::new("Continue on her way", CAT_PLANET)
            .with_condition(any_skill)
            .with_response("The branches hum softly as she drifts away; they will keep watch over her."),
    )
    .with_choice(rest("Rest", SKILL_TREE))
}

fn cat_planet(next: &str) -> Node {
    Node::new(
        CAT_PLANET,
        "In the void an orange and white glow approaches: Ronronia, a world striped with \
         clouds, where cats purr in chorus.",
    )
    .with_choice(
        Choice::new("Let the cats of Ronronia gather around her", next)
            .with_effect(Effect::counter(ALLIES, 1))
            .with_effect(Effect::Energy(3))
            .with_effect(Effect::counter(PRESENCE, 1))
            .with_response(
                "The cats of Ronronia weave a warm halo around SwimmingStar. Their company \
                 strengthens her, and Ronronia becomes her first ally.",
            ),
    )
}
