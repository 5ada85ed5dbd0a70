use comfy_table::{ContentArrangement, Table};

use ss_core::{Condition, Effect, Target};

pub fn run() -> Result<(), String> {
    let graph = super::load_story()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Node", "Choice", "Target", "Effects"]);

    for node in graph.nodes() {
        if let Some(outcome) = node.outcome {
            table.add_row(vec![
                node.id.to_string(),
                "-".to_string(),
                format!("ends: {outcome}"),
                String::new(),
            ]);
            continue;
        }
        for choice in &node.choices {
            let target = if choice.is_self_loop(&node.id) {
                "(stays)".to_string()
            } else {
                describe_target(&choice.target)
            };
            let mut label = choice.label.clone();
            if !choice.conditions.is_empty() {
                let conditions: Vec<String> =
                    choice.conditions.iter().map(describe_condition).collect();
                label.push_str(&format!("\nif {}", conditions.join(" and ")));
            }
            let effects: Vec<String> = choice.effects.iter().map(describe_effect).collect();
            table.add_row(vec![node.id.to_string(), label, target, effects.join(", ")]);
        }
    }

    println!("{table}");
    println!();
    println!("  {} nodes", graph.len());

    Ok(())
}

fn describe_target(target: &Target) -> String {
    match target {
        Target::Node(id) => id.to_string(),
        Target::Branch { cases, otherwise } => {
            let mut parts: Vec<String> = cases
                .iter()
                .map(|(condition, id)| format!("{id} if {}", describe_condition(condition)))
                .collect();
            parts.push(format!("{otherwise} otherwise"));
            parts.join("; ")
        }
    }
}

fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::Always => "always".to_string(),
        Condition::EnergyAtLeast(n) => format!("energy >= {n}"),
        Condition::EnergyAtMost(n) => format!("energy <= {n}"),
        Condition::SwitchOn(key) => key.clone(),
        Condition::VariantIs { key, value } => format!("{key} = {value}"),
        Condition::CounterAtLeast { key, value } => format!("{key} >= {value}"),
        Condition::CounterAtMost { key, value } => format!("{key} <= {value}"),
        Condition::Not(inner) => format!("not {}", describe_condition(inner)),
        Condition::All(all) => join_conditions(all, " and "),
        Condition::Any(any) => join_conditions(any, " or "),
    }
}

fn join_conditions(conditions: &[Condition], sep: &str) -> String {
    let parts: Vec<String> = conditions.iter().map(describe_condition).collect();
    format!("({})", parts.join(sep))
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Energy(delta) => format!("energy {delta:+}"),
        Effect::Switch { key, on: true } => format!("set {key}"),
        Effect::Switch { key, on: false } => format!("clear {key}"),
        Effect::Variant { key, value } => format!("{key} = {value}"),
        Effect::Counter { key, delta } => format!("{key} {delta:+}"),
        Effect::When { condition, effects } => {
            let inner: Vec<String> = effects.iter().map(describe_effect).collect();
            format!(
                "when {}: {}",
                describe_condition(condition),
                inner.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::NodeId;

    #[test]
    fn conditions_read_naturally() {
        let condition = Condition::All(vec![
            Condition::switch_off("counsel"),
            Condition::at_least("presence", 1),
        ]);
        assert_eq!(
            describe_condition(&condition),
            "(not counsel and presence >= 1)"
        );
    }

    #[test]
    fn branch_targets_list_every_case() {
        let target = Target::Branch {
            cases: vec![(Condition::at_most("influence", 0), NodeId::new("serene"))],
            otherwise: NodeId::new("shadows"),
        };
        assert_eq!(
            describe_target(&target),
            "serene if influence <= 0; shadows otherwise"
        );
    }

    #[test]
    fn effects_show_signs() {
        assert_eq!(describe_effect(&Effect::Energy(-3)), "energy -3");
        assert_eq!(describe_effect(&Effect::counter("allies", 1)), "allies +1");
        assert_eq!(describe_effect(&Effect::set("lullaby")), "set lullaby");
    }
}
