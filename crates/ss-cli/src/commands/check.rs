use ss_core::validate::validate;

pub fn run() -> Result<(), String> {
    let graph = super::load_story()?;

    let warnings = validate(&graph);
    for warning in &warnings {
        println!("  {warning}");
    }

    let endings = graph.nodes().iter().filter(|n| n.is_terminal()).count();
    let choices: usize = graph.nodes().iter().map(|n| n.choices.len()).sum();

    println!("  All checks passed for '{}'.", graph.title());
    println!(
        "  {} nodes, {choices} choices, {endings} endings, {} flags",
        graph.len(),
        graph.schema().len()
    );
    println!("  Longest path: {} moves", graph.longest_path());

    Ok(())
}
