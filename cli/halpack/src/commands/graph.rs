//! `halpack graph` — show the component graph.

use anyhow::{bail, Context, Result};

use halpack_graph::ComponentGraph;
use halpack_platform::McuFamily;

/// Print or export the component graph and upstream requirements.
pub fn run(export: Option<&str>) -> Result<()> {
    let family = McuFamily::stm32f1();
    let graph = ComponentGraph::for_family(&family).context("declaring component graph")?;

    match export.unwrap_or("text") {
        "json" => {
            let json =
                serde_json::to_string_pretty(&graph).context("serializing component graph")?;
            println!("{json}");
        }
        "text" => print_graph(&graph),
        other => bail!("unknown export format: '{other}'. Choose: text, json"),
    }

    Ok(())
}

fn print_graph(graph: &ComponentGraph) {
    println!("Requirements:");
    for requirement in &graph.requirements {
        println!("  {:<20} {}", requirement.package, requirement.requirement);
    }
    println!(
        "  {:<20} {} (test only)",
        graph.test_requirement.package, graph.test_requirement.version
    );
    println!();
    println!("Components:");
    for component in graph.components() {
        println!("  {} -> {}", component.name, component.exported_target);
        for required in &component.requires {
            println!("    requires {required}");
        }
        for flag in &component.compile_flags {
            println!("    flag     {flag}");
        }
    }
}
