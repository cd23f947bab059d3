use cartouche::core::{Config, FamilyConfig, Registry};
use cartouche::plugins::Orchestrator;

fn main() {
    let registry = Registry::with_default_diagrams();
    let inputs = ["graph TD", "flowchart-elk LR", "stateDiagram", "classDiagram-v2"];

    for renderer in [None, Some("dagre-d3"), Some("elk")] {
        let config = Config {
            flowchart: renderer.map(FamilyConfig::with_renderer),
            state: renderer.map(FamilyConfig::with_renderer),
            class: renderer.map(FamilyConfig::with_renderer),
            ..Config::default()
        };
        println!("=== defaultRenderer: {} ===", renderer.unwrap_or("(none)"));
        for input in inputs {
            match registry.detect(input, Some(&config)) {
                Ok(id) => println!("  {input:<18} -> {id}"),
                Err(e) => println!("  {input:<18} !! {e}"),
            }
        }
    }

    println!("\n=== Render ===");
    let mut orchestrator = Orchestrator::with_all_plugins();
    let output = orchestrator
        .process("flowchart-elk TD\n  A[Start] --> B{Ok?}\n  B -->|yes| C((Done))")
        .unwrap();
    println!("{}", output.body);
    println!("\n{}", output.styles);
}
