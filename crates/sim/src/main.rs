use anyhow::Context;

use stockflow_sim::{SimConfig, Simulation, script};

fn main() -> anyhow::Result<()> {
    stockflow_observability::init();

    let config = SimConfig::load()?;
    let raw = std::fs::read_to_string(&config.script)
        .with_context(|| format!("failed to read script {}", config.script.display()))?;
    let steps = script::parse(&raw)?;

    tracing::info!(script = %config.script.display(), steps = steps.len(), "running script");

    let mut sim = Simulation::new();
    for step in &steps {
        println!("{}", sim.apply(step));
    }

    if config.report {
        let report =
            serde_json::to_string_pretty(&sim.report()).context("failed to render report")?;
        println!("{report}");
    }

    Ok(())
}
