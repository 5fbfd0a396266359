//! Diagnostic binary for checking the agent API from the command line
//! This is a utility binary, not part of the main application
//!
//! Usage: `fetch_agents [AGENT_UUID]`

use agent_browser_core::{AgentBrowserViewModel, AgentRepository, Config, HttpAgentRepository};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    println!("Agent API: {}\n", config.api.base_url);

    if let Some(id) = env::args().nth(1) {
        let repository = HttpAgentRepository::from_config(&config)?;
        let agent = repository.fetch_by_id(&id).await?;
        println!("{} ({})", agent.display_name, agent.role_name());
        println!("{}\n", agent.description);
        for ability in &agent.abilities {
            println!("  [{}] {}: {}", ability.slot, ability.display_name, ability.description);
        }
        return Ok(());
    }

    let mut view_model = AgentBrowserViewModel::from_config(&config)?;
    view_model.initialize().await;
    let state = view_model.state();

    if let agent_browser_core::LoadStatus::Failed(message) = state.status() {
        anyhow::bail!("Failed to load agents: {}", message);
    }

    println!("✓ {} agents loaded", state.len());
    for agent in state.agents() {
        println!(
            "  {:<12} {:<12} {} abilities  {}",
            agent.display_name,
            agent.role_name(),
            agent.abilities.len(),
            agent.id
        );
    }

    match state.coordinates() {
        Some(coordinates) => println!("\nLocation: {}", coordinates),
        None => println!(
            "\nLocation: {}",
            state.notice().unwrap_or("unavailable")
        ),
    }

    Ok(())
}
