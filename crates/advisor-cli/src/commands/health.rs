use advisor_infrastructure::ClientConfig;
use advisor_interaction::HttpAdvisorApi;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn run(config: &ClientConfig) -> Result<()> {
    let api = HttpAdvisorApi::from_config(config);
    let health = api
        .health()
        .await
        .with_context(|| format!("Backend at {} is unreachable", api.base_url()))?;

    println!("{} {} ({})", "✓".green(), api.base_url(), health.status);
    Ok(())
}
