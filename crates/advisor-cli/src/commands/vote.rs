use super::{connect, require_route};
use advisor_application::VoteOutcome;
use advisor_core::routing::Route;
use advisor_core::vote::{SectionType, VoteKey, VoteType};
use advisor_infrastructure::ClientConfig;
use anyhow::{Result, bail};
use colored::Colorize;

pub async fn cast(
    config: &ClientConfig,
    section: SectionType,
    item: String,
    direction: VoteType,
) -> Result<()> {
    let context = connect(config).await?;
    require_route(&context, Route::Dashboard)?;

    let key = VoteKey::new(section, item);
    let outcome = context.votes.cast_vote(&key, direction).await;
    report(&key, outcome, &format!("Voted {direction} on {key}"))
}

pub async fn cancel(config: &ClientConfig, section: SectionType, item: String) -> Result<()> {
    let context = connect(config).await?;
    require_route(&context, Route::Dashboard)?;

    let key = VoteKey::new(section, item);
    let outcome = context.votes.cancel_vote(&key).await;
    report(&key, outcome, &format!("Removed vote on {key}"))
}

fn report(key: &VoteKey, outcome: VoteOutcome, success: &str) -> Result<()> {
    match outcome.error() {
        None => {
            println!("{}", success.green());
            Ok(())
        }
        Some(e) => bail!("Vote on {key} was not saved: {}", e.user_message("Vote failed")),
    }
}
