use super::{connect, require_route};
use advisor_application::DashboardState;
use advisor_application::dashboard::DASHBOARD_FALLBACK_ERROR;
use advisor_core::dashboard::DashboardView;
use advisor_core::routing::Route;
use advisor_infrastructure::ClientConfig;
use anyhow::{Result, bail};
use colored::Colorize;
use tokio_util::sync::CancellationToken;

pub async fn show(config: &ClientConfig) -> Result<()> {
    let context = connect(config).await?;
    require_route(&context, Route::Dashboard)?;

    if let Some(identity) = context.session.identity() {
        println!("{}", format!("Welcome back, {}", identity.display_name()).bold());
    }
    println!("{}", "Loading your dashboard...".bright_black());

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match context.dashboard.load(cancel).await {
        Ok(view) => {
            print_view(&view);
            Ok(())
        }
        Err(e) if e.is_cancelled() => {
            println!("{}", "Cancelled".yellow());
            Ok(())
        }
        Err(_) => match context.dashboard.state() {
            DashboardState::Failed(message) => bail!(message),
            _ => bail!(DASHBOARD_FALLBACK_ERROR),
        },
    }
}

fn print_view(view: &DashboardView) {
    if view.is_empty() {
        println!("No content available.");
        return;
    }

    for section in &view.sections {
        println!();
        println!("{}", section.heading().bright_yellow().bold());
        for item in &section.items {
            match &item.detail {
                Some(detail) => println!("  {}  {}", item.label, detail.bright_black()),
                None => println!("  {}", item.label),
            }
            if let Some(link) = &item.link {
                println!("    {}", link.bright_blue());
            }
            println!(
                "    {} {} {}",
                "vote:".bright_black(),
                section.kind,
                shell_quote(&item.key.item_id).bright_black()
            );
        }
    }
}

/// Quotes an item id so it can be pasted into `advisor vote`.
fn shell_quote(value: &str) -> String {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:".contains(c))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
