pub mod dashboard;
pub mod health;
pub mod onboarding;
pub mod session;
pub mod vote;

use advisor_application::AppContext;
use advisor_core::routing::{GuardDecision, Route, guard_route};
use advisor_infrastructure::ClientConfig;
use anyhow::{Result, bail};

/// Builds the client context and resolves any stored token.
pub async fn connect(config: &ClientConfig) -> Result<AppContext> {
    let context = AppContext::from_config(config)?;
    context.session.bootstrap().await;
    Ok(context)
}

/// Fails with a pointer to the right command when `route` would redirect.
pub fn require_route(context: &AppContext, route: Route) -> Result<()> {
    match guard_route(route, &context.session.snapshot()) {
        GuardDecision::ShowChildren => Ok(()),
        GuardDecision::RedirectTo(Route::Login) | GuardDecision::RedirectTo(Route::Register) => {
            bail!("Not signed in. Run `advisor login` first.")
        }
        GuardDecision::RedirectTo(Route::Onboarding) => {
            bail!("Onboarding is not complete. Run `advisor onboard` first.")
        }
        GuardDecision::RedirectTo(Route::Dashboard) => {
            bail!("Onboarding is already complete. Run `advisor dashboard`.")
        }
        GuardDecision::ShowLoading => bail!("Session is still initializing"),
    }
}
