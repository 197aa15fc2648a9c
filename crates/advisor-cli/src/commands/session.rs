use super::connect;
use advisor_application::AppContext;
use advisor_core::auth::{Identity, LoginRequest, SignupRequest};
use advisor_core::routing::{Route, resolve};
use advisor_core::validation::{validate_login, validate_signup};
use advisor_core::{FieldErrors, SessionPhase};
use advisor_infrastructure::ClientConfig;
use anyhow::{Result, bail};
use colored::Colorize;

fn report_field_errors(errors: &FieldErrors) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for (field, message) in errors.iter() {
        eprintln!("{}", format!("  {field}: {message}").red());
    }
    bail!("Please correct the fields above")
}

fn print_next_step(identity: &Identity) {
    let next = if identity.onboarding_done {
        "advisor dashboard"
    } else {
        "advisor onboard --asset BTC --investor-type HODLer --content news"
    };
    println!("Next: {}", next.bright_cyan());
}

pub async fn register(config: &ClientConfig, email: &str, name: &str, password: &str) -> Result<()> {
    report_field_errors(&validate_signup(email, name, password))?;

    let context = AppContext::from_config(config)?;
    let request = SignupRequest::new(email.trim(), name.trim(), password);
    let identity = match context.session.register(&request).await {
        Ok(identity) => identity,
        Err(e) => bail!(e.user_message("Registration failed")),
    };

    println!(
        "{}",
        format!("Welcome, {}!", identity.display_name()).green()
    );
    print_next_step(&identity);
    Ok(())
}

pub async fn login(config: &ClientConfig, email: &str, password: &str) -> Result<()> {
    report_field_errors(&validate_login(email, password))?;

    let context = AppContext::from_config(config)?;
    let request = LoginRequest::new(email.trim(), password);
    let identity = match context.session.login(&request).await {
        Ok(identity) => identity,
        Err(e) => bail!(e.user_message("Login failed")),
    };

    println!(
        "{}",
        format!("Signed in as {}", identity.display_name()).green()
    );
    print_next_step(&identity);
    Ok(())
}

pub fn logout(config: &ClientConfig) -> Result<()> {
    let context = AppContext::from_config(config)?;
    context.session.logout();
    println!("{}", "Signed out".green());
    Ok(())
}

pub async fn status(config: &ClientConfig) -> Result<()> {
    let context = connect(config).await?;
    let snapshot = context.session.snapshot();

    match (snapshot.phase(), &snapshot.identity) {
        (SessionPhase::Authenticated, Some(identity)) => {
            println!("Signed in as {} <{}>", identity.display_name().bold(), identity.email);
            let onboarding = if identity.onboarding_done {
                "complete".green()
            } else {
                "pending".yellow()
            };
            println!("Onboarding: {onboarding}");
        }
        _ => println!("{}", "Not signed in".yellow()),
    }

    let (landing, _) = resolve(Route::Dashboard, &snapshot);
    println!("Start screen: {}", landing.path().bright_black());
    Ok(())
}
