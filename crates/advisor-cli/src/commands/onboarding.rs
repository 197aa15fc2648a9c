use super::{connect, require_route};
use advisor_application::onboarding::ONBOARDING_FALLBACK_ERROR;
use advisor_core::AdvisorError;
use advisor_core::onboarding::{AssetSymbol, InvestorType};
use advisor_core::routing::Route;
use advisor_core::validation::OnboardingForm;
use advisor_core::vote::SectionType;
use advisor_infrastructure::ClientConfig;
use anyhow::{Result, bail};
use colored::Colorize;

pub async fn submit(
    config: &ClientConfig,
    assets: Vec<AssetSymbol>,
    investor_type: InvestorType,
    content_types: Vec<SectionType>,
) -> Result<()> {
    let context = connect(config).await?;
    require_route(&context, Route::Onboarding)?;

    let form = OnboardingForm {
        assets,
        investor_type: Some(investor_type),
        content_types,
    };

    match context.onboarding.submit(form).await {
        Ok(outcome) => {
            println!("{}", "Preferences saved".green());
            println!("  Assets:  {}", outcome.preferences.assets.join(", "));
            println!("  Profile: {}", outcome.preferences.investor_type);
            println!("  Content: {}", outcome.preferences.content_types.join(", "));
            if outcome.identity.is_some_and(|identity| identity.onboarding_done) {
                println!("Next: {}", "advisor dashboard".bright_cyan());
            }
            Ok(())
        }
        Err(AdvisorError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{}", format!("  {field}: {message}").red());
            }
            bail!("Please correct the answers above")
        }
        Err(e) => bail!(e.user_message(ONBOARDING_FALLBACK_ERROR)),
    }
}
