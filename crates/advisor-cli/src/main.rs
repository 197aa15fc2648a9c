use advisor_core::onboarding::{AssetSymbol, InvestorType};
use advisor_core::vote::{SectionType, VoteType};
use advisor_infrastructure::ClientConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Crypto Advisor - personalized crypto dashboard client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and ADVISOR_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show who is signed in and where the app would take you
    Status,
    /// Answer the onboarding survey
    Onboard {
        /// Asset to follow (repeatable), e.g. BTC
        #[arg(long = "asset", required = true)]
        assets: Vec<AssetSymbol>,
        /// One of HODLer, DayTrader, SwingTrader, LongTermInvestor, NFTCollector, DeFiFarmer
        #[arg(long)]
        investor_type: InvestorType,
        /// Content type to receive (repeatable): news, price, ai, meme
        #[arg(long = "content", required = true)]
        content_types: Vec<SectionType>,
    },
    /// Show the personalized dashboard
    Dashboard,
    /// Vote on a dashboard item
    Vote {
        section: SectionType,
        /// Item fingerprint as printed by `advisor dashboard`
        item: String,
        /// up or down
        direction: VoteType,
    },
    /// Remove a vote from a dashboard item
    Unvote {
        section: SectionType,
        item: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(api_url: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api_base_url = url;
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.api_url)?;

    match cli.command {
        Commands::Health => commands::health::run(&config).await?,
        Commands::Register {
            email,
            name,
            password,
        } => commands::session::register(&config, &email, &name, &password).await?,
        Commands::Login { email, password } => {
            commands::session::login(&config, &email, &password).await?
        }
        Commands::Logout => commands::session::logout(&config)?,
        Commands::Status => commands::session::status(&config).await?,
        Commands::Onboard {
            assets,
            investor_type,
            content_types,
        } => commands::onboarding::submit(&config, assets, investor_type, content_types).await?,
        Commands::Dashboard => commands::dashboard::show(&config).await?,
        Commands::Vote {
            section,
            item,
            direction,
        } => commands::vote::cast(&config, section, item, direction).await?,
        Commands::Unvote { section, item } => commands::vote::cancel(&config, section, item).await?,
    }

    Ok(())
}
