mod search;
mod setup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "yelp-cli")]
#[command(about = "Query the Yelp Fusion API from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses
    Search(SearchArgs),
    /// Show full details for one business
    Business {
        /// Business id or alias (e.g., gary-danko-san-francisco)
        id: String,
    },
    /// Show up to three review excerpts for a business
    Reviews {
        /// Business id or alias
        id: String,
    },
    /// Perform a token exchange and report its expiry
    Token,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = yelp_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Search(args) => {
            let client = setup::build_client(&config)?;
            let businesses = client.search_businesses(&args.into_request()).await?;
            print_json(&businesses)?;
        }
        Commands::Business { id } => {
            let client = setup::build_client(&config)?;
            let details = client.get_business_details(&id).await?;
            print_json(&details)?;
        }
        Commands::Reviews { id } => {
            let client = setup::build_client(&config)?;
            let reviews = client.get_reviews(&id).await?;
            print_json(&reviews)?;
        }
        Commands::Token => {
            let provider =
                setup::build_oauth_provider(&config, setup::build_transport(&config)?)?;
            let token = provider.fetch_token().await?;
            println!("token:      {}", setup::mask_token(&token.access_token));
            match token.expires_at() {
                Some(at) => println!("expires at: {}", at.to_rfc3339()),
                None => println!("expires at: unknown"),
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
