//! User Service - command line access to the user store.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppError;
use user_service_lib::config::UserServiceConfig;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User store lookups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a user by ID and print it as JSON
    Lookup {
        /// User ID
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = UserServiceConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.service.log_level)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let span = tracing::info_span!("service", name = %config.service.service_name);

    async move {
        match cli.command {
            Commands::Lookup { id } => match user_service_lib::lookup_user(&config, id).await {
                Ok(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                Err(AppError::NotFound) => {
                    eprintln!("{}", AppError::NotFound);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            },
            Commands::Ping => {
                user_service_lib::ping(&config).await?;
            }
        }

        Ok::<_, Box<dyn std::error::Error>>(ExitCode::SUCCESS)
    }
    .instrument(span)
    .await
}
