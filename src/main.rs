use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commtrack::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commtrack=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(config, host, port).await,
        Commands::Migrate => cli::commands::migrate(config).await,
        Commands::Notifications { format } => {
            cli::commands::notifications(config, format).await
        }
        Commands::Dashboard { format } => cli::commands::dashboard(config, format).await,
    };

    if let Err(e) = &result {
        cli::error(&e.to_string());
    }
    result
}
