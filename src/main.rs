use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reading_list::{commands, config::Config, server, store::Store};

#[derive(Debug, Parser)]
#[command(version, about = "A personal reading list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the web server (the default).
    Serve,
    /// Initialize the database.
    Initdb {
        /// Drop existing tables first.
        #[arg(long)]
        drop: bool,
    },
    /// Generate fake data.
    Forge,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run(config).await,
        Command::Initdb { drop } => {
            let store = Store::connect(&config.database_url).await?;
            commands::initdb(&store, drop).await
        }
        Command::Forge => {
            let store = Store::connect(&config.database_url).await?;
            commands::forge(&store).await
        }
    }
}
