#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatStrategy, CommandStrategy, ContactsAction, ContactsStrategy, InfoStrategy, InitStrategy,
    RouteInput, RouteStrategy, ServicesInput, ServicesStrategy, VersionStrategy,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Free-text router for a local services directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route one query and print the JSON response
    Route {
        /// Query text
        #[arg(short = 'q', long = "query")]
        query: Option<String>,

        /// Query text, as positional words
        #[arg(conflicts_with = "query")]
        words: Vec<String>,
    },
    /// Route queries interactively
    Chat,
    /// List the service catalog
    Services {
        /// Show only the service at this page URL
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Manage captured contacts
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Initialize configuration
    Init,
    /// Show configuration information
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Route { query, words } => {
            let query = query.unwrap_or_else(|| words.join(" "));
            RouteStrategy.execute(RouteInput { query }).await?;
        }
        Commands::Chat => ChatStrategy.execute(()).await?,
        Commands::Services { url } => ServicesStrategy.execute(ServicesInput { url }).await?,
        Commands::Contacts { action } => ContactsStrategy.execute(action).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
