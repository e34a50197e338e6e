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

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CheckStrategy, CommandStrategy, InitStrategy, ServeInput,
    ServeStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

mod command;

#[derive(Parser)]
#[command(name = "relaybot")]
#[command(about = "WhatsApp relay bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat with the bot locally, without the messaging provider
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Sender identity used for history
        #[arg(short, long, default_value = "cli:local")]
        sender: String,
    },
    /// Verify Twilio credentials and list WhatsApp numbers
    Check,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => ServeStrategy.execute(ServeInput { port }).await,
        Commands::Chat { message, sender } => {
            ChatStrategy
                .execute(ChatInput { message, sender })
                .await
        }
        Commands::Check => CheckStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
