//! farmrpc CLI - Inspect and exercise the bot protocol
//!
//! Commands:
//! - `farmrpc methods` - List the protocol methods and their parameters
//! - `farmrpc encode` - Build a canonical request or notification
//! - `farmrpc decode` - Validate and summarize a message
//! - `farmrpc mock` - Serve a simulated bot over stdin/stdout

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod decode;
mod encode;
mod methods;
mod mock;

#[derive(Parser)]
#[command(name = "farmrpc")]
#[command(author, version, about = "Farm bot JSON-RPC toolkit", long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every protocol method
    Methods,

    /// Encode a request (or notification) for a method
    Encode {
        /// Method name, e.g. move_absolute
        method: String,

        /// Parameter object (or positional array) as JSON
        #[arg(short, long)]
        params: Option<String>,

        /// Request id (default: random UUID)
        #[arg(short, long)]
        id: Option<String>,

        /// Encode as a notification (no id)
        #[arg(short, long, conflicts_with = "id")]
        notify: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Decode a message and print its typed form
    Decode {
        /// Raw message, or `-` to read stdin
        input: String,
    },

    /// Run a simulated bot reading newline-delimited messages from stdin
    Mock,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    farmrpc::init_logging(config.level())?;

    match cli.command {
        Commands::Methods => {
            print!("{}", methods::render());
        }
        Commands::Encode {
            method,
            params,
            id,
            notify,
            pretty,
        } => {
            let message = encode::build(&config, &method, params.as_deref(), id, notify)?;
            println!("{}", encode::render(&message, pretty || config.pretty_output)?);
        }
        Commands::Decode { input } => {
            let raw = decode::read_input(&input)?;
            let summary = decode::summarize(&raw)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Mock => {
            mock::run(&config).await?;
        }
    }

    Ok(())
}
