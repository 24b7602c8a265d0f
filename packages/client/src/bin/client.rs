//! ChatWave terminal chat client.
//!
//! Connects to a ChatWave backend, shows the join screen, and relays chat
//! messages and typing notices. Automatically reconnects on disconnection
//! (max 5 attempts with 5 second interval) and rejoins with the same name.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatwave-client
//! cargo run --bin chatwave-client -- --url ws://127.0.0.1:3000/ws --username Alice
//! ```

use std::time::Duration;

use clap::Parser;

use chatwave_client::{ClientConfig, config::DEFAULT_URL, ui::run_client};
use chatwave_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chatwave-client")]
#[command(about = "Real-time chat room client with presence and typing indicators", long_about = None)]
struct Args {
    /// WebSocket backend URL
    #[arg(short = 'u', long, default_value = DEFAULT_URL)]
    url: String,

    /// Join immediately with this name instead of prompting for it
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// How long a remote typing indicator stays visible (milliseconds)
    #[arg(long, default_value_t = 3000)]
    typing_ttl_ms: u64,

    /// Minimum interval between outbound typing notices (milliseconds)
    #[arg(long, default_value_t = 3000)]
    typing_cooldown_ms: u64,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            username: args.username,
            typing_ttl: Duration::from_millis(args.typing_ttl_ms),
            typing_cooldown: Duration::from_millis(args.typing_cooldown_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
