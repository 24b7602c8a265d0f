//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use chatwave_shared::time::SystemClock;

use crate::{
    config::ClientConfig,
    error::ClientError,
    infrastructure::channel::WebSocketChannel,
    usecase::{ChatClient, UiUpdate},
};

use super::{
    formatter::MessageFormatter,
    prompt::{Prompt, chat_prompt, spawn_readline},
    session::{SessionOutcome, run_chat_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if another connection attempt should be made.
///
/// # Arguments
///
/// * `current_attempt` - Attempts made so far (0-indexed)
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Run the chat client: connect, show the join screen, and keep the session
/// alive across connection losses
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let prompt = Prompt::default();
    let channel = connect_with_retry(&config.url).await?;

    let mut client = ChatClient::new(Arc::new(channel), Arc::new(SystemClock), &config);
    client.mark_connected();
    print!("{}", MessageFormatter::format_join_screen(client.roster().len()));

    // Mount before joining so the roster sent in reply to the join is received
    let mut subscription = client.mount();

    if let Some(username) = &config.username {
        let updates = client.join(username).await;
        render_updates(&client, &updates, &prompt);
    }

    let mut input = spawn_readline(prompt.clone());

    loop {
        match run_chat_session(&mut client, subscription, &mut input, &prompt).await {
            SessionOutcome::UserExit => {
                tracing::info!("Client session ended normally");
                break;
            }
            SessionOutcome::ConnectionLost(reason) => {
                tracing::warn!("Connection lost: {}", reason);
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;

                let channel = connect_with_retry(&config.url).await?;
                let (rebound, updates) = client.rebind(Arc::new(channel)).await;
                subscription = rebound;
                render_updates(&client, &updates, &prompt);
                prompt.redisplay();
            }
        }
    }

    Ok(())
}

fn render_updates(client: &ChatClient, updates: &[UiUpdate], prompt: &Prompt) {
    for update in updates {
        if let UiUpdate::Joined(joined) = update {
            prompt.set(chat_prompt(joined.as_str()));
        }
        if let Some(output) = MessageFormatter::render(client, update) {
            print!("{}", output);
        }
    }
}

/// Connect to the backend, retrying up to `MAX_RECONNECT_ATTEMPTS` times
async fn connect_with_retry(url: &str) -> Result<WebSocketChannel, ClientError> {
    let mut attempt = 0;

    while should_attempt_reconnect(attempt, MAX_RECONNECT_ATTEMPTS) {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            attempt + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match WebSocketChannel::connect(url).await {
            Ok(channel) => return Ok(channel),
            Err(e) => {
                tracing::warn!("{}", e);
                attempt += 1;

                if should_attempt_reconnect(attempt, MAX_RECONNECT_ATTEMPTS) {
                    tracing::info!(
                        "Reconnecting in {} seconds... (attempt {}/{})",
                        RECONNECT_INTERVAL_SECS,
                        attempt + 1,
                        MAX_RECONNECT_ATTEMPTS
                    );
                    tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
                }
            }
        }
    }

    Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS))
}
