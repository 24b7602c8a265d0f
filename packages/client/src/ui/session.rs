//! Chat session event loop.
//!
//! Multiplexes inbound channel events, input lines, and the typing-expiry
//! deadline onto the single `ChatClient`. The caller mounts the subscription
//! (before any join is emitted); it is released when the session returns.

use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};

use crate::{
    domain::{ChannelEvent, Subscription},
    usecase::{ChatClient, UiUpdate},
};

use super::{
    formatter::MessageFormatter,
    prompt::{InputLine, Prompt, chat_prompt},
};

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Input closed (Ctrl+C / Ctrl+D)
    UserExit,
    /// The channel dropped
    ConnectionLost(String),
}

/// Run one chat session until the user exits or the connection drops
pub async fn run_chat_session(
    client: &mut ChatClient,
    mut subscription: Subscription,
    input: &mut mpsc::UnboundedReceiver<InputLine>,
    prompt: &Prompt,
) -> SessionOutcome {
    tracing::debug!("Session running with subscription '{}'", subscription.id());

    loop {
        let typing_deadline = client.next_typing_deadline();

        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else {
                    return SessionOutcome::ConnectionLost("Channel closed".to_string());
                };

                let lost = match &event {
                    ChannelEvent::ConnectionLost(reason) => Some(reason.clone()),
                    ChannelEvent::Server(_) => None,
                };

                let updates = client.handle_event(event, Instant::now());
                render(client, &updates, prompt, true);

                if let Some(reason) = lost {
                    return SessionOutcome::ConnectionLost(reason);
                }
            }
            line = input.recv() => {
                let Some(line) = line else {
                    return SessionOutcome::UserExit;
                };

                let updates = handle_input(client, &line.text).await;
                // readline prints the next prompt itself once the line is done
                render(client, &updates, prompt, false);
                line.done();
            }
            () = sleep_until_deadline(typing_deadline) => {
                let updates = client.expire_typing(Instant::now());
                render(client, &updates, prompt, true);
            }
        }
    }
}

/// Apply one input line: a name on the join screen, a message in the room
async fn handle_input(client: &mut ChatClient, line: &str) -> Vec<UiUpdate> {
    if !client.session().is_joined() {
        return client.join(line).await;
    }

    let mut updates = client.update_draft(line, Instant::now()).await;
    updates.extend(client.send_message().await);
    updates
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn render(client: &ChatClient, updates: &[UiUpdate], prompt: &Prompt, redisplay: bool) {
    if updates.is_empty() {
        return;
    }

    for update in updates {
        if let UiUpdate::Joined(username) = update {
            prompt.set(chat_prompt(username.as_str()));
        }
        if let Some(output) = MessageFormatter::render(client, update) {
            print!("{}", output);
        }
    }
    if redisplay {
        prompt.redisplay();
    }
}
