//! Terminal input: readline thread and prompt handling.

use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, oneshot};

/// Prompt shown on the join screen
pub const JOIN_PROMPT: &str = "Your name> ";

/// Current prompt label, shared with the readline thread
#[derive(Debug, Clone)]
pub struct Prompt {
    label: Arc<Mutex<String>>,
}

impl Prompt {
    pub fn new(label: &str) -> Self {
        Self {
            label: Arc::new(Mutex::new(label.to_string())),
        }
    }

    pub fn set(&self, label: String) {
        *self.label.lock().unwrap_or_else(PoisonError::into_inner) = label;
    }

    pub fn get(&self) -> String {
        self.label
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Redisplay the prompt after printing asynchronous output
    pub fn redisplay(&self) {
        print!("{}", self.get());
        std::io::stdout().flush().ok();
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new(JOIN_PROMPT)
    }
}

/// A line read from the terminal.
///
/// The readline thread waits until the line is marked done (or dropped)
/// before reading the prompt label again.
#[derive(Debug)]
pub struct InputLine {
    pub text: String,
    handled: oneshot::Sender<()>,
}

impl InputLine {
    pub fn new(text: impl Into<String>) -> (Self, oneshot::Receiver<()>) {
        let (handled, handled_rx) = oneshot::channel();
        let line = Self {
            text: text.into(),
            handled,
        };
        (line, handled_rx)
    }

    /// Release the readline thread to show the next prompt
    pub fn done(self) {
        self.handled.send(()).ok();
    }
}

/// Prompt label for a joined user
pub fn chat_prompt(username: &str) -> String {
    format!("{}> ", username)
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// Non-empty trimmed lines are forwarded on the returned channel. Each line
/// is handled before the next prompt is read, so a label changed by the line
/// (the join screen switching to the chat prompt) is shown right away. The
/// channel closes on Ctrl+C, Ctrl+D, or a readline error.
pub fn spawn_readline(prompt: Prompt) -> mpsc::UnboundedReceiver<InputLine> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<InputLine>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt.get()) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        let (input, handled) = InputLine::new(line);
                        if input_tx.send(input).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                        // Err means the line was dropped unhandled; carry on
                        handled.blocking_recv().ok();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
