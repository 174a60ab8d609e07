//! Client startup: connect, wire up the input thread, drive the session.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use super::{
    channel,
    config::ClientConfig,
    error::ClientError,
    session::{ChatClient, run_session},
};

/// Run the chat client for one session.
///
/// Connects once and runs until the user stops typing or the connection
/// drops; there is no reconnect.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let channel = channel::connect(&config).await?;

    println!(
        "\nYou are '{}' in room '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        config.sender(),
        config.room()
    );

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline is synchronous; it gets its own thread and feeds the
    // session through the channel
    let prompt_label = config.sender().to_string();
    let _readline_handle = std::thread::spawn(move || read_input_lines(&prompt_label, &input_tx));

    let mut client = ChatClient::new(channel, config.sender());
    run_session(&mut client, &mut input_rx).await
}

fn read_input_lines(prompt_label: &str, input_tx: &mpsc::UnboundedSender<String>) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            tracing::error!("failed to initialize readline: {}", e);
            return;
        }
    };

    let prompt = format!("{}> ", prompt_label);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line).ok();
                if input_tx.send(line.to_string()).is_err() {
                    // session ended, exit thread
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                tracing::info!("input ended by user");
                break;
            }
            Err(e) => {
                tracing::error!("readline error: {}", e);
                break;
            }
        }
    }
}
