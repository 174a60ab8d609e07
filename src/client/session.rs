//! Chat session: bridges one text channel to terminal input and the
//! rendered transcript.

use std::io::Write;

use tokio::sync::mpsc;

use crate::protocol::{ServerFrame, decode_server_frame, encode_client_frame};

use super::{
    channel::TextChannel,
    error::ClientError,
    render::{RenderedMessage, Transcript},
};

/// The text-input control: holds the line being composed until submission.
#[derive(Debug, Default)]
pub struct InputBuffer {
    value: String,
}

impl InputBuffer {
    pub fn set(&mut self, text: impl Into<String>) {
        self.value = text.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Take the current text out, leaving the buffer empty.
    fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

/// One chat client: a live text channel plus the transcript it renders
/// into.
pub struct ChatClient<C: TextChannel> {
    channel: C,
    sender: String,
    transcript: Transcript,
}

impl<C: TextChannel> ChatClient<C> {
    pub fn new(channel: C, sender: impl Into<String>) -> Self {
        Self {
            channel,
            sender: sender.into(),
            transcript: Transcript::default(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Wait for the next raw frame from the channel.
    pub async fn next_frame(&mut self) -> Option<Result<String, ClientError>> {
        self.channel.recv().await
    }

    /// Handle one raw inbound frame.
    ///
    /// A decodable chat message is rendered into the transcript and the new
    /// entry is returned. An undecodable frame is dropped with a warning;
    /// the session keeps running.
    pub fn receive(&mut self, raw: &str) -> Option<&RenderedMessage> {
        match decode_server_frame(raw) {
            Ok(ServerFrame::ChatMessage { text, .. }) => {
                self.transcript
                    .append(RenderedMessage::new(&text, &self.sender));
                self.transcript.last()
            }
            Err(e) => {
                tracing::warn!("dropping undecodable frame: {}", e);
                None
            }
        }
    }

    /// Submit the input buffer: transmit `{"message": <text>}` over the
    /// channel and leave the buffer empty.
    pub async fn submit(&mut self, input: &mut InputBuffer) -> Result<(), ClientError> {
        let text = input.take();
        let frame = encode_client_frame(&text)?;
        self.channel.send(frame).await
    }
}

enum SessionEvent {
    Frame(Option<Result<String, ClientError>>),
    Line(Option<String>),
}

/// Drive the session until the user stops typing or the connection drops.
///
/// `input_rx` carries submitted lines from the terminal input thread;
/// closing it ends the session cleanly. A closed channel is an error: the
/// client never reconnects.
pub async fn run_session<C: TextChannel>(
    client: &mut ChatClient<C>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let mut buffer = InputBuffer::default();

    loop {
        let event = tokio::select! {
            frame = client.next_frame() => SessionEvent::Frame(frame),
            line = input_rx.recv() => SessionEvent::Line(line),
        };

        match event {
            SessionEvent::Frame(Some(Ok(raw))) => {
                if let Some(entry) = client.receive(&raw) {
                    print!("\n{}\n", entry.display());
                }
                redisplay_prompt(client.sender());
            }
            SessionEvent::Frame(Some(Err(e))) => return Err(e),
            SessionEvent::Frame(None) => return Err(ClientError::ConnectionClosed),
            SessionEvent::Line(Some(line)) => {
                buffer.set(line);
                client.submit(&mut buffer).await?;
            }
            SessionEvent::Line(None) => {
                tracing::info!("input closed, ending session");
                return Ok(());
            }
        }
    }
}

/// Redisplay the input prompt after writing a transcript entry.
fn redisplay_prompt(sender: &str) {
    print!("{}> ", sender);
    std::io::stdout().flush().ok();
}
