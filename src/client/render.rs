//! Rendering of incoming messages into the transcript.

/// Escape markup-significant characters and drop control characters.
///
/// Message text arrives from arbitrary peers; it is escaped before it is
/// inserted into the transcript, never rendered raw.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// One rendered transcript entry: escaped message text plus the sender
/// label the client was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    text: String,
    sender: String,
}

impl RenderedMessage {
    pub fn new(text: &str, sender: &str) -> Self {
        Self {
            text: escape_markup(text),
            sender: sender.to_string(),
        }
    }

    /// Plain entry content: the escaped message text followed by the
    /// sender label.
    pub fn content(&self) -> String {
        format!("{}{}", self.text, self.sender)
    }

    /// Terminal presentation, sender label in bold.
    pub fn display(&self) -> String {
        format!("{} \x1b[1m{}\x1b[0m", self.text, self.sender)
    }
}

/// Append-only list of rendered entries; the container the session renders
/// into.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<RenderedMessage>,
}

impl Transcript {
    pub fn append(&mut self, entry: RenderedMessage) {
        self.entries.push(entry);
    }

    pub fn last(&self) -> Option<&RenderedMessage> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RenderedMessage] {
        &self.entries
    }
}
