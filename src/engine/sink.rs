//! Message sinks
//!
//! The engine hands every message to a [`RecordSink`]. The runner writes
//! line-delimited JSON to stdout; tests collect messages in memory.

use super::types::Message;
use crate::error::Result;
use crate::record::Record;
use std::io::Write;

/// Destination for sync messages
pub trait RecordSink {
    /// Write one message
    fn write_message(&mut self, message: &Message) -> Result<()>;
}

/// Writes one JSON message per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects messages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<Message>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in write order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Records with the stream they were written under
    pub fn records(&self) -> Vec<(&str, &Record)> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                Message::Record { stream, record, .. } => Some((stream.as_str(), record)),
                Message::Schema { .. } => None,
            })
            .collect()
    }
}

impl RecordSink for MemorySink {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
