//! Diagnostic sinks handed to the schema initializer.
//!
//! The initializer never prints on its own: it reports every step through a
//! `DiagnosticSink` supplied by the caller.

use crate::ui::messages;

/// Anything that accepts formatted informational messages.
pub trait DiagnosticSink {
    fn info(&mut self, message: &str);
}

/// Prints each message as an informational console line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn info(&mut self, message: &str) {
        messages::info(message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn info(&mut self, _message: &str) {}
}

/// Keeps messages in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    messages: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl DiagnosticSink for RecordingSink {
    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
