//! Chat events and output sinks.
//!
//! The orchestrator communicates with the UI exclusively through
//! [`ChatEvent`] values pushed into an [`OutputSink`]. Events serialize with
//! camelCase tags so they can cross a message channel to a webview-style
//! frontend unchanged.
//!
//! Three sinks ship with the crate:
//!
//! * [`StdOutSink`] — line-oriented stdout output for CLI use.
//! * [`MemorySink`] — captures events for tests and snapshots.
//! * [`ChannelSink`] — forwards events into a tokio mpsc channel for async
//!   consumers (a UI bridge, an SSE endpoint, ...).

use std::fmt;
use std::io::{self, Result as IoResult, Stdout, Write};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Outbound event stream of the assistant core.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChatEvent {
    /// Connection/readiness status for the UI header.
    #[serde(rename_all = "camelCase")]
    Status { connected: bool, message: String },
    /// A streamed answer is about to begin.
    AnswerStarted,
    /// One incremental answer fragment, forwarded in arrival order.
    #[serde(rename_all = "camelCase")]
    AnswerChunk { text: String },
    /// The streamed answer is finished (success, exhaustion, or cancellation).
    /// Emitted exactly once per answer.
    AnswerStopped,
    /// The model was overloaded; another attempt is scheduled after a delay.
    #[serde(rename_all = "camelCase")]
    RetryScheduled { attempt: u32, backoff_ms: u64 },
    /// Informational note (context fallback, pause confirmation, ...).
    #[serde(rename_all = "camelCase")]
    Notice { message: String },
    /// Terminal, user-friendly error message.
    #[serde(rename_all = "camelCase")]
    Error { message: String },
    /// The conversation view was reset.
    ChatCleared,
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatEvent::Status { connected, message } => {
                write!(f, "[status connected={connected}] {message}")
            }
            ChatEvent::AnswerStarted => write!(f, "[answer] started"),
            ChatEvent::AnswerChunk { text } => write!(f, "{text}"),
            ChatEvent::AnswerStopped => write!(f, "[answer] stopped"),
            ChatEvent::RetryScheduled { attempt, backoff_ms } => write!(
                f,
                "[retry] attempt {attempt} rescheduled in {backoff_ms} ms"
            ),
            ChatEvent::Notice { message } => write!(f, "[notice] {message}"),
            ChatEvent::Error { message } => write!(f, "[error] {message}"),
            ChatEvent::ChatCleared => write!(f, "[chat] cleared"),
        }
    }
}

/// Abstraction over an output target that consumes chat events.
///
/// Sinks are shared (`&self`): the orchestrator emits from async bodies and
/// sinks keep whatever interior mutability they need.
pub trait OutputSink: Send + Sync {
    /// Handle a structured event. The sink decides how to serialize/format it.
    fn handle(&self, event: &ChatEvent) -> IoResult<()>;
}

/// Stdout sink: one event per line.
pub struct StdOutSink {
    handle: Mutex<Stdout>,
}

impl Default for StdOutSink {
    fn default() -> Self {
        Self {
            handle: Mutex::new(io::stdout()),
        }
    }
}

impl OutputSink for StdOutSink {
    fn handle(&self, event: &ChatEvent) -> IoResult<()> {
        let mut out = self
            .handle
            .lock()
            .map_err(|_| io::Error::other("stdout sink poisoned"))?;
        writeln!(out, "{event}")?;
        out.flush()
    }
}

/// In-memory sink for testing and snapshots.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<ChatEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all captured events.
    pub fn snapshot(&self) -> Vec<ChatEvent> {
        self.entries.lock().expect("memory sink poisoned").clone()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        self.entries.lock().expect("memory sink poisoned").clear();
    }
}

impl OutputSink for MemorySink {
    fn handle(&self, event: &ChatEvent) -> IoResult<()> {
        self.entries
            .lock()
            .expect("memory sink poisoned")
            .push(event.clone());
        Ok(())
    }
}

/// Channel-based sink for streaming to async consumers.
///
/// Events are forwarded to a tokio mpsc channel without blocking.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<ChatEvent>) -> Self {
        Self { tx }
    }
}

impl OutputSink for ChannelSink {
    fn handle(&self, event: &ChatEvent) -> IoResult<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "channel receiver dropped"))
    }
}
