//! Structured status events.
//!
//! The engine never prints. Every human-readable step message is emitted
//! through a [`StatusSink`] so the hosting shell decides how to route it
//! (log pane, status bar, nothing). Messages are mirrored to the `log`
//! crate for developers.

use std::sync::mpsc::{Receiver, Sender, channel};

use serde::{Deserialize, Serialize};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLevel {
    /// Shown prominently to the user.
    User,
    /// Routine log output.
    Log,
    /// Developer diagnostics.
    Dev,
    /// Developer diagnostics that should also reach the user.
    DevUser,
}

/// A single status event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Cheap, cloneable handle for emitting status events.
///
/// A disabled sink drops everything (apart from the `log` mirror); a
/// channel-backed sink forwards messages to the receiver handed out by
/// [`StatusSink::channel`]. Emitting never blocks and never fails; a
/// disconnected receiver is silently ignored.
#[derive(Debug, Clone, Default)]
pub struct StatusSink {
    tx: Option<Sender<StatusMessage>>,
}

impl StatusSink {
    /// A sink that discards all messages.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A sink backed by an mpsc channel, plus its receiving end.
    pub fn channel() -> (Self, Receiver<StatusMessage>) {
        let (tx, rx) = channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Emit a message at the given level.
    pub fn emit(&self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        log::debug!("status [{level:?}]: {text}");

        if let Some(tx) = &self.tx {
            // Receiver may be gone; status is best-effort.
            let _ = tx.send(StatusMessage { text, level });
        }
    }

    /// Shorthand for [`StatusLevel::Log`] messages.
    pub fn log(&self, text: impl Into<String>) {
        self.emit(StatusLevel::Log, text);
    }
}
