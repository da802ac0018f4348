//! Controllers attached to objects
//!
//! The core never knows about sockets or scripts. A controller is one of a
//! few concrete kinds, reachable only through a narrow capability: take some
//! text, report who owns it, and which body it drives.

use serde::{Deserialize, Serialize};

use crate::core::types::ObjectId;

/// A remote player session; outgoing text queues here until the event loop
/// drains it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSession {
    pub account: String,
    outbox: Vec<String>,
}

impl RemoteSession {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            outbox: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[String] {
        &self.outbox
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mind {
    Remote(RemoteSession),
    /// Scripted non-player character; `profile` names its behaviour script
    Npc { profile: String },
    /// Trigger hook evaluated by the external script engine
    Trigger { script: u32 },
}

impl Mind {
    pub fn remote(account: impl Into<String>) -> Self {
        Mind::Remote(RemoteSession::new(account))
    }

    /// Deliver text. NPCs and triggers have nowhere to show it.
    pub fn send(&mut self, text: &str) {
        match self {
            Mind::Remote(session) => session.outbox.push(text.to_string()),
            Mind::Npc { profile } => {
                tracing::trace!(profile = %profile, "npc ignores text: {}", text);
            }
            Mind::Trigger { script } => {
                tracing::trace!(script, "trigger ignores text: {}", text);
            }
        }
    }

    /// Owning account, for remote sessions
    pub fn owner(&self) -> Option<&str> {
        match self {
            Mind::Remote(session) => Some(&session.account),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Mind::Remote(_))
    }

    /// Take everything queued since the last drain
    pub fn drain(&mut self) -> Vec<String> {
        match self {
            Mind::Remote(session) => std::mem::take(&mut session.outbox),
            _ => Vec::new(),
        }
    }
}

/// A mind and the body it currently drives
#[derive(Debug, Clone)]
pub(crate) struct MindSlot {
    pub mind: Mind,
    pub body: Option<ObjectId>,
}
