use std::sync::{Arc, Mutex};

use super::mode::Mode;

/// Outbound seam for user messages.
///
/// Called once for every message the user sends from any surface. The
/// default implementation only logs; a backend integration attaches here.
pub trait MessageSink: Send {
    fn send(&mut self, mode: Mode, text: &str);
}

/// Logs each outbound message through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn send(&mut self, mode: Mode, text: &str) {
        tracing::info!(%mode, text, "user message sent");
    }
}

/// Keeps every outbound message in memory, in send order.
///
/// Clones share the same buffer, so a host can keep one clone and hand the
/// other to the controller.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    sent: Arc<Mutex<Vec<(Mode, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(Mode, String)> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl MessageSink for MemorySink {
    fn send(&mut self, mode: Mode, text: &str) {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((mode, text.to_string()));
    }
}
