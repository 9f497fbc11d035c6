use std::time::Duration;

use showroom_types::{Msg, StructuralAddress};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::trace;

/// Owns the single outstanding delayed scroll retry.
///
/// Scheduling replaces whatever was pending. Every scheduling is stamped with
/// a fresh ticket; only the ticket currently armed is accepted back, so a
/// retry message that was already in flight when its timer got cancelled is
/// recognised as stale.
#[derive(Debug, Default)]
pub struct PendingScrollTimer {
    handle: Option<JoinHandle<()>>,
    armed: Option<u64>,
    next_ticket: u64,
}

impl PendingScrollTimer {
    /// Arms a timer that sends `Msg::RetryScroll` for `address` after `delay`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&mut self, delay: Duration, sender: &UnboundedSender<Msg>, address: StructuralAddress) -> u64 {
        self.cancel();
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let sender = sender.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(Msg::RetryScroll { address, ticket }).is_err() {
                trace!(ticket, "retry receiver dropped before the timer fired");
            }
        }));
        self.armed = Some(ticket);
        ticket
    }

    /// Disarms the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.armed.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.armed.is_some()
    }

    /// Accepts a fired retry. Returns `false` for stale tickets.
    pub fn take_fired(&mut self, ticket: u64) -> bool {
        if self.armed != Some(ticket) {
            return false;
        }
        self.armed = None;
        self.handle = None;
        true
    }
}

impl Drop for PendingScrollTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
