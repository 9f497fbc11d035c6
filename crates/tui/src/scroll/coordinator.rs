//! Scroll requests with a bounded, deferred recovery path.
//!
//! A scroll to a frame the list has not measured yet fails. The coordinator
//! then asks the list to scroll to its end (which forces measurement) and
//! arms one delayed retry. The retry re-addresses the target by its flat
//! frame index as `(0, index)`. If the retry fails too, it is abandoned:
//! recovery never chains.

use std::time::Duration;

use showroom_types::{Msg, ScrollFailure, StructuralAddress};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::{list::SectionListHandle, timer::PendingScrollTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The list accepted the request.
    Scrolled,
    /// The target was unmeasured; a retry is pending.
    RetryScheduled,
    /// The single retry failed as well.
    Abandoned,
}

#[derive(Debug)]
pub struct ScrollCoordinator {
    timer: PendingScrollTimer,
    retry_delay: Duration,
    animated: bool,
    sender: UnboundedSender<Msg>,
}

impl ScrollCoordinator {
    pub fn new(sender: UnboundedSender<Msg>, retry_delay: Duration, animated: bool) -> Self {
        Self {
            timer: PendingScrollTimer::default(),
            retry_delay,
            animated,
            sender,
        }
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn has_pending_retry(&self) -> bool {
        self.timer.is_pending()
    }

    /// Requests a scroll; an unmeasured target enters the recovery path.
    /// A successful scroll supersedes any retry still pending.
    pub fn scroll_to<L: SectionListHandle + ?Sized>(&mut self, list: &mut L, address: StructuralAddress) -> ScrollOutcome {
        match list.scroll_to_location(address, self.animated) {
            Ok(()) => {
                if self.timer.cancel() {
                    debug!(%address, "scroll superseded the pending retry");
                }
                debug!(%address, "scrolled");
                ScrollOutcome::Scrolled
            }
            Err(failure) => {
                self.on_scroll_failure(list, failure);
                ScrollOutcome::RetryScheduled
            }
        }
    }

    /// Scrolls to the end and arms the retry, replacing any pending one.
    pub fn on_scroll_failure<L: SectionListHandle + ?Sized>(&mut self, list: &mut L, failure: ScrollFailure) {
        debug!(
            index = failure.index,
            highest_measured = ?failure.highest_measured_frame_index,
            average_item_length = failure.average_item_length,
            "scroll target not measured yet; deferring"
        );
        list.scroll_to_end();
        let retry = StructuralAddress::new(0, failure.index);
        self.timer.schedule(self.retry_delay, &self.sender, retry);
    }

    /// Runs a fired retry. Returns `None` when `ticket` is stale.
    pub fn handle_retry<L: SectionListHandle + ?Sized>(
        &mut self,
        list: &mut L,
        address: StructuralAddress,
        ticket: u64,
    ) -> Option<ScrollOutcome> {
        if !self.timer.take_fired(ticket) {
            debug!(ticket, "ignoring stale scroll retry");
            return None;
        }
        match list.scroll_to_location(address, self.animated) {
            Ok(()) => Some(ScrollOutcome::Scrolled),
            Err(failure) => {
                warn!(%address, highest_measured = ?failure.highest_measured_frame_index, "scroll retry failed; giving up");
                Some(ScrollOutcome::Abandoned)
            }
        }
    }

    /// Cancels the pending retry, if any.
    pub fn cancel_pending(&mut self) -> bool {
        self.timer.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        ScrollTo(StructuralAddress, bool),
        ScrollToEnd,
    }

    /// Fails the first `failures` scroll requests, then accepts everything.
    #[derive(Default)]
    struct RecordingList {
        calls: Vec<Call>,
        failures: usize,
    }

    impl SectionListHandle for RecordingList {
        fn scroll_to_location(&mut self, address: StructuralAddress, animated: bool) -> Result<(), ScrollFailure> {
            self.calls.push(Call::ScrollTo(address, animated));
            if self.failures > 0 {
                self.failures -= 1;
                return Err(failure(address.item_index));
            }
            Ok(())
        }

        fn scroll_to_end(&mut self) {
            self.calls.push(Call::ScrollToEnd);
        }
    }

    fn failure(index: usize) -> ScrollFailure {
        ScrollFailure {
            index,
            highest_measured_frame_index: Some(10),
            average_item_length: 3.0,
        }
    }

    fn coordinator() -> (ScrollCoordinator, mpsc::UnboundedReceiver<Msg>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ScrollCoordinator::new(sender, Duration::from_millis(50), true), receiver)
    }

    async fn next_retry(receiver: &mut mpsc::UnboundedReceiver<Msg>) -> (StructuralAddress, u64) {
        match receiver.recv().await {
            Some(Msg::RetryScroll { address, ticket }) => (address, ticket),
            other => panic!("expected a retry, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn measured_targets_scroll_immediately() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList::default();
        let outcome = coordinator.scroll_to(&mut list, StructuralAddress::new(2, 1));
        assert_eq!(outcome, ScrollOutcome::Scrolled);
        assert_eq!(list.calls, vec![Call::ScrollTo(StructuralAddress::new(2, 1), true)]);
        assert!(!coordinator.has_pending_retry());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_scrolls_to_end_then_retries_by_flat_index() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList { failures: 1, ..Default::default() };

        let outcome = coordinator.scroll_to(&mut list, StructuralAddress::new(0, 40));
        assert_eq!(outcome, ScrollOutcome::RetryScheduled);
        assert_eq!(list.calls.last(), Some(&Call::ScrollToEnd));
        assert!(coordinator.has_pending_retry());

        let (address, ticket) = next_retry(&mut receiver).await;
        assert_eq!(address, StructuralAddress::new(0, 40));
        assert_eq!(coordinator.handle_retry(&mut list, address, ticket), Some(ScrollOutcome::Scrolled));
        assert_eq!(
            list.calls,
            vec![
                Call::ScrollTo(StructuralAddress::new(0, 40), true),
                Call::ScrollToEnd,
                Call::ScrollTo(StructuralAddress::new(0, 40), true),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn two_failures_inside_the_window_yield_one_retry() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList::default();

        coordinator.on_scroll_failure(&mut list, failure(40));
        tokio::time::sleep(Duration::from_millis(20)).await;
        coordinator.on_scroll_failure(&mut list, failure(40));
        assert_eq!(list.calls, vec![Call::ScrollToEnd, Call::ScrollToEnd]);

        let (address, ticket) = next_retry(&mut receiver).await;
        assert_eq!(address, StructuralAddress::new(0, 40));
        coordinator.handle_retry(&mut list, address, ticket);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());
        let retries = list.calls.iter().filter(|call| matches!(call, Call::ScrollTo(..))).count();
        assert_eq!(retries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_retry_is_abandoned_without_rescheduling() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList { failures: 2, ..Default::default() };

        coordinator.scroll_to(&mut list, StructuralAddress::new(3, 2));
        let (address, ticket) = next_retry(&mut receiver).await;
        assert_eq!(coordinator.handle_retry(&mut list, address, ticket), Some(ScrollOutcome::Abandoned));
        assert!(!coordinator.has_pending_retry());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(receiver.try_recv().is_err());
        assert_eq!(list.calls.iter().filter(|call| **call == Call::ScrollToEnd).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn later_successful_scroll_cancels_the_pending_retry() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList { failures: 1, ..Default::default() };

        assert_eq!(coordinator.scroll_to(&mut list, StructuralAddress::new(0, 40)), ScrollOutcome::RetryScheduled);
        assert!(coordinator.has_pending_retry());
        assert_eq!(coordinator.scroll_to(&mut list, StructuralAddress::new(1, 1)), ScrollOutcome::Scrolled);
        assert!(!coordinator.has_pending_retry());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());
        // A retry already queued before the scroll is stale as well.
        assert_eq!(coordinator.handle_retry(&mut list, StructuralAddress::new(0, 40), 1), None);
        assert_eq!(list.calls.last(), Some(&Call::ScrollTo(StructuralAddress::new(1, 1), true)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_retries_are_never_delivered_or_accepted() {
        let (mut coordinator, mut receiver) = coordinator();
        let mut list = RecordingList { failures: 1, ..Default::default() };

        coordinator.scroll_to(&mut list, StructuralAddress::new(1, 1));
        assert!(coordinator.cancel_pending());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());

        assert_eq!(coordinator.handle_retry(&mut list, StructuralAddress::new(0, 1), 1), None);
        assert_eq!(list.calls.len(), 2);
    }
}
