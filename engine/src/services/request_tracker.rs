// Supersession tracking for in-flight requests: every new request bumps a generation
// counter, and a result may only be applied while its ticket still holds the latest
// generation.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, making every earlier ticket stale.
    pub fn begin(&self) -> RequestTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            id,
            latest: self.latest.clone(),
        }
    }

    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
        assert_eq!(tracker.current(), second.id());
    }

    #[test]
    fn test_clones_share_generation() {
        let tracker = RequestTracker::new();
        let handle = tracker.clone();
        let ticket = tracker.begin();
        handle.begin();
        assert!(!ticket.is_current());
    }

    #[tokio::test]
    async fn test_stale_result_from_other_task_is_detected() {
        let tracker = RequestTracker::new();
        let slow = tracker.begin();
        let pending = tokio::spawn(async move {
            tokio::task::yield_now().await;
            slow.is_current()
        });
        let _fast = tracker.begin();
        assert!(!pending.await.unwrap());
    }
}
