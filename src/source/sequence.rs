//! Latest-request tagging
//!
//! Suggestion requests are issued per keystroke and may complete out of
//! order. A `RequestSequence` hands out increasing tickets; a response is
//! only worth showing if its ticket is still the latest one issued.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic ticket counter, shared by all requests of one input box
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before
    pub fn next(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let seq = RequestSequence::new();
        let a = seq.next();
        let b = seq.next();
        assert!(b > a);
    }

    #[test]
    fn test_only_newest_is_latest() {
        let seq = RequestSequence::new();
        let first = seq.next();
        assert!(seq.is_latest(first));

        let second = seq.next();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }
}
