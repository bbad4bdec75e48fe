//! Completion channel and the collector that drains it.
//!
//! Events travel as [`Delivery`] values. A delivery may carry an
//! acknowledgement that fires when the collector takes the event, which
//! turns a buffered send into a rendezvous: [`hand_off`] returns only once
//! the event has been consumed.

use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

use crate::types::{BatchSummary, CompletionEvent};

/// A completion event in transit, optionally waiting to be consumed.
#[derive(Debug)]
pub struct Delivery {
    event: CompletionEvent,
    consumed: Option<oneshot::Sender<()>>,
}

impl Delivery {
    /// A delivery nobody waits on.
    pub fn detached(event: CompletionEvent) -> Self {
        Self {
            event,
            consumed: None,
        }
    }

    /// A delivery whose sender waits on the returned receiver.
    pub fn rendezvous(event: CompletionEvent) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let delivery = Self {
            event,
            consumed: Some(tx),
        };
        (delivery, rx)
    }

    /// Take the event, releasing a waiting sender.
    pub fn accept(self) -> CompletionEvent {
        if let Some(consumed) = self.consumed {
            // Sender may have given up already.
            let _ = consumed.send(());
        }
        self.event
    }
}

/// Create a completion channel holding at most `capacity` undelivered events.
///
/// Zero is clamped to one; use [`hand_off`] for unbuffered semantics.
pub fn completion_channel(capacity: usize) -> (mpsc::Sender<Delivery>, mpsc::Receiver<Delivery>) {
    mpsc::channel(capacity.max(1))
}

/// Send `event` and wait until the collector has taken it.
///
/// Returns `false` if the collector is gone or dropped the event unread.
pub async fn hand_off(tx: &mpsc::Sender<Delivery>, event: CompletionEvent) -> bool {
    let (delivery, consumed) = Delivery::rendezvous(event);
    if tx.send(delivery).await.is_err() {
        return false;
    }
    consumed.await.is_ok()
}

/// Drain `events` until every sender is gone and the buffer is empty.
///
/// `on_event` is called once per event in arrival order. This is the only
/// place a batch waits for its workers.
pub async fn drain<F>(mut events: mpsc::Receiver<Delivery>, mut on_event: F) -> BatchSummary
where
    F: FnMut(&CompletionEvent),
{
    let start = Instant::now();
    let mut summary = BatchSummary::default();

    while let Some(delivery) = events.recv().await {
        let event = delivery.accept();
        summary.record(&event);
        on_event(&event);
    }

    summary.elapsed = start.elapsed();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drain_stops_when_senders_dropped() {
        let (tx, rx) = completion_channel(4);
        tx.send(Delivery::detached(CompletionEvent::written("a.png")))
            .await
            .unwrap();
        tx.send(Delivery::detached(CompletionEvent::written("b.png")))
            .await
            .unwrap();
        drop(tx);

        let mut seen = Vec::new();
        let summary = drain(rx, |e| seen.push(e.file_name.clone())).await;

        assert_eq!(seen, vec!["a.png", "b.png"]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 2);
    }

    #[tokio::test]
    async fn test_drain_empty_channel_returns_immediately() {
        let (tx, rx) = completion_channel(0);
        drop(tx);

        let summary = drain(rx, |_| panic!("no events expected")).await;
        assert_eq!(summary.total, 0);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let (tx, mut rx) = completion_channel(0);
        tx.send(Delivery::detached(CompletionEvent::written("a.png")))
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().accept().file_name, "a.png");
    }

    #[tokio::test]
    async fn test_hand_off_waits_for_receive() {
        let (tx, mut rx) = completion_channel(1);
        let sender = tokio::spawn(async move {
            hand_off(&tx, CompletionEvent::written("a.png")).await
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!sender.is_finished());

        let event = rx.recv().await.unwrap().accept();
        assert_eq!(event.file_name, "a.png");
        assert!(sender.await.unwrap());
    }

    #[tokio::test]
    async fn test_hand_off_fails_when_collector_gone() {
        let (tx, rx) = completion_channel(1);
        drop(rx);
        assert!(!hand_off(&tx, CompletionEvent::written("a.png")).await);
    }
}
