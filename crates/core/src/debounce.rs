//! Trailing-edge debounce over a channel of change notifications.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Waits for one event, then keeps collecting until `delay` passes with no
    /// new event. Every event pushes the deadline back. `None` once the channel
    /// is closed and drained.
    pub async fn next_batch<T>(&self, rx: &mut mpsc::Receiver<T>) -> Option<Vec<T>> {
        self.next_batch_filtered(rx, |_| true).await
    }

    /// Like [`Debouncer::next_batch`], but events rejected by `keep` are
    /// dropped and neither start nor extend a batch.
    pub async fn next_batch_filtered<T, F>(
        &self,
        rx: &mut mpsc::Receiver<T>,
        keep: F,
    ) -> Option<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let first = loop {
            let ev = rx.recv().await?;
            if keep(&ev) {
                break ev;
            }
        };
        let mut batch = vec![first];
        let mut deadline = Instant::now() + self.delay;
        loop {
            tokio::select! {
                ev = rx.recv() => match ev {
                    Some(ev) if keep(&ev) => {
                        batch.push(ev);
                        deadline = Instant::now() + self.delay;
                    }
                    Some(_) => {}
                    None => return Some(batch),
                },
                _ = sleep_until(deadline) => return Some(batch),
            }
        }
    }
}
