//! Ordered, cancellable per-event transformation of a source stream.
//!
//! Each source event's transform starts the moment the event arrives, so
//! slow transforms never delay the intake of later events. Emission is
//! gated on order: the consumer drains completed transforms strictly in
//! source order, even when a later transform finishes first.

use futures::Stream;
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A subscription backed by a producer task reading the source stream and
/// one spawned transform per event.
///
/// Slots (one per event, in arrival order) travel through an unbounded
/// queue; [`next`] awaits the head slot's transform before yielding, which
/// pins emission order to source order.
///
/// [`next`]: SubscriptionPipeline::next
pub struct SubscriptionPipeline<T> {
    slots: mpsc::UnboundedReceiver<oneshot::Receiver<Option<T>>>,
    cancellation: CancellationToken,
    producer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> SubscriptionPipeline<T> {
    /// Starts consuming `source`, applying `transform` to every event.
    ///
    /// A transform returning `None` drops its event without disturbing
    /// the ordering of the others.
    pub fn new<S, E, F, Fut>(source: S, transform: F) -> Self
    where
        S: Stream<Item = E> + Send + Unpin + 'static,
        E: Send + 'static,
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        let cancellation = CancellationToken::new();
        let (slot_tx, slot_rx) = mpsc::unbounded_channel();

        let token = cancellation.clone();
        let producer = tokio::spawn(async move {
            let transform = Arc::new(transform);
            let mut source = source;
            loop {
                let event = tokio::select! {
                    _ = token.cancelled() => break,
                    event = source.next() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };

                // Enqueue the slot before starting the transform so queue
                // order is source order.
                let (result_tx, result_rx) = oneshot::channel();
                if slot_tx.send(result_rx).is_err() {
                    break;
                }

                let transform = Arc::clone(&transform);
                let token = token.clone();
                tokio::spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => None,
                        result = transform(event) => result,
                    };
                    // The consumer may already be gone; nothing to do then.
                    let _ = result_tx.send(result);
                });
            }
            debug!("subscription source detached");
        });

        Self {
            slots: slot_rx,
            cancellation,
            producer: Some(producer),
        }
    }
}

impl<T> SubscriptionPipeline<T> {
    /// Yields the next transformed event in source order, or `None` once
    /// the source is exhausted or the pipeline disposed.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            let slot = self.slots.recv().await?;
            match slot.await {
                Ok(Some(value)) => return Some(value),
                // Filtered or cancelled event; its slot is consumed so
                // later events keep their positions.
                Ok(None) | Err(_) => continue,
            }
        }
    }

    /// The token in-flight transforms observe; exposed so transforms can
    /// thread it into request execution.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_disposed(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Cancels every in-flight transform, detaches from the source, and
    /// waits for the producer to stop. After this returns nothing is
    /// emitted again, even if a transform's inner work resolves later.
    pub async fn dispose(mut self) {
        self.cancellation.cancel();
        self.slots.close();
        if let Some(producer) = self.producer.take() {
            let _ = producer.await;
        }
    }
}

impl<T> Drop for SubscriptionPipeline<T> {
    fn drop(&mut self) {
        // Dropping without dispose() still stops the producer and the
        // in-flight transforms.
        self.cancellation.cancel();
    }
}
