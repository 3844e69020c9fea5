// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Bounded, closeable FIFO connecting submitters to workers.
//!
//! The producer half keeps the channel sender in an explicit slot; closing the
//! queue empties the slot. Consumers observe `None` once the queue is closed,
//! every in-flight submission has completed and the buffer is drained.
//! The buffered count is shared by both halves so it stays readable after the
//! producer has closed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, Mutex as TokioMutex};

use crate::errors::ClientError;
use crate::point::Point;

/// Creates a queue holding at most `capacity` points.
pub fn bounded(capacity: usize) -> (QueueProducer, QueueConsumer) {
    let (tx, rx) = mpsc::channel(capacity);
    let buffered = Arc::new(AtomicUsize::new(0));
    let producer = QueueProducer {
        tx: Mutex::new(Some(tx)),
        buffered: Arc::clone(&buffered),
    };
    let consumer = QueueConsumer {
        rx: Arc::new(TokioMutex::new(rx)),
        buffered,
    };
    (producer, consumer)
}

#[derive(Debug)]
pub struct QueueProducer {
    tx: Mutex<Option<mpsc::Sender<Point>>>,
    buffered: Arc<AtomicUsize>,
}

impl QueueProducer {
    fn sender(&self) -> Option<mpsc::Sender<Point>> {
        #[allow(clippy::expect_used)]
        let tx = self.tx.lock().expect("lock poisoned");
        tx.clone()
    }

    /// Enqueues `point`, waiting for room if the queue is full.
    ///
    /// A push that started before [`close`](Self::close) still completes and
    /// its point is drained.
    pub async fn push(&self, point: Point) -> Result<(), ClientError> {
        let tx = self.sender().ok_or(ClientError::Closed)?;
        let permit = tx.reserve().await.map_err(|_| ClientError::Closed)?;
        // Counted before the point becomes visible to consumers
        self.buffered.fetch_add(1, Ordering::AcqRel);
        permit.send(point);
        Ok(())
    }

    /// Blocking variant of [`push`](Self::push) for callers outside the
    /// runtime. Panics if called from within an async execution context.
    ///
    /// The point is counted in [`len`](Self::len) while the call waits for room.
    pub fn push_blocking(&self, point: Point) -> Result<(), ClientError> {
        let tx = self.sender().ok_or(ClientError::Closed)?;
        self.buffered.fetch_add(1, Ordering::AcqRel);
        tx.blocking_send(point).map_err(|_| {
            self.buffered.fetch_sub(1, Ordering::AcqRel);
            ClientError::Closed
        })
    }

    /// Stops accepting points. Returns `true` for the call that closed the queue.
    pub fn close(&self) -> bool {
        #[allow(clippy::expect_used)]
        let mut tx = self.tx.lock().expect("lock poisoned");
        tx.take().is_some()
    }

    pub fn is_closed(&self) -> bool {
        #[allow(clippy::expect_used)]
        let tx = self.tx.lock().expect("lock poisoned");
        tx.is_none()
    }

    /// Number of points buffered and not yet taken by a consumer, including
    /// after [`close`](Self::close).
    pub fn len(&self) -> usize {
        self.buffered.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Consumer half, shared by every worker.
#[derive(Debug, Clone)]
pub struct QueueConsumer {
    rx: Arc<TokioMutex<mpsc::Receiver<Point>>>,
    buffered: Arc<AtomicUsize>,
}

impl QueueConsumer {
    /// Waits for the next point. `None` means the queue is closed and drained.
    pub async fn pop(&self) -> Option<Point> {
        let point = self.rx.lock().await.recv().await?;
        self.buffered.fetch_sub(1, Ordering::AcqRel);
        Some(point)
    }
}
