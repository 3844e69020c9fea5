// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Public facade: submit data points and drain them on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, debug_span, Instrument};

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::http::{Credentials, HttpWriter};
use crate::point::Point;
use crate::queue::{self, QueueProducer};
use crate::worker::Worker;
use crate::writer::BackendWriter;

/// Buffered, asynchronous writer to a TempoDB database.
///
/// Submitting a point only places it on a bounded queue; a fixed pool of
/// workers performs the writes. Dropping the client without calling
/// [`finish`](Self::finish) lets the workers drain the queue in the background.
#[derive(Debug)]
pub struct Client {
    queue: QueueProducer,
    workers: TaskTracker,
    config: ClientConfig,
}

impl Client {
    /// Creates a client and starts its workers on the current tokio runtime.
    ///
    /// No I/O happens here: backend failures surface per write.
    pub fn new(writer: Arc<dyn BackendWriter>, config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| ClientError::NoRuntime)?;

        let (queue, consumer) = queue::bounded(config.queue_capacity);
        let workers = TaskTracker::new();
        for id in 0..config.workers {
            let worker = Worker::new(id, consumer.clone(), Arc::clone(&writer), config.debug);
            workers.spawn_on(worker.run().instrument(debug_span!("worker", id)), &runtime);
        }
        // Closing the tracker lets `wait` resolve once every worker has exited
        workers.close();

        debug!(
            "Started {} workers with a queue of {} data points",
            config.workers, config.queue_capacity
        );

        Ok(Self {
            queue,
            workers,
            config,
        })
    }

    /// Creates a client writing to TempoDB over HTTP with the given credentials.
    pub fn with_credentials(
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let writer = HttpWriter::new(credentials)?;
        Self::new(Arc::new(writer), config)
    }

    /// Queues `value` for the series with the given key, waiting while the queue is full.
    pub async fn send(&self, key: impl Into<String>, value: f64) -> Result<(), ClientError> {
        self.send_point(Point::by_key(key, value)).await
    }

    /// Queues `value` for the series with the given id, waiting while the queue is full.
    pub async fn send_by_id(&self, id: impl Into<String>, value: f64) -> Result<(), ClientError> {
        self.send_point(Point::by_id(id, value)).await
    }

    /// Queues a prepared point. Fails with [`ClientError::Closed`] after
    /// [`finish`](Self::finish).
    pub async fn send_point(&self, point: Point) -> Result<(), ClientError> {
        self.queue.push(point).await
    }

    /// Blocking variant of [`send`](Self::send) for threads outside the runtime.
    ///
    /// Panics if called from within an async execution context.
    pub fn send_blocking(&self, key: impl Into<String>, value: f64) -> Result<(), ClientError> {
        self.queue.push_blocking(Point::by_key(key, value))
    }

    /// Blocking variant of [`send_by_id`](Self::send_by_id).
    ///
    /// Panics if called from within an async execution context.
    pub fn send_by_id_blocking(
        &self,
        id: impl Into<String>,
        value: f64,
    ) -> Result<(), ClientError> {
        self.queue.push_blocking(Point::by_id(id, value))
    }

    /// Stops accepting points and waits for every queued point to be handed to
    /// the backend.
    ///
    /// Returns `false` if `timeout` elapsed first. The workers keep draining in
    /// the background in that case, and calling `finish` again waits anew.
    pub async fn finish(&self, timeout: Duration) -> bool {
        let pending = self.queue.len();
        if self.queue.close() {
            debug!("Queue closed with {} data points pending", pending);
        }

        match tokio::time::timeout(timeout, self.workers.wait()).await {
            Ok(()) => {
                debug!("All data points handed to the backend");
                true
            }
            Err(_) => {
                debug!("Timed out after {:?} waiting for workers to drain", timeout);
                false
            }
        }
    }

    /// Whether [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.queue.is_closed()
    }

    /// Number of points waiting in the queue, still counted while a timed-out
    /// [`finish`](Self::finish) drains in the background.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Settings the client was started with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
