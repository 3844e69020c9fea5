// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tracing::{debug, error};

use crate::point::Point;
use crate::queue::QueueConsumer;
use crate::writer::BackendWriter;

/// Consumer loop writing every queued point to the backend, one point per call.
pub struct Worker {
    id: usize,
    queue: QueueConsumer,
    writer: Arc<dyn BackendWriter>,
    debug: bool,
}

impl Worker {
    pub fn new(
        id: usize,
        queue: QueueConsumer,
        writer: Arc<dyn BackendWriter>,
        debug: bool,
    ) -> Self {
        Self {
            id,
            queue,
            writer,
            debug,
        }
    }

    /// Runs until the queue is closed and drained.
    pub async fn run(self) {
        debug!("Worker {} started", self.id);

        while let Some(point) = self.queue.pop().await {
            self.write(point).await;
        }

        debug!("Worker {} stopped", self.id);
    }

    async fn write(&self, point: Point) {
        let data = [point.data_point()];
        // Failures never stop the loop; the point is dropped either way
        if let Err(e) = self.writer.write(point.series(), &data).await {
            if self.debug {
                error!("can't write data point to {}: {}", point.series(), e);
            }
        }
    }
}
