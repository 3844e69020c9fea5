// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Mock backend writers for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempodb::{BackendWriter, DataPoint, SeriesRef, WriteError};
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout};

/// One call received by the mock writer.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub series: SeriesRef,
    pub data: Vec<DataPoint>,
}

/// Writer recording every call, with optional latency, a gate that stalls
/// writes until released, and values that fail.
#[derive(Default)]
pub struct RecordingWriter {
    calls: Mutex<Vec<WriteCall>>,
    completed: AtomicUsize,
    delay: Option<Duration>,
    gate: Option<Semaphore>,
    fail_values: Vec<f64>,
}

#[allow(dead_code)]
impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every write waits for a permit handed out by [`release`](Self::release).
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn failing_on(mut self, values: &[f64]) -> Self {
        self.fail_values = values.to_vec();
        self
    }

    pub fn release(&self, writes: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(writes);
        }
    }

    /// Calls received so far, including the ones still in progress.
    pub fn calls(&self) -> Vec<WriteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn started(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Values of every received point, in call order.
    pub fn values(&self) -> Vec<f64> {
        self.calls()
            .iter()
            .flat_map(|call| call.data.iter().map(|point| point.v))
            .collect()
    }

    /// Waits until `count` writes have started.
    pub async fn wait_started(&self, count: usize) {
        timeout(Duration::from_secs(5), async {
            while self.started() < count {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for writes to start");
    }

    async fn record(&self, series: SeriesRef, data: &[DataPoint]) -> Result<(), WriteError> {
        self.calls.lock().unwrap().push(WriteCall {
            series,
            data: data.to_vec(),
        });

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if data.iter().any(|point| self.fail_values.contains(&point.v)) {
            return Err(WriteError::Other("mock write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BackendWriter for RecordingWriter {
    async fn write_key(&self, key: &str, data: &[DataPoint]) -> Result<(), WriteError> {
        self.record(SeriesRef::Key(key.to_string()), data).await
    }

    async fn write_id(&self, id: &str, data: &[DataPoint]) -> Result<(), WriteError> {
        self.record(SeriesRef::Id(id.to_string()), data).await
    }
}
