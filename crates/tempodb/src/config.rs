// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
use crate::errors::ClientError;

/// Sizing and diagnostics settings of a [`crate::Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Number of worker tasks writing to the backend
    pub workers: usize,
    /// Number of points buffered before submissions wait for room
    pub queue_capacity: usize,
    /// Log write failures at error level; they are dropped silently otherwise
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            debug: false,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.workers == 0 {
            return Err(ClientError::InvalidConfig(
                "workers must be greater than 0".to_string(),
            ));
        }

        if self.queue_capacity == 0 {
            return Err(ClientError::InvalidConfig(
                "queue capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
