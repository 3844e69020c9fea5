// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::errors::WriteError;
use crate::point::{DataPoint, SeriesRef};

/// Backend capable of storing data points in a series.
///
/// Implementations are shared by every worker of a [`crate::Client`] and are
/// called concurrently.
#[async_trait]
pub trait BackendWriter: Send + Sync {
    /// Writes `data` to the series identified by `key`.
    async fn write_key(&self, key: &str, data: &[DataPoint]) -> Result<(), WriteError>;

    /// Writes `data` to the series identified by `id`.
    async fn write_id(&self, id: &str, data: &[DataPoint]) -> Result<(), WriteError>;

    /// Dispatches to `write_key` or `write_id` depending on the series reference.
    async fn write(&self, series: &SeriesRef, data: &[DataPoint]) -> Result<(), WriteError> {
        match series {
            SeriesRef::Key(key) => self.write_key(key, data).await,
            SeriesRef::Id(id) => self.write_id(id, data).await,
        }
    }
}
