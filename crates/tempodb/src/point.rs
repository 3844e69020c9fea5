// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the series a point belongs to, either by key or by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesRef {
    Key(String),
    Id(String),
}

impl std::fmt::Display for SeriesRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key:{}", key),
            Self::Id(id) => write!(f, "id:{}", id),
        }
    }
}

/// Time and value pair as it is sent to TempoDB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub t: DateTime<Utc>,
    pub v: f64,
}

/// A single data point queued for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    series: SeriesRef,
    timestamp: DateTime<Utc>,
    value: f64,
}

impl Point {
    /// Point for the series with the given key, stamped with the current time.
    pub fn by_key(key: impl Into<String>, value: f64) -> Self {
        Self::with_timestamp(SeriesRef::Key(key.into()), Utc::now(), value)
    }

    /// Point for the series with the given id, stamped with the current time.
    pub fn by_id(id: impl Into<String>, value: f64) -> Self {
        Self::with_timestamp(SeriesRef::Id(id.into()), Utc::now(), value)
    }

    pub fn with_timestamp(series: SeriesRef, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            series,
            timestamp,
            value,
        }
    }

    pub fn series(&self) -> &SeriesRef {
        &self.series
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn data_point(&self) -> DataPoint {
        DataPoint {
            t: self.timestamp,
            v: self.value,
        }
    }
}
