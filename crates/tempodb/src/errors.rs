// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;

/// Failure to write a batch of points to the backend.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("no data points to write")]
    EmptyBatch,

    #[error("unsupported value: {0}")]
    NonFiniteValue(f64),

    #[error("invalid series url: {0}")]
    InvalidUrl(String),

    #[error("failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by the [`crate::Client`] facade itself.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("client is finished, data point dropped")]
    Closed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no tokio runtime available to spawn workers")]
    NoRuntime,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
