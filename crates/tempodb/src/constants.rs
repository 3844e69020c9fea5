// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Number of points the queue holds before `send` starts waiting.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Number of worker tasks draining the queue.
pub const DEFAULT_WORKERS: usize = 3;

pub const DEFAULT_API_HOST: &str = "https://api.tempo-db.com";

pub const API_VERSION: &str = "v1";

/// Per-request timeout for the HTTP writer.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

pub const API_KEY_ENV: &str = "TEMPODB_API_KEY";
pub const API_SECRET_ENV: &str = "TEMPODB_API_SECRET";
pub const API_HOST_ENV: &str = "TEMPODB_API_HOST";
