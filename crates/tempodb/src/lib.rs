// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! # TempoDB buffered writer
//!
//! Asynchronous API for sending data points to TempoDB.
//!
//! `send` and `send_by_id` only put a data point on a bounded queue. A fixed
//! pool of worker tasks drains the queue and performs the network writes
//! through a [`writer::BackendWriter`].
//!
//! ```text
//!   caller ──send()──> ┌───────┐ ──> worker 0 ──┐
//!                      │ Queue │ ──> worker 1 ──┼──> BackendWriter ──> TempoDB
//!   caller ──send()──> └───────┘ ──> worker 2 ──┘
//! ```
//!
//! [`client::Client::finish`] closes the queue and waits, up to a timeout, for
//! every queued point to be handed to the backend.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod http;
pub mod point;
pub mod queue;
pub mod worker;
pub mod writer;

pub use client::Client;
pub use config::ClientConfig;
pub use errors::{ClientError, WriteError};
pub use http::{Credentials, HttpWriter};
pub use point::{DataPoint, Point, SeriesRef};
pub use writer::BackendWriter;
