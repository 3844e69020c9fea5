// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP writer for the TempoDB REST API.
//!
//! Each write is a `POST /v1/series/{key|id}/{series}/data/` carrying a JSON
//! array of `{"t": ..., "v": ...}` objects, authenticated with HTTP basic auth.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::constants::{
    API_HOST_ENV, API_KEY_ENV, API_SECRET_ENV, API_VERSION, DEFAULT_API_HOST,
    DEFAULT_HTTP_TIMEOUT,
};
use crate::errors::{ClientError, WriteError};
use crate::point::DataPoint;
use crate::writer::BackendWriter;

/// Credentials and endpoint of a TempoDB database.
#[derive(Clone)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
    /// Scheme and host of the API, e.g. "https://api.tempo-db.com"
    pub base_url: String,
    pub timeout: Duration,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            base_url: DEFAULT_API_HOST.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads credentials from `TEMPODB_API_KEY`, `TEMPODB_API_SECRET` and the
    /// optional `TEMPODB_API_HOST`.
    pub fn from_env() -> Result<Self, ClientError> {
        let key = env::var(API_KEY_ENV)
            .map_err(|_| ClientError::InvalidConfig(format!("{API_KEY_ENV} not set")))?;
        let secret = env::var(API_SECRET_ENV)
            .map_err(|_| ClientError::InvalidConfig(format!("{API_SECRET_ENV} not set")))?;
        let mut credentials = Self::new(key, secret);
        if let Ok(host) = env::var(API_HOST_ENV) {
            credentials.base_url = host;
        }

        credentials.validate()?;
        Ok(credentials)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.key.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "API key cannot be empty".to_string(),
            ));
        }
        if self.secret.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "API secret cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HttpWriter {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpWriter {
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        credentials.validate()?;
        let base_url = Url::parse(&credentials.base_url).map_err(|e| {
            ClientError::InvalidConfig(format!(
                "invalid base url '{}': {e}",
                credentials.base_url
            ))
        })?;
        let client = reqwest::Client::builder()
            .timeout(credentials.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn series_url(&self, kind: &str, series: &str) -> Result<Url, WriteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WriteError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([API_VERSION, "series", kind, series, "data", ""]);
        Ok(url)
    }

    async fn post(&self, kind: &str, series: &str, data: &[DataPoint]) -> Result<(), WriteError> {
        if data.is_empty() {
            return Err(WriteError::EmptyBatch);
        }
        // JSON has no representation for NaN or infinity
        if let Some(point) = data.iter().find(|point| !point.v.is_finite()) {
            return Err(WriteError::NonFiniteValue(point.v));
        }
        let url = self.series_url(kind, series)?;
        debug!("Writing {} data points to {}", data.len(), url.path());

        let resp = self
            .client
            .post(url)
            .basic_auth(&self.credentials.key, Some(&self.credentials.secret))
            .json(data)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        // Don't fail twice if the body can't be read
        let body = resp.text().await.unwrap_or_default();
        Err(WriteError::Status { status, body })
    }
}

#[async_trait]
impl BackendWriter for HttpWriter {
    async fn write_key(&self, key: &str, data: &[DataPoint]) -> Result<(), WriteError> {
        self.post("key", key, data).await
    }

    async fn write_id(&self, id: &str, data: &[DataPoint]) -> Result<(), WriteError> {
        self.post("id", id, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn writer(base_url: &str) -> HttpWriter {
        HttpWriter::new(Credentials::new("key", "secret").with_base_url(base_url))
            .expect("failed to create writer")
    }

    #[test]
    fn test_series_url() {
        let writer = writer("https://api.tempo-db.com");
        assert_eq!(
            writer.series_url("key", "cpu.load").unwrap().as_str(),
            "https://api.tempo-db.com/v1/series/key/cpu.load/data/"
        );
        assert_eq!(
            writer.series_url("id", "01868c1a").unwrap().as_str(),
            "https://api.tempo-db.com/v1/series/id/01868c1a/data/"
        );
    }

    #[test]
    fn test_series_url_encodes_segment() {
        let writer = writer("http://localhost:4242/");
        assert_eq!(
            writer.series_url("key", "a/b c").unwrap().as_str(),
            "http://localhost:4242/v1/series/key/a%2Fb%20c/data/"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = HttpWriter::new(Credentials::new("key", "secret").with_base_url("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_empty_credentials() {
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("key", "  ").validate().is_err());
        assert!(Credentials::new("key", "secret").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug_str = format!("{:?}", Credentials::new("key", "hunter2"));
        assert!(debug_str.contains("key"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let writer = writer("http://127.0.0.1:1");
        let result = writer.write_key("abc", &[]).await;
        assert!(matches!(result, Err(WriteError::EmptyBatch)));
    }

    #[tokio::test]
    async fn test_non_finite_value_is_rejected() {
        let writer = writer("http://127.0.0.1:1");
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let data = [
                DataPoint {
                    t: chrono::Utc::now(),
                    v: 1.0,
                },
                DataPoint {
                    t: chrono::Utc::now(),
                    v,
                },
            ];
            let result = writer.write_id("abc", &data).await;
            assert!(
                matches!(result, Err(WriteError::NonFiniteValue(_))),
                "{v} should be rejected before sending, got {result:?}"
            );
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var(API_KEY_ENV, "env-key");
        env::set_var(API_SECRET_ENV, "env-secret");
        env::set_var(API_HOST_ENV, "http://localhost:4242");

        let credentials = Credentials::from_env().expect("failed to read credentials");
        assert_eq!(credentials.key, "env-key");
        assert_eq!(credentials.secret, "env-secret");
        assert_eq!(credentials.base_url, "http://localhost:4242");
        assert_eq!(credentials.timeout, DEFAULT_HTTP_TIMEOUT);

        env::remove_var(API_HOST_ENV);
        let credentials = Credentials::from_env().expect("failed to read credentials");
        assert_eq!(credentials.base_url, DEFAULT_API_HOST);

        env::remove_var(API_KEY_ENV);
        env::remove_var(API_SECRET_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_secret() {
        env::set_var(API_KEY_ENV, "env-key");
        env::remove_var(API_SECRET_ENV);

        let result = Credentials::from_env();
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));

        env::remove_var(API_KEY_ENV);
    }
}
