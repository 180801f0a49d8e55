// SPDX-License-Identifier: Apache-2.0

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use storecap_model::{RequestRecord, StoreConfig, UpdatePayload};

use crate::backend::{
    ConsoleBackend, ENDPOINT_REF_3PP, ENDPOINT_REQUESTS, ENDPOINT_STORE_GET,
    ENDPOINT_STORE_PAYLOAD,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientErrorCode};
use crate::instrumentation::{ClientInstrumentation, NoopInstrumentation};
use crate::retry::{BackoffPolicy, RetryPolicy};

/// Blocking HTTP backend. Must not be driven from inside an async runtime.
#[derive(Clone)]
pub struct HttpConsoleBackend {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
    instrumentation: Arc<dyn ClientInstrumentation>,
}

impl std::fmt::Debug for HttpConsoleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConsoleBackend")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpConsoleBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| ClientError::new(ClientErrorCode::Config, format!("base url: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::new(
                ClientErrorCode::Config,
                format!("base url must be http or https, got `{}`", parsed.scheme()),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ClientError::new(ClientErrorCode::Config, e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::default(),
            instrumentation: Arc::new(NoopInstrumentation),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(
            Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))?
                .with_retry(config.retry_policy()),
        )
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn ClientInstrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ClientError> {
        let url = self.url_for(endpoint);
        let mut attempt = 0_usize;
        loop {
            attempt += 1;
            let started = Instant::now();
            let (status, err) = match self.client.get(&url).send() {
                Ok(resp) if resp.status().is_success() => {
                    let bytes = resp
                        .bytes()
                        .map_err(|e| ClientError::new(ClientErrorCode::Network, e.to_string()))?;
                    self.instrumentation
                        .observe_response(endpoint, 0, bytes.len(), started.elapsed());
                    debug!(endpoint, attempt, bytes = bytes.len(), "fetched");
                    return serde_json::from_slice(&bytes).map_err(|e| {
                        self.instrumentation
                            .observe_error(endpoint, ClientErrorCode::Decode);
                        ClientError::new(ClientErrorCode::Decode, format!("{endpoint}: {e}"))
                    });
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    (
                        Some(status),
                        ClientError::new(
                            ClientErrorCode::Status,
                            format!("{endpoint} returned HTTP {status}"),
                        ),
                    )
                }
                Err(e) => (None, ClientError::new(ClientErrorCode::Network, e.to_string())),
            };

            self.instrumentation.observe_error(endpoint, err.code);
            if attempt >= self.retry.max_attempts || !RetryPolicy::is_retryable_status(status) {
                warn!(endpoint, attempt, status, error = %err, "request failed");
                return Err(err);
            }
            self.instrumentation.observe_retry(endpoint, attempt);
            info!(endpoint, attempt, status, "retrying request");
            thread::sleep(self.retry.delay_for_attempt(attempt));
        }
    }
}

impl ConsoleBackend for HttpConsoleBackend {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    fn fetch_config(&self) -> Result<StoreConfig, ClientError> {
        self.get_json(ENDPOINT_STORE_GET)
    }

    fn fetch_third_party_options(&self) -> Result<Vec<String>, ClientError> {
        self.get_json(ENDPOINT_REF_3PP)
    }

    fn submit_update(&self, payload: &UpdatePayload) -> Result<(), ClientError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ClientError::new(ClientErrorCode::Validation, e.to_string()))?;
        let sent = body.len();
        let started = Instant::now();
        let resp = self
            .client
            .post(self.url_for(ENDPOINT_STORE_PAYLOAD))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| {
                self.instrumentation
                    .observe_error(ENDPOINT_STORE_PAYLOAD, ClientErrorCode::Network);
                ClientError::new(ClientErrorCode::Network, e.to_string())
            })?;
        let status = resp.status();
        if !status.is_success() {
            self.instrumentation
                .observe_error(ENDPOINT_STORE_PAYLOAD, ClientErrorCode::Status);
            return Err(ClientError::new(
                ClientErrorCode::Status,
                format!("{ENDPOINT_STORE_PAYLOAD} returned HTTP {}", status.as_u16()),
            ));
        }
        self.instrumentation
            .observe_response(ENDPOINT_STORE_PAYLOAD, sent, 0, started.elapsed());
        Ok(())
    }

    fn fetch_request_history(&self) -> Result<Vec<RequestRecord>, ClientError> {
        self.get_json(ENDPOINT_REQUESTS)
    }
}
