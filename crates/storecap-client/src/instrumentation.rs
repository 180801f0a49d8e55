// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ClientErrorCode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetrics {
    pub request_count: u64,
    pub retry_count: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub latency_ms_total: u128,
    pub failures_by_class: BTreeMap<String, u64>,
}

/// Hooks called by [`crate::HttpConsoleBackend`] around each request.
pub trait ClientInstrumentation: Send + Sync + 'static {
    fn observe_response(
        &self,
        _endpoint: &str,
        _bytes_sent: usize,
        _bytes_received: usize,
        _latency: Duration,
    ) {
    }
    fn observe_retry(&self, _endpoint: &str, _attempt: usize) {}
    fn observe_error(&self, _endpoint: &str, _code: ClientErrorCode) {}
}

#[derive(Debug, Default)]
pub struct NoopInstrumentation;

impl ClientInstrumentation for NoopInstrumentation {}

#[derive(Debug, Default)]
pub struct ClientMetricsCollector {
    inner: Mutex<ClientMetrics>,
}

impl ClientMetricsCollector {
    #[must_use]
    pub fn snapshot(&self) -> ClientMetrics {
        self.inner.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl ClientInstrumentation for ClientMetricsCollector {
    fn observe_response(
        &self,
        _endpoint: &str,
        bytes_sent: usize,
        bytes_received: usize,
        latency: Duration,
    ) {
        if let Ok(mut m) = self.inner.lock() {
            m.request_count = m.request_count.saturating_add(1);
            m.bytes_sent = m.bytes_sent.saturating_add(bytes_sent as u64);
            m.bytes_received = m.bytes_received.saturating_add(bytes_received as u64);
            m.latency_ms_total = m.latency_ms_total.saturating_add(latency.as_millis());
        }
    }

    fn observe_retry(&self, _endpoint: &str, _attempt: usize) {
        if let Ok(mut m) = self.inner.lock() {
            m.retry_count = m.retry_count.saturating_add(1);
        }
    }

    fn observe_error(&self, _endpoint: &str, code: ClientErrorCode) {
        if let Ok(mut m) = self.inner.lock() {
            m.request_count = m.request_count.saturating_add(1);
            *m.failures_by_class.entry(code.as_str().to_string()).or_insert(0) += 1;
        }
    }
}
