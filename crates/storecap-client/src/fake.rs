// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use storecap_model::{RequestRecord, StoreConfig, UpdatePayload};

use crate::backend::ConsoleBackend;
use crate::error::{ClientError, ClientErrorCode};

/// In-memory backend for tests and offline runs.
pub struct FakeConsoleBackend {
    pub config: Mutex<StoreConfig>,
    pub third_party_options: Mutex<Vec<String>>,
    pub history: Mutex<Vec<RequestRecord>>,
    pub submitted: Mutex<Vec<UpdatePayload>>,
    /// Returned by the next `submit_update`, then cleared.
    pub fail_next_submit: Mutex<Option<ClientError>>,
    pub fail_third_party: bool,
    pub submit_calls: AtomicU64,
    pub submit_delay: Duration,
}

impl Default for FakeConsoleBackend {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeConsoleBackend {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: Mutex::new(config),
            third_party_options: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            fail_next_submit: Mutex::new(None),
            fail_third_party: false,
            submit_calls: AtomicU64::new(0),
            submit_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_third_party_options(self, options: Vec<String>) -> Self {
        *lock(&self.third_party_options) = options;
        self
    }

    #[must_use]
    pub fn with_history(self, history: Vec<RequestRecord>) -> Self {
        *lock(&self.history) = history;
        self
    }

    pub fn fail_next_submit(&self, code: ClientErrorCode, message: &str) {
        *lock(&self.fail_next_submit) = Some(ClientError::new(code, message));
    }

    #[must_use]
    pub fn submitted(&self) -> Vec<UpdatePayload> {
        lock(&self.submitted).clone()
    }
}

impl ConsoleBackend for FakeConsoleBackend {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    fn fetch_config(&self) -> Result<StoreConfig, ClientError> {
        Ok(lock(&self.config).clone())
    }

    fn fetch_third_party_options(&self) -> Result<Vec<String>, ClientError> {
        if self.fail_third_party {
            return Err(ClientError::new(
                ClientErrorCode::Status,
                "/api/ref3pp.json returned HTTP 500",
            ));
        }
        Ok(lock(&self.third_party_options).clone())
    }

    fn submit_update(&self, payload: &UpdatePayload) -> Result<(), ClientError> {
        self.submit_calls.fetch_add(1, Ordering::Relaxed);
        if !self.submit_delay.is_zero() {
            std::thread::sleep(self.submit_delay);
        }
        if let Some(err) = lock(&self.fail_next_submit).take() {
            return Err(err);
        }
        lock(&self.submitted).push(payload.clone());
        Ok(())
    }

    fn fetch_request_history(&self) -> Result<Vec<RequestRecord>, ClientError> {
        Ok(lock(&self.history).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::third_party_options_or_empty;

    #[test]
    fn failure_is_consumed_once() {
        let fake = FakeConsoleBackend::default();
        fake.fail_next_submit(ClientErrorCode::Status, "HTTP 503");
        let payload = UpdatePayload::default();
        assert!(fake.submit_update(&payload).is_err());
        assert!(fake.submit_update(&payload).is_ok());
        assert_eq!(fake.submitted().len(), 1);
        assert_eq!(fake.submit_calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failed_options_fetch_degrades_to_empty() {
        let fake = FakeConsoleBackend {
            fail_third_party: true,
            ..FakeConsoleBackend::default()
        }
        .with_third_party_options(vec!["Acme".to_string()]);
        assert!(third_party_options_or_empty(&fake).is_empty());

        let ok = FakeConsoleBackend::default().with_third_party_options(vec!["Acme".to_string()]);
        assert_eq!(third_party_options_or_empty(&ok), vec!["Acme".to_string()]);
    }
}
