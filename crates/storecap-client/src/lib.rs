// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod backend;
mod config;
mod error;
mod fake;
mod gate;
mod http;
mod instrumentation;
mod retry;
mod submit;

pub use backend::{
    third_party_options_or_empty, ConsoleBackend, ENDPOINT_REF_3PP, ENDPOINT_REQUESTS,
    ENDPOINT_STORE_GET, ENDPOINT_STORE_PAYLOAD,
};
pub use config::{
    apply_env_overrides, load_client_config, validate_client_config, ClientConfig,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS,
};
pub use error::{ClientError, ClientErrorCode};
pub use fake::FakeConsoleBackend;
pub use gate::{SubmitGate, SubmitPermit};
pub use http::HttpConsoleBackend;
pub use instrumentation::{
    ClientInstrumentation, ClientMetrics, ClientMetricsCollector, NoopInstrumentation,
};
pub use retry::{BackoffPolicy, RetryPolicy};
pub use submit::{payload_fingerprint, submit_session, SubmitReport};

pub const CRATE_NAME: &str = "storecap-client";
