// SPDX-License-Identifier: Apache-2.0

use storecap_model::{RequestRecord, StoreConfig, UpdatePayload};
use tracing::warn;

use crate::error::ClientError;

pub const ENDPOINT_STORE_GET: &str = "/api/storeGet.json";
pub const ENDPOINT_STORE_PAYLOAD: &str = "/api/storePayload.json";
pub const ENDPOINT_REF_3PP: &str = "/api/ref3pp.json";
pub const ENDPOINT_REQUESTS: &str = "/api/requests.json";

/// Everything the console needs from the server.
pub trait ConsoleBackend {
    fn backend_tag(&self) -> &'static str;

    fn fetch_config(&self) -> Result<StoreConfig, ClientError>;

    fn fetch_third_party_options(&self) -> Result<Vec<String>, ClientError>;

    /// Any 2xx response counts as success.
    fn submit_update(&self, payload: &UpdatePayload) -> Result<(), ClientError>;

    fn fetch_request_history(&self) -> Result<Vec<RequestRecord>, ClientError>;
}

/// Third-party options for the 3P form. A failed fetch yields an empty list.
#[must_use]
pub fn third_party_options_or_empty(backend: &dyn ConsoleBackend) -> Vec<String> {
    match backend.fetch_third_party_options() {
        Ok(options) => options,
        Err(err) => {
            warn!(
                backend = backend.backend_tag(),
                endpoint = ENDPOINT_REF_3PP,
                error = %err,
                "third-party options unavailable, using empty list"
            );
            Vec::new()
        }
    }
}
