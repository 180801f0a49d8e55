// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use tracing::{info, warn};

use storecap_core::stable_json_hash_hex;
use storecap_model::UpdatePayload;
use storecap_policies::{evaluate_update_payload, PolicyViolation};
use storecap_session::EditSession;

use crate::backend::ConsoleBackend;
use crate::error::{ClientError, ClientErrorCode};
use crate::gate::SubmitGate;

/// Outcome of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    pub payload: UpdatePayload,
    pub fingerprint: String,
    pub warnings: Vec<PolicyViolation>,
}

/// SHA-256 of the canonical JSON encoding of `payload`.
pub fn payload_fingerprint(payload: &UpdatePayload) -> Result<String, ClientError> {
    stable_json_hash_hex(payload)
        .map_err(|e| ClientError::new(ClientErrorCode::Validation, e.to_string()))
}

/// Builds, checks and posts the session's payload.
///
/// An unchanged session is refused before anything is posted. The session
/// baseline moves only after the backend confirms; on any error the session
/// is left exactly as it was. A second call while one is in
/// flight fails with [`ClientErrorCode::Busy`].
pub fn submit_session(
    backend: &dyn ConsoleBackend,
    gate: &SubmitGate,
    session: &mut EditSession,
) -> Result<SubmitReport, ClientError> {
    let _permit = gate.try_acquire()?;

    let payload = session
        .build_update_payload()
        .map_err(|e| ClientError::new(ClientErrorCode::Validation, e.to_string()))?;
    if !session.form_state().has_changes {
        return Err(ClientError::new(
            ClientErrorCode::Validation,
            "nothing to submit: the session has no changes",
        ));
    }

    let (blocking, warnings): (Vec<PolicyViolation>, Vec<PolicyViolation>) =
        evaluate_update_payload(&payload)
            .into_iter()
            .partition(PolicyViolation::is_blocking);
    if let Some(first) = blocking.first() {
        return Err(ClientError::new(
            ClientErrorCode::Validation,
            format!("{}: {} ({})", first.id, first.message, first.evidence),
        ));
    }
    for violation in &warnings {
        warn!(id = %violation.id, evidence = %violation.evidence, "{}", violation.message);
    }

    let fingerprint = payload_fingerprint(&payload)?;
    backend.submit_update(&payload)?;
    session.commit_success();
    info!(
        backend = backend.backend_tag(),
        payload_sha256 = %fingerprint,
        flags = payload.flags.len(),
        ids = payload.id_list.len(),
        "update submitted"
    );

    Ok(SubmitReport {
        payload,
        fingerprint,
        warnings,
    })
}
