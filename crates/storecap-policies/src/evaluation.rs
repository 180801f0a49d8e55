// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storecap_model::UpdatePayload;

use crate::special::WFC_ID_MAX_DIGITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PolicySeverity {
    Info,
    Warning,
    Error,
}

impl PolicySeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyViolation {
    pub id: String,
    pub severity: PolicySeverity,
    pub message: String,
    pub evidence: String,
}

impl PolicyViolation {
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.severity, PolicySeverity::Error)
    }
}

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    BoolEquals(bool),
    DigitStrings,
    DigitStringUpTo(usize),
}

#[derive(Debug, Clone, Copy)]
struct RuleSpec {
    id: &'static str,
    severity: PolicySeverity,
    message: &'static str,
    path: &'static str,
    required: bool,
    kind: RuleKind,
}

const PAYLOAD_RULES: &[RuleSpec] = &[
    RuleSpec {
        id: "payload.select_all.forbidden",
        severity: PolicySeverity::Error,
        message: "selectAll must be false",
        path: "selectAll",
        required: true,
        kind: RuleKind::BoolEquals(false),
    },
    RuleSpec {
        id: "payload.id_list.numeric",
        severity: PolicySeverity::Error,
        message: "idList entries must be decimal store ids",
        path: "idList",
        required: true,
        kind: RuleKind::DigitStrings,
    },
    RuleSpec {
        id: "payload.wfc_id.format",
        severity: PolicySeverity::Error,
        message: "wfcId must be 1-8 digits",
        path: "wfcId",
        required: false,
        kind: RuleKind::DigitStringUpTo(WFC_ID_MAX_DIGITS),
    },
];

fn is_digits(value: &str, max_len: usize) -> bool {
    (1..=max_len).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Last gate before a payload leaves the process. Violations with
/// [`PolicySeverity::Error`] block submission.
#[must_use]
pub fn evaluate_update_payload(payload: &UpdatePayload) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    let value = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(error) => {
            violations.push(PolicyViolation {
                id: "payload.serialization.failure".to_string(),
                severity: PolicySeverity::Error,
                message: "update payload serialization failed".to_string(),
                evidence: error.to_string(),
            });
            return violations;
        }
    };

    for rule in PAYLOAD_RULES {
        apply_rule(&value, *rule, &mut violations);
    }

    let has_division = payload.div_code.is_some();
    let has_ids = !payload.id_list.is_empty();
    if has_division && has_ids {
        violations.push(PolicyViolation {
            id: "payload.scope.exclusive".to_string(),
            severity: PolicySeverity::Error,
            message: "divCode and idList must not both be set".to_string(),
            evidence: format!("idList={}", payload.id_list.len()),
        });
    } else if !has_division && !has_ids {
        violations.push(PolicyViolation {
            id: "payload.scope.missing".to_string(),
            severity: PolicySeverity::Warning,
            message: "payload names neither a division nor store ids".to_string(),
            evidence: "divCode=null idList=0".to_string(),
        });
    }

    let has_text = payload.text_field.iter().any(|t| !t.text_value.is_empty());
    if payload.flags.is_empty() && !has_text {
        violations.push(PolicyViolation {
            id: "payload.changes.empty".to_string(),
            severity: PolicySeverity::Warning,
            message: "payload carries no flag or text field changes".to_string(),
            evidence: format!("flags=0 textField={}", payload.text_field.len()),
        });
    }

    violations
}

fn apply_rule(root: &Value, rule: RuleSpec, out: &mut Vec<PolicyViolation>) {
    let Some(value) = root.get(rule.path) else {
        if rule.required {
            out.push(PolicyViolation {
                id: rule.id.to_string(),
                severity: PolicySeverity::Error,
                message: "required payload field missing".to_string(),
                evidence: format!("path={}", rule.path),
            });
        }
        return;
    };

    let pass = match rule.kind {
        RuleKind::BoolEquals(expected) => value.as_bool() == Some(expected),
        RuleKind::DigitStrings => value.as_array().is_some_and(|items| {
            items
                .iter()
                .all(|item| item.as_str().is_some_and(|s| is_digits(s, usize::MAX)))
        }),
        RuleKind::DigitStringUpTo(max) => {
            value.is_null() || value.as_str().is_some_and(|s| is_digits(s, max))
        }
    };

    if !pass {
        out.push(PolicyViolation {
            id: rule.id.to_string(),
            severity: rule.severity,
            message: rule.message.to_string(),
            evidence: format!("path={} value={}", rule.path, value),
        });
    }
}
