// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use storecap_policies::FieldError;

/// Outstanding validation errors, keyed by flag name and text field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    pub flag_errors: BTreeMap<String, Vec<FieldError>>,
    pub text_errors: BTreeMap<String, FieldError>,
}

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flag_errors.is_empty() && self.text_errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flag_errors.values().map(Vec::len).sum::<usize>() + self.text_errors.len()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        for (flag, errors) in &self.flag_errors {
            for error in errors {
                parts.push(format!("{flag}.{error}"));
            }
        }
        for error in self.text_errors.values() {
            parts.push(error.to_string());
        }
        f.write_str(&parts.join("; "))
    }
}

/// Derived view of a session. Never stored; see `EditSession::form_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub changed_flags: Vec<String>,
    pub has_changes: bool,
    pub errors: FormErrors,
    pub can_submit: bool,
}
