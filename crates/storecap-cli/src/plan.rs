// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use storecap_core::ResultExt;
use storecap_model::{FlagValue, RawScalar, RawSpecialValues, SpecialFlag};
use storecap_policies::FieldError;
use storecap_session::{EditSession, SessionError};

use crate::error::CliError;

/// Edits to replay onto a freshly loaded session, read from a JSON file.
///
/// ```json
/// {
///   "ids": ["1201", 1202],
///   "flags": {"isWfcFlagEnabled": true, "isPickupEnabled": null},
///   "special": {"isWfcFlagEnabled": {"wfcId": "1234"}},
///   "text": {"displayDays": 5}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EditPlan {
    pub(crate) division: Option<String>,
    pub(crate) ids: Vec<RawScalar>,
    pub(crate) flags: BTreeMap<String, FlagValue>,
    pub(crate) special: BTreeMap<SpecialFlag, RawSpecialValues>,
    pub(crate) text: BTreeMap<String, RawScalar>,
}

impl EditPlan {
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path)
            .with_context("read plan file")
            .map_err(CliError::usage)?;
        let plan: Self = serde_json::from_str(&raw)
            .with_context("parse plan file")
            .map_err(CliError::usage)?;
        plan.validate().map_err(CliError::usage)?;
        Ok(plan)
    }

    fn validate(&self) -> Result<(), String> {
        if self.division.is_some() && !self.ids.is_empty() {
            return Err("plan must name a division or store ids, not both".to_string());
        }
        Ok(())
    }

    /// Replays the plan in form order: scope, flags, special values, text.
    /// Special values for a flag the plan does not leave ON are skipped.
    pub(crate) fn apply(&self, session: &mut EditSession) -> Result<Vec<FieldError>, SessionError> {
        if let Some(division) = &self.division {
            session.select_division(division)?;
        }
        for id in &self.ids {
            session.enter_id(id.as_text())?;
        }
        for (name, value) in &self.flags {
            session.set_flag(name, *value)?;
        }

        let mut field_errors = Vec::new();
        for (flag, raw) in &self.special {
            if session.flag_value(flag.as_str()) != Some(FlagValue::On) {
                warn!(flag = %flag, "skipping special values for a flag that is not on");
                continue;
            }
            field_errors.extend(session.apply_special_values(*flag, raw)?);
        }

        for (name, raw) in &self.text {
            session.set_text_value(name, raw.as_text())?;
        }
        Ok(field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storecap_model::{StoreConfig, StoreId};

    fn session() -> EditSession {
        let config: StoreConfig = serde_json::from_value(json!({
            "div": [{"value": "d1", "viewValue": "Division 1"}],
            "flags": [
                {"flagName": "isWfcFlagEnabled", "flagViewName": "WFC", "flagLevel": "root", "flagValue": false},
                {"flagName": "isInterFlagEnabled", "flagViewName": "Inter", "flagLevel": "root", "flagValue": false}
            ],
            "textField": [
                {"textName": "displayDays", "textViewName": "Display days", "textLevel": "root", "textType": "number"}
            ]
        }))
        .expect("config");
        EditSession::load(config)
    }

    fn plan(value: serde_json::Value) -> EditPlan {
        serde_json::from_value(value).expect("plan")
    }

    #[test]
    fn plan_replays_scope_flags_and_values() {
        let mut session = session();
        let errors = plan(json!({
            "ids": ["12", 13],
            "flags": {"isWfcFlagEnabled": true},
            "special": {"isWfcFlagEnabled": {"wfcId": "99"}},
            "text": {"displayDays": 4}
        }))
        .apply(&mut session)
        .expect("apply");
        assert!(errors.is_empty());
        assert_eq!(session.selection().ids(), &[StoreId::new(12), StoreId::new(13)]);
        assert_eq!(session.text_value("displayDays"), Some("4"));
        assert!(session.form_state().can_submit);
    }

    #[test]
    fn special_values_for_an_off_flag_are_skipped() {
        let mut session = session();
        plan(json!({"special": {"isInterFlagEnabled": {"hours": 3}}}))
            .apply(&mut session)
            .expect("apply");
        assert!(session.special_payload(SpecialFlag::Inter).is_none());
    }

    #[test]
    fn plan_with_both_scopes_is_rejected() {
        let both = plan(json!({"division": "d1", "ids": ["1"]}));
        assert!(both.validate().is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_value::<EditPlan>(json!({"flag": {}})).is_err());
    }
}
