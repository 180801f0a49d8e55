// SPDX-License-Identifier: Apache-2.0

use serde_json::Map;
use std::collections::BTreeMap;

use storecap_model::{
    parse_store_id, ChangedFlag, Division, FlagDescriptor, FlagLevel, FlagValue, RawSpecialValues,
    Selection, SpecialFlag, SpecialPayload, StoreConfig, StoreId, TextFieldValue, UpdatePayload,
};
use storecap_policies::{
    completeness_errors, format, validate_raw_fields, validate_text_value, FieldError,
};

use crate::error::SessionError;
use crate::form::{FormErrors, FormState};
use crate::reconcile::{changed_flags, has_changes, FlagState};

/// A configured flag together with its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRow<'a> {
    pub descriptor: &'a FlagDescriptor,
    pub value: FlagValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    config: StoreConfig,
    initial: FlagState,
    current: FlagState,
    selection: Selection,
    special: BTreeMap<SpecialFlag, SpecialPayload>,
    text_values: BTreeMap<String, String>,
}

impl EditSession {
    /// Seeds both snapshots from each flag's `flagValue`.
    #[must_use]
    pub fn load(config: StoreConfig) -> Self {
        let initial: FlagState = config
            .flags
            .iter()
            .map(|f| (f.flag_name.clone(), f.flag_value))
            .collect();
        Self {
            current: initial.clone(),
            initial,
            config,
            selection: Selection::None,
            special: BTreeMap::new(),
            text_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn initial(&self) -> &FlagState {
        &self.initial
    }

    #[must_use]
    pub fn current(&self) -> &FlagState {
        &self.current
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn flag_value(&self, name: &str) -> Option<FlagValue> {
        self.current.get(name).copied()
    }

    #[must_use]
    pub fn special_payload(&self, flag: SpecialFlag) -> Option<&SpecialPayload> {
        self.special.get(&flag)
    }

    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text_values.get(name).map(String::as_str)
    }

    /// Selects a configured division. Any entered ids are dropped.
    pub fn select_division(&mut self, value: &str) -> Result<(), SessionError> {
        let division: Division = self
            .config
            .division(value)
            .cloned()
            .ok_or_else(|| SessionError::UnknownDivision(value.to_string()))?;
        self.selection = Selection::Division(division);
        Ok(())
    }

    pub fn clear_division(&mut self) {
        if matches!(self.selection, Selection::Division(_)) {
            self.selection = Selection::None;
        }
    }

    /// Adds one id from the id input. Entering an id drops any selected division.
    pub fn enter_id(&mut self, raw: &str) -> Result<StoreId, SessionError> {
        let id =
            parse_store_id(raw).map_err(|_| SessionError::NotNumeric(raw.trim().to_string()))?;
        let mut ids = self.selection.ids().to_vec();
        if ids.contains(&id) {
            return Err(SessionError::Duplicate(id));
        }
        ids.push(id);
        self.selection = Selection::Ids(ids);
        Ok(id)
    }

    /// Returns whether the id was present.
    pub fn remove_id(&mut self, id: StoreId) -> bool {
        let Selection::Ids(ids) = &mut self.selection else {
            return false;
        };
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        let removed = ids.len() != before;
        if ids.is_empty() {
            self.selection = Selection::None;
        }
        removed
    }

    /// Leaving ON for a special flag discards its stored payload.
    pub fn set_flag(&mut self, name: &str, value: FlagValue) -> Result<(), SessionError> {
        let slot = self
            .current
            .get_mut(name)
            .ok_or_else(|| SessionError::UnknownFlag(name.to_string()))?;
        *slot = value;
        if !value.is_on() {
            if let Some(flag) = SpecialFlag::from_name(name) {
                self.special.remove(&flag);
            }
        }
        Ok(())
    }

    /// Formats and stores the payload for `flag`, returning field errors of
    /// the entered values. The payload is stored even when errors remain.
    /// Only a flag that is currently ON accepts values.
    pub fn apply_special_values(
        &mut self,
        flag: SpecialFlag,
        raw: &RawSpecialValues,
    ) -> Result<Vec<FieldError>, SessionError> {
        if self.flag_value(flag.as_str()) != Some(FlagValue::On) {
            return Err(SessionError::FlagNotOn(flag));
        }
        self.special.insert(flag, format(flag, raw));
        Ok(validate_raw_fields(flag, raw))
    }

    pub fn set_text_value(&mut self, name: &str, raw: &str) -> Result<(), SessionError> {
        if self.config.text_field(name).is_none() {
            return Err(SessionError::UnknownTextField(name.to_string()));
        }
        let raw = raw.trim();
        if raw.is_empty() {
            self.text_values.remove(name);
        } else {
            self.text_values.insert(name.to_string(), raw.to_string());
        }
        Ok(())
    }

    fn payload_for(&self, flag: SpecialFlag) -> SpecialPayload {
        self.special
            .get(&flag)
            .cloned()
            .unwrap_or_else(|| format(flag, &RawSpecialValues::default()))
    }

    fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for flag in SpecialFlag::ALL {
            if self.flag_value(flag.as_str()) != Some(FlagValue::On) {
                continue;
            }
            let flag_errors = completeness_errors(&self.payload_for(flag));
            if !flag_errors.is_empty() {
                errors.flag_errors.insert(flag.as_str().to_string(), flag_errors);
            }
        }
        for field in &self.config.text_field {
            let raw = self.text_value(&field.text_name).unwrap_or_default();
            if let Some(error) = validate_text_value(&field.text_name, &field.text_view_name, raw) {
                errors.text_errors.insert(field.text_name.clone(), error);
            }
        }
        errors
    }

    /// Derived form state, recomputed from the snapshots on every call.
    #[must_use]
    pub fn form_state(&self) -> FormState {
        let changed = changed_flags(&self.initial, &self.current);
        let pending = !self.special.is_empty() || !self.text_values.is_empty();
        let has_changes = has_changes(
            &self.initial,
            &self.current,
            self.selection.is_active(),
            pending,
        );
        let errors = self.errors();
        FormState {
            changed_flags: changed,
            can_submit: has_changes && errors.is_empty(),
            has_changes,
            errors,
        }
    }

    /// Builds a fresh payload from the current state. Refuses while any
    /// validation error is outstanding.
    pub fn build_update_payload(&self) -> Result<UpdatePayload, SessionError> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(SessionError::Invalid(errors));
        }

        let flags = self
            .config
            .flags
            .iter()
            .filter_map(|descriptor| {
                let now = self.current.get(&descriptor.flag_name)?;
                let before = self.initial.get(&descriptor.flag_name)?;
                (now != before).then(|| ChangedFlag::from_descriptor(descriptor, *now))
            })
            .collect();

        let text_field = self
            .config
            .text_field
            .iter()
            .map(|field| {
                TextFieldValue::from_descriptor(
                    field,
                    self.text_value(&field.text_name).unwrap_or_default(),
                )
            })
            .collect();

        let mut special = Map::new();
        for flag in SpecialFlag::ALL {
            special.extend(self.payload_for(flag).fragment());
        }

        let division = self.selection.division();
        Ok(UpdatePayload {
            select_all: false,
            div_code: division.map(|d| d.value.clone()),
            div_name: division.map(|d| d.view_value.clone()),
            id_list: self.selection.ids().iter().map(ToString::to_string).collect(),
            flags,
            text_field,
            special,
        })
    }

    /// Records a confirmed submission: the current flags become the new
    /// baseline. Selection, special payloads and text values are kept.
    pub fn commit_success(&mut self) {
        self.initial = self.current.clone();
    }

    #[must_use]
    pub fn flags_at_level(&self, level: &FlagLevel, search: &str) -> Vec<FlagRow<'_>> {
        self.config
            .flags_at_level(level, search)
            .into_iter()
            .map(|descriptor| FlagRow {
                descriptor,
                value: self.flag_value(&descriptor.flag_name).unwrap_or_default(),
            })
            .collect()
    }
}
