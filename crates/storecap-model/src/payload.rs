// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::{FlagDescriptor, FlagLevel, FlagValue, TextFieldDescriptor};

/// Body of `POST /api/storePayload.json`.
///
/// Special flag fragments (`tpl`, `tplP`, `wfcId`, `editLevel`, `slow`,
/// `intraConfig`) are merged into the top-level object through `special`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub select_all: bool,
    #[serde(default)]
    pub div_code: Option<String>,
    #[serde(default)]
    pub div_name: Option<String>,
    #[serde(default)]
    pub id_list: Vec<String>,
    #[serde(default)]
    pub flags: Vec<ChangedFlag>,
    #[serde(default)]
    pub text_field: Vec<TextFieldValue>,
    #[serde(flatten)]
    pub special: Map<String, Value>,
}

/// A flag whose current value differs from the last confirmed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedFlag {
    pub flag_name: String,
    pub flag_view_name: String,
    pub flag_level: FlagLevel,
    pub flag_value: FlagValue,
}

impl ChangedFlag {
    #[must_use]
    pub fn from_descriptor(descriptor: &FlagDescriptor, value: FlagValue) -> Self {
        Self {
            flag_name: descriptor.flag_name.clone(),
            flag_view_name: descriptor.flag_view_name.clone(),
            flag_level: descriptor.flag_level.clone(),
            flag_value: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldValue {
    pub text_name: String,
    pub text_view_name: String,
    pub text_level: String,
    pub text_type: String,
    pub text_value: String,
}

impl TextFieldValue {
    #[must_use]
    pub fn from_descriptor(descriptor: &TextFieldDescriptor, value: impl Into<String>) -> Self {
        Self {
            text_name: descriptor.text_name.clone(),
            text_view_name: descriptor.text_view_name.clone(),
            text_level: descriptor.text_level.clone(),
            text_type: descriptor.text_type.clone(),
            text_value: value.into(),
        }
    }
}
