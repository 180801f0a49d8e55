// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ValidationError;

/// Document served by `GET /api/storeGet.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    #[serde(default)]
    pub div: Vec<Division>,
    #[serde(default)]
    pub flags: Vec<FlagDescriptor>,
    #[serde(default)]
    pub text_field: Vec<TextFieldDescriptor>,
}

impl StoreConfig {
    #[must_use]
    pub fn division(&self, value: &str) -> Option<&Division> {
        self.div.iter().find(|d| d.value == value)
    }

    #[must_use]
    pub fn flag(&self, flag_name: &str) -> Option<&FlagDescriptor> {
        self.flags.iter().find(|f| f.flag_name == flag_name)
    }

    #[must_use]
    pub fn text_field(&self, text_name: &str) -> Option<&TextFieldDescriptor> {
        self.text_field.iter().find(|t| t.text_name == text_name)
    }

    /// Flags of one level whose view name contains `search`, case-insensitively.
    /// An empty search keeps every flag of the level.
    #[must_use]
    pub fn flags_at_level(&self, level: &FlagLevel, search: &str) -> Vec<&FlagDescriptor> {
        let needle = search.trim().to_lowercase();
        self.flags
            .iter()
            .filter(|f| &f.flag_level == level)
            .filter(|f| needle.is_empty() || f.flag_view_name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub value: String,
    pub view_value: String,
}

impl Division {
    #[must_use]
    pub fn new(value: impl Into<String>, view_value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            view_value: view_value.into(),
        }
    }
}

/// Grouping level of a flag. Only used to split flags into lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagLevel {
    Root,
    SFeature,
    Other(String),
}

impl FlagLevel {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::SFeature => "sFeature",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FlagLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "root" => Self::Root,
            "sFeature" => Self::SFeature,
            _ => Self::Other(value),
        }
    }
}

impl From<FlagLevel> for String {
    fn from(value: FlagLevel) -> Self {
        value.as_str().to_string()
    }
}

impl Display for FlagLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state flag value. `null` on the wire is [`FlagValue::Unset`], which is
/// never equal to [`FlagValue::Off`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum FlagValue {
    On,
    Off,
    #[default]
    Unset,
}

impl FlagValue {
    #[must_use]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::On => Some(true),
            Self::Off => Some(false),
            Self::Unset => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unset => "none",
        }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<Option<bool>> for FlagValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::On,
            Some(false) => Self::Off,
            None => Self::Unset,
        }
    }
}

impl From<FlagValue> for Option<bool> {
    fn from(value: FlagValue) -> Self {
        value.as_option()
    }
}

impl FromStr for FlagValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" => Ok(Self::On),
            "off" | "false" => Ok(Self::Off),
            "none" | "unset" | "null" | "" => Ok(Self::Unset),
            other => Err(ValidationError(format!(
                "flag value must be one of on/off/none, got `{other}`"
            ))),
        }
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagDescriptor {
    pub flag_name: String,
    pub flag_view_name: String,
    pub flag_level: FlagLevel,
    #[serde(default)]
    pub flag_value: FlagValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldDescriptor {
    pub text_name: String,
    pub text_view_name: String,
    pub text_level: String,
    pub text_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_value_null_is_unset_not_off() {
        let unset: FlagValue = serde_json::from_str("null").expect("null");
        let off: FlagValue = serde_json::from_str("false").expect("false");
        assert_eq!(unset, FlagValue::Unset);
        assert_eq!(off, FlagValue::Off);
        assert_ne!(unset, off);
        assert_eq!(serde_json::to_string(&FlagValue::Unset).expect("encode"), "null");
    }

    #[test]
    fn flag_level_keeps_unknown_levels_verbatim() {
        let level = FlagLevel::from("region".to_string());
        assert_eq!(level, FlagLevel::Other("region".to_string()));
        assert_eq!(String::from(level), "region");
        assert_eq!(FlagLevel::from("sFeature".to_string()), FlagLevel::SFeature);
    }

    #[test]
    fn flag_value_parses_select_labels() {
        assert_eq!("on".parse::<FlagValue>().expect("on"), FlagValue::On);
        assert_eq!("OFF".parse::<FlagValue>().expect("off"), FlagValue::Off);
        assert_eq!("none".parse::<FlagValue>().expect("none"), FlagValue::Unset);
        assert!("maybe".parse::<FlagValue>().is_err());
    }
}
