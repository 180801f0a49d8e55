// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ValidationError;

pub const DEFAULT_TPL_SEQ_ID: &str = "1";
pub const DEFAULT_TPL_VENTOR: &str = "Door";

/// Flags whose "on" state needs a structured payload before submission.
///
/// This enum is the only list of special flags in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpecialFlag {
    Gf2ag,
    ThirdParty,
    Wfc,
    OAmanda,
    PipSp,
    Inter,
}

impl SpecialFlag {
    pub const ALL: [Self; 6] = [
        Self::Gf2ag,
        Self::ThirdParty,
        Self::Wfc,
        Self::OAmanda,
        Self::PipSp,
        Self::Inter,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gf2ag => "isGF2agEnabled",
            Self::ThirdParty => "is3PFlagEnabled",
            Self::Wfc => "isWfcFlagEnabled",
            Self::OAmanda => "isOAmandaFlagEnabled",
            Self::PipSp => "isPipSpFlagEnabled",
            Self::Inter => "isInterFlagEnabled",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == name)
    }
}

impl Display for SpecialFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecialFlag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationError(format!("unknown special flag `{s}`")))
    }
}

impl TryFrom<String> for SpecialFlag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpecialFlag> for String {
    fn from(value: SpecialFlag) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum EditLevel {
    OP_0,
    OP_0_5,
    OP_1,
    OP_2,
    OP_3,
    OP_4,
    OP_5,
    OP_6,
}

impl EditLevel {
    pub const ALL: [Self; 8] = [
        Self::OP_0,
        Self::OP_0_5,
        Self::OP_1,
        Self::OP_2,
        Self::OP_3,
        Self::OP_4,
        Self::OP_5,
        Self::OP_6,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OP_0 => "OP_0",
            Self::OP_0_5 => "OP_0_5",
            Self::OP_1 => "OP_1",
            Self::OP_2 => "OP_2",
            Self::OP_3 => "OP_3",
            Self::OP_4 => "OP_4",
            Self::OP_5 => "OP_5",
            Self::OP_6 => "OP_6",
        }
    }
}

impl FromStr for EditLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| ValidationError(format!("unknown edit level `{s}`")))
    }
}

/// A form value that may arrive as text or as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScalarRepr", into = "String")]
pub struct RawScalar(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<ScalarRepr> for RawScalar {
    fn from(value: ScalarRepr) -> Self {
        match value {
            ScalarRepr::Text(s) => Self(s),
            ScalarRepr::Int(n) => Self(n.to_string()),
            ScalarRepr::Float(n) => Self(n.to_string()),
        }
    }
}

impl From<RawScalar> for String {
    fn from(value: RawScalar) -> Self {
        value.0
    }
}

impl RawScalar {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        self.0.trim()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().is_empty()
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        self.as_text().parse::<i64>().ok()
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        self.as_text().parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Values captured by a special flag's configuration form, before formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSpecialValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventor: Option<String>,
    #[serde(rename = "tplP", deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub tpl_p: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wfc_id: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highrisk: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowrisk: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perc: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<RawScalar>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
        OneOrMany::Null(()) => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TplEntry {
    pub seq_id: String,
    pub ventor: String,
}

impl Default for TplEntry {
    fn default() -> Self {
        Self {
            seq_id: DEFAULT_TPL_SEQ_ID.to_string(),
            ventor: DEFAULT_TPL_VENTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowConfig {
    pub risk: Option<i64>,
    pub highrisk: Option<i64>,
    pub lowrisk: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntraConfig {
    pub hours: Option<i64>,
    pub perc: Option<i64>,
    pub items: Option<i64>,
}

/// Formatted payload of one special flag. Serializes to the top-level
/// fragment merged into the update payload, e.g. `{"wfcId": "123"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialPayload {
    Gf2ag { tpl: Vec<TplEntry> },
    ThirdParty { tpl_p: Vec<String> },
    Wfc { wfc_id: Option<String> },
    OAmanda { edit_level: Option<EditLevel> },
    PipSp { slow: Option<SlowConfig> },
    Inter { intra_config: Option<IntraConfig> },
}

impl SpecialPayload {
    #[must_use]
    pub const fn flag(&self) -> SpecialFlag {
        match self {
            Self::Gf2ag { .. } => SpecialFlag::Gf2ag,
            Self::ThirdParty { .. } => SpecialFlag::ThirdParty,
            Self::Wfc { .. } => SpecialFlag::Wfc,
            Self::OAmanda { .. } => SpecialFlag::OAmanda,
            Self::PipSp { .. } => SpecialFlag::PipSp,
            Self::Inter { .. } => SpecialFlag::Inter,
        }
    }

    #[must_use]
    pub fn fragment(&self) -> Map<String, Value> {
        let value = match self {
            Self::Gf2ag { tpl } => json!({ "tpl": tpl }),
            Self::ThirdParty { tpl_p } => json!({ "tplP": tpl_p }),
            Self::Wfc { wfc_id } => json!({ "wfcId": wfc_id }),
            Self::OAmanda { edit_level } => json!({ "editLevel": edit_level }),
            Self::PipSp { slow } => json!({ "slow": slow }),
            Self::Inter { intra_config } => json!({ "intraConfig": intra_config }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl Serialize for SpecialPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fragment().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_flag_names_round_trip() {
        for flag in SpecialFlag::ALL {
            assert_eq!(SpecialFlag::from_name(flag.as_str()), Some(flag));
        }
        assert_eq!(SpecialFlag::from_name("doesNotExist"), None);
    }

    #[test]
    fn raw_values_accept_numbers_and_text() {
        let raw: RawSpecialValues = serde_json::from_value(json!({
            "risk": 3,
            "highrisk": "80",
            "lowrisk": " 20 ",
            "wfcId": 12345678,
            "tplP": "carrier-a"
        }))
        .expect("raw");
        assert_eq!(raw.risk.as_ref().and_then(RawScalar::as_integer), Some(3));
        assert_eq!(raw.highrisk.as_ref().and_then(RawScalar::as_integer), Some(80));
        assert_eq!(raw.lowrisk.as_ref().and_then(RawScalar::as_integer), Some(20));
        assert_eq!(raw.wfc_id.as_ref().map(RawScalar::as_text), Some("12345678"));
        assert_eq!(raw.tpl_p, vec!["carrier-a".to_string()]);
    }

    #[test]
    fn payload_fragments_use_wire_names() {
        let wfc = SpecialPayload::Wfc { wfc_id: None };
        assert_eq!(Value::Object(wfc.fragment()), json!({"wfcId": null}));

        let gf = SpecialPayload::Gf2ag {
            tpl: vec![TplEntry::default()],
        };
        assert_eq!(
            Value::Object(gf.fragment()),
            json!({"tpl": [{"seqId": "1", "ventor": "Door"}]})
        );

        let level = SpecialPayload::OAmanda {
            edit_level: Some(EditLevel::OP_0_5),
        };
        assert_eq!(Value::Object(level.fragment()), json!({"editLevel": "OP_0_5"}));
    }
}
