// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};
use storecap_model::{
    EditLevel, IntraConfig, RawScalar, RawSpecialValues, SlowConfig, SpecialFlag, SpecialPayload,
    TplEntry, DEFAULT_TPL_SEQ_ID, DEFAULT_TPL_VENTOR,
};

use crate::field::FieldError;

pub const WFC_ID_MAX_DIGITS: usize = 8;

fn present(value: Option<&RawScalar>) -> Option<&RawScalar> {
    value.filter(|v| !v.is_blank())
}

fn present_str(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn integer(value: Option<&RawScalar>) -> Option<i64> {
    present(value).and_then(RawScalar::as_integer)
}

fn non_zero_integer(value: Option<&RawScalar>) -> Option<i64> {
    integer(value).filter(|v| *v != 0)
}

/// Turns raw form values into the payload shape the API expects for `flag`.
///
/// Formatting never fails; missing or unusable values become `null` (or the
/// template defaults for GF2ag) and are reported by [`completeness_errors`].
#[must_use]
pub fn format(flag: SpecialFlag, raw: &RawSpecialValues) -> SpecialPayload {
    match flag {
        SpecialFlag::Gf2ag => SpecialPayload::Gf2ag {
            tpl: vec![TplEntry {
                seq_id: present_str(raw.seq_id.as_ref())
                    .unwrap_or(DEFAULT_TPL_SEQ_ID)
                    .to_string(),
                ventor: present_str(raw.ventor.as_ref())
                    .unwrap_or(DEFAULT_TPL_VENTOR)
                    .to_string(),
            }],
        },
        SpecialFlag::ThirdParty => SpecialPayload::ThirdParty {
            tpl_p: raw
                .tpl_p
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        },
        SpecialFlag::Wfc => SpecialPayload::Wfc {
            wfc_id: present(raw.wfc_id.as_ref()).map(|v| v.as_text().to_string()),
        },
        SpecialFlag::OAmanda => SpecialPayload::OAmanda {
            edit_level: present_str(raw.edit_level.as_ref()).and_then(|v| v.parse().ok()),
        },
        SpecialFlag::PipSp => SpecialPayload::PipSp {
            slow: present(raw.risk.as_ref()).map(|_| SlowConfig {
                risk: integer(raw.risk.as_ref()),
                highrisk: integer(raw.highrisk.as_ref()),
                lowrisk: integer(raw.lowrisk.as_ref()),
            }),
        },
        SpecialFlag::Inter => SpecialPayload::Inter {
            intra_config: raw.hours.as_ref().map(|_| IntraConfig {
                hours: non_zero_integer(raw.hours.as_ref()),
                perc: non_zero_integer(raw.perc.as_ref()),
                items: non_zero_integer(raw.items.as_ref()),
            }),
        },
    }
}

/// Name-keyed entry point. Unknown flag names format to an empty object, and
/// raw values that do not decode are treated as an empty form.
#[must_use]
pub fn format_by_name(flag_name: &str, raw: &Value) -> Value {
    let Some(flag) = SpecialFlag::from_name(flag_name) else {
        return Value::Object(Map::new());
    };
    let values = serde_json::from_value::<RawSpecialValues>(raw.clone()).unwrap_or_default();
    Value::Object(format(flag, &values).fragment())
}

fn check_range(
    out: &mut Vec<FieldError>,
    field: &str,
    label: &str,
    value: Option<i64>,
    min: i64,
    max: i64,
) {
    match value {
        None => out.push(FieldError::new(field, format!("{label} is required"))),
        Some(v) if v < min || v > max => {
            out.push(FieldError::new(field, format!("{label} must be between {min}-{max}")));
        }
        Some(_) => {}
    }
}

fn is_wfc_id(value: &str) -> bool {
    (1..=WFC_ID_MAX_DIGITS).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Rules a formatted payload must satisfy before its flag may be submitted ON.
#[must_use]
pub fn completeness_errors(payload: &SpecialPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();
    match payload {
        SpecialPayload::Gf2ag { tpl } => {
            if tpl.is_empty() {
                errors.push(FieldError::new("tpl", "at least one template entry is required"));
            }
        }
        SpecialPayload::ThirdParty { tpl_p } => {
            if tpl_p.is_empty() {
                errors.push(FieldError::new("tplP", "select at least one third-party value"));
            }
        }
        SpecialPayload::Wfc { wfc_id } => match wfc_id.as_deref() {
            None => errors.push(FieldError::new("wfcId", "wfcId is required")),
            Some(id) if !is_wfc_id(id) => {
                errors.push(FieldError::new("wfcId", "Must be 1-8 digits"));
            }
            Some(_) => {}
        },
        SpecialPayload::OAmanda { edit_level } => {
            if edit_level.is_none() {
                errors.push(FieldError::new("editLevel", "editLevel is required"));
            }
        }
        SpecialPayload::PipSp { slow } => {
            let Some(slow) = slow else {
                errors.push(FieldError::new("risk", "Risk is required"));
                return errors;
            };
            check_range(&mut errors, "risk", "Risk", slow.risk, 1, 10);
            check_range(&mut errors, "highrisk", "Risk level", slow.highrisk, 1, 100);
            check_range(&mut errors, "lowrisk", "Risk level", slow.lowrisk, 1, 100);
            if let (Some(high), Some(low)) = (slow.highrisk, slow.lowrisk) {
                if high <= low {
                    errors.push(FieldError::new(
                        "highrisk",
                        "High risk must be greater than low risk",
                    ));
                    errors.push(FieldError::new("lowrisk", "Low risk must be less than high risk"));
                }
            }
        }
        SpecialPayload::Inter { intra_config } => {
            let Some(intra) = intra_config else {
                errors.push(FieldError::new("hours", "Please enter a value"));
                return errors;
            };
            match intra.hours {
                None => errors.push(FieldError::new("hours", "Please enter a value")),
                Some(h) if !(1..=12).contains(&h) => {
                    errors.push(FieldError::new("hours", "Please enter value 1 to 12"));
                }
                Some(_) => {}
            }
            match intra.perc {
                None => errors.push(FieldError::new("perc", "Please enter a value")),
                Some(p) if !(1..=100).contains(&p) => {
                    errors.push(FieldError::new("perc", "Please enter value 1 to 100"));
                }
                Some(_) => {}
            }
            match intra.items {
                None => errors.push(FieldError::new("items", "Please enter a value")),
                Some(i) if i <= 0 => {
                    errors.push(FieldError::new("items", "Must be greater than zero"));
                }
                Some(_) => {}
            }
        }
    }
    errors
}

#[must_use]
pub fn is_complete(payload: &SpecialPayload) -> bool {
    completeness_errors(payload).is_empty()
}

fn numeric_inputs(flag: SpecialFlag, raw: &RawSpecialValues) -> Vec<(&'static str, &'static str, Option<&RawScalar>)> {
    match flag {
        SpecialFlag::PipSp => vec![
            ("risk", "Risk", raw.risk.as_ref()),
            ("highrisk", "Risk level", raw.highrisk.as_ref()),
            ("lowrisk", "Risk level", raw.lowrisk.as_ref()),
        ],
        SpecialFlag::Inter => vec![
            ("hours", "Hours", raw.hours.as_ref()),
            ("perc", "Perc", raw.perc.as_ref()),
            ("items", "Items", raw.items.as_ref()),
        ],
        SpecialFlag::Gf2ag | SpecialFlag::ThirdParty | SpecialFlag::Wfc | SpecialFlag::OAmanda => {
            Vec::new()
        }
    }
}

/// Field-level errors for a configuration form, one entry per failing field.
///
/// Input problems that formatting would hide (a non-numeric risk, an unknown
/// edit level) are reported first; completeness rules fill in the rest.
#[must_use]
pub fn validate_raw_fields(flag: SpecialFlag, raw: &RawSpecialValues) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = numeric_inputs(flag, raw)
        .into_iter()
        .filter_map(|(field, label, value)| {
            let value = present(value)?;
            value
                .as_integer()
                .is_none()
                .then(|| FieldError::new(field, format!("{label} must be a number")))
        })
        .collect();

    if flag == SpecialFlag::OAmanda {
        if let Some(level) = present_str(raw.edit_level.as_ref()) {
            if level.parse::<EditLevel>().is_err() {
                errors.push(FieldError::new(
                    "editLevel",
                    format!("unknown edit level `{level}`"),
                ));
            }
        }
    }

    for error in completeness_errors(&format(flag, raw)) {
        if !errors.iter().any(|e| e.field == error.field) {
            errors.push(error);
        }
    }
    errors
}
