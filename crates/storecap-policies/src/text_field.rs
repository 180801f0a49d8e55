// SPDX-License-Identifier: Apache-2.0

use crate::field::FieldError;

/// Bounds for one numeric text field. Unset bounds are not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFieldRule {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub required: bool,
}

impl TextFieldRule {
    #[must_use]
    pub const fn range(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            required: false,
        }
    }
}

const TEXT_FIELD_RULES: &[(&str, TextFieldRule)] = &[
    ("displayDays", TextFieldRule::range(1, 15)),
    ("largeCap", TextFieldRule::range(0, 100)),
    ("largeThreshold", TextFieldRule::range(1, 999)),
];

/// Rule for a configured text field; fields without an entry only need to be numeric.
#[must_use]
pub fn text_field_rule(text_name: &str) -> TextFieldRule {
    TEXT_FIELD_RULES
        .iter()
        .find(|(name, _)| *name == text_name)
        .map(|(_, rule)| *rule)
        .unwrap_or_default()
}

#[must_use]
pub fn validate_with_rule(
    rule: TextFieldRule,
    text_name: &str,
    text_view_name: &str,
    raw: &str,
) -> Option<FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return rule
            .required
            .then(|| FieldError::new(text_name, format!("{text_view_name} is required")));
    }
    let Some(value) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        return Some(FieldError::new(text_name, "Must be a number"));
    };
    if let Some(min) = rule.min {
        if value < min as f64 {
            return Some(FieldError::new(text_name, format!("Must be >= {min}")));
        }
    }
    if let Some(max) = rule.max {
        if value > max as f64 {
            return Some(FieldError::new(text_name, format!("Must be <= {max}")));
        }
    }
    None
}

#[must_use]
pub fn validate_text_value(text_name: &str, text_view_name: &str, raw: &str) -> Option<FieldError> {
    validate_with_rule(text_field_rule(text_name), text_name, text_view_name, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_days_range() {
        assert!(validate_text_value("displayDays", "Display days", "").is_none());
        assert!(validate_text_value("displayDays", "Display days", "15").is_none());
        let low = validate_text_value("displayDays", "Display days", "0").expect("below min");
        assert_eq!(low.message, "Must be >= 1");
        let high = validate_text_value("displayDays", "Display days", "16").expect("above max");
        assert_eq!(high.message, "Must be <= 15");
    }

    #[test]
    fn non_numeric_is_rejected_even_without_bounds() {
        let err = validate_text_value("freeText", "Free", "abc").expect("not numeric");
        assert_eq!(err, FieldError::new("freeText", "Must be a number"));
        assert!(validate_text_value("freeText", "Free", "12.5").is_none());
    }

    #[test]
    fn required_fields_reject_empty() {
        let rule = TextFieldRule {
            required: true,
            ..TextFieldRule::range(0, 100)
        };
        let err = validate_with_rule(rule, "largeCap", "Large cap", " ").expect("required");
        assert_eq!(err.message, "Large cap is required");
    }
}
