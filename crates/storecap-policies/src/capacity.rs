// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use storecap_model::{
    CapacitySettings, CapacitySplit, DayCapacity, PoolInput, ValidationError, Weekday,
};

use crate::field::FieldError;

pub const POOL_TOTAL: i64 = 100;

/// Derived first pool and whether it landed inside `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReconciliation {
    pub cap_pool1: i64,
    pub is_valid: bool,
}

/// Derives `capPool1` from the two editable pools. The result is never
/// clamped, so an over-allocated split shows up as a negative first pool.
#[must_use]
pub const fn reconcile(cap_pool2: i64, cap_pool3: i64) -> CapacityReconciliation {
    let cap_pool1 = POOL_TOTAL.saturating_sub(cap_pool2.saturating_add(cap_pool3));
    CapacityReconciliation {
        cap_pool1,
        is_valid: cap_pool1 >= 0 && cap_pool1 <= POOL_TOTAL,
    }
}

#[must_use]
pub const fn reconcile_split(cap_pool2: i64, cap_pool3: i64) -> CapacitySplit {
    CapacitySplit {
        cap_pool1: reconcile(cap_pool2, cap_pool3).cap_pool1,
        cap_pool2,
        cap_pool3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CapacityField {
    CapPool1,
    CapPool2,
    CapPool3,
    Dumm,
}

impl CapacityField {
    pub const ALL: [Self; 4] = [Self::CapPool1, Self::CapPool2, Self::CapPool3, Self::Dumm];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapPool1 => "capPool1",
            Self::CapPool2 => "capPool2",
            Self::CapPool3 => "capPool3",
            Self::Dumm => "dumm",
        }
    }

    const fn read(self, day: &DayCapacity) -> PoolInput {
        match self {
            Self::CapPool1 => day.cap_pool1,
            Self::CapPool2 => day.cap_pool2,
            Self::CapPool3 => day.cap_pool3,
            Self::Dumm => day.dumm,
        }
    }

    fn write(self, day: &mut DayCapacity, value: PoolInput) {
        match self {
            Self::CapPool1 => day.cap_pool1 = value,
            Self::CapPool2 => day.cap_pool2 = value,
            Self::CapPool3 => day.cap_pool3 = value,
            Self::Dumm => day.dumm = value,
        }
    }
}

impl Display for CapacityField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapacityField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| ValidationError(format!("unknown capacity field `{s}`")))
    }
}

/// Applies one keystroke-level edit to a day entry.
///
/// An empty input blanks the field. Input that is not a whole number leaves
/// the entry untouched. Edits to `capPool2` and `capPool3` are clamped into
/// `[0, 100]` and re-derive `capPool1`.
#[must_use]
pub fn apply_pool_input(day: DayCapacity, field: CapacityField, raw: &str) -> DayCapacity {
    let mut next = day;
    let raw = raw.trim();
    if raw.is_empty() {
        field.write(&mut next, PoolInput::Blank);
        return next;
    }
    let Ok(parsed) = raw.parse::<i64>() else {
        return day;
    };
    match field {
        CapacityField::CapPool2 | CapacityField::CapPool3 => {
            field.write(&mut next, PoolInput::Value(parsed.clamp(0, POOL_TOTAL)));
            let derived = reconcile(next.cap_pool2.or_zero(), next.cap_pool3.or_zero());
            next.cap_pool1 = PoolInput::Value(derived.cap_pool1);
        }
        CapacityField::CapPool1 | CapacityField::Dumm => {
            field.write(&mut next, PoolInput::Value(parsed));
        }
    }
    next
}

/// Errors that keep the capacity settings dialog from being applied.
/// An empty vector means the entry is valid.
#[must_use]
pub fn validate_capacity_settings(days: &[Weekday], day: &DayCapacity) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if days.is_empty() {
        errors.push(FieldError::new("days", "select at least one day"));
    }

    for field in CapacityField::ALL {
        match field.read(day) {
            PoolInput::Blank => {
                errors.push(FieldError::new(field.as_str(), format!("{field} is required")));
            }
            PoolInput::Value(v) if !(0..=POOL_TOTAL).contains(&v) => {
                errors.push(FieldError::new(
                    field.as_str(),
                    format!("{field} must be between 0-{POOL_TOTAL}, got {v}"),
                ));
            }
            PoolInput::Value(_) => {}
        }
    }

    if let (Some(c1), Some(c2), Some(c3)) = (
        day.cap_pool1.value(),
        day.cap_pool2.value(),
        day.cap_pool3.value(),
    ) {
        let total = c1.saturating_add(c2).saturating_add(c3);
        if total != POOL_TOTAL {
            errors.push(FieldError::new(
                "total",
                format!("capacity pools must add up to {POOL_TOTAL}, got {total}"),
            ));
        }
    }
    errors
}

/// Maps every selected day to a copy of the entered capacity.
pub fn build_capacity_settings(
    days: &[Weekday],
    day: &DayCapacity,
) -> Result<CapacitySettings, Vec<FieldError>> {
    let errors = validate_capacity_settings(days, day);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(days.iter().map(|weekday| (*weekday, *day)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_keeps_negative_first_pool() {
        assert_eq!(
            reconcile(30, 20),
            CapacityReconciliation {
                cap_pool1: 50,
                is_valid: true
            }
        );
        assert_eq!(
            reconcile(80, 40),
            CapacityReconciliation {
                cap_pool1: -20,
                is_valid: false
            }
        );
        assert_eq!(reconcile(0, 0).cap_pool1, 100);
        assert!(reconcile(0, 0).is_valid);
        assert_eq!(reconcile(-10, 0).cap_pool1, 110);
        assert!(!reconcile(-10, 0).is_valid);
    }

    #[test]
    fn pool_input_clamps_editable_pools_and_rederives_first() {
        let day = apply_pool_input(DayCapacity::default(), CapacityField::CapPool2, "150");
        assert_eq!(day.cap_pool2, PoolInput::Value(100));
        assert_eq!(day.cap_pool1, PoolInput::Value(0));

        let day = apply_pool_input(day, CapacityField::CapPool3, "30");
        assert_eq!(day.cap_pool3, PoolInput::Value(30));
        assert_eq!(day.cap_pool1, PoolInput::Value(-30));

        let day = apply_pool_input(day, CapacityField::CapPool2, "-5");
        assert_eq!(day.cap_pool2, PoolInput::Value(0));
        assert_eq!(day.cap_pool1, PoolInput::Value(70));
    }

    #[test]
    fn blank_and_garbage_input() {
        let base = DayCapacity::default();
        let blanked = apply_pool_input(base, CapacityField::CapPool2, "");
        assert_eq!(blanked.cap_pool2, PoolInput::Blank);
        assert_eq!(blanked.cap_pool1, PoolInput::Value(100));

        let ignored = apply_pool_input(base, CapacityField::CapPool3, "1x");
        assert_eq!(ignored, base);
    }

    #[test]
    fn settings_need_days_and_a_full_split() {
        let day = DayCapacity::default();
        assert!(validate_capacity_settings(&[Weekday::Monday], &day).is_empty());

        let errors = validate_capacity_settings(&[], &day);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "days");

        let short = DayCapacity {
            cap_pool1: PoolInput::Value(50),
            ..DayCapacity::default()
        };
        let errors = validate_capacity_settings(&[Weekday::Friday], &short);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "total");

        let blank = apply_pool_input(day, CapacityField::CapPool3, "");
        let errors = validate_capacity_settings(&[Weekday::Friday], &blank);
        assert!(errors.iter().any(|e| e.field == "capPool3"));
    }

    #[test]
    fn over_allocated_split_fails_on_the_negative_pool() {
        let day = apply_pool_input(DayCapacity::default(), CapacityField::CapPool2, "70");
        let day = apply_pool_input(day, CapacityField::CapPool3, "50");
        let errors = validate_capacity_settings(&[Weekday::Monday], &day);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "capPool1");
    }

    #[test]
    fn settings_copy_the_entry_to_each_day() {
        let day = apply_pool_input(DayCapacity::default(), CapacityField::CapPool2, "25");
        let settings =
            build_capacity_settings(&[Weekday::Sunday, Weekday::Monday], &day).expect("settings");
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.keys().next(), Some(&Weekday::Monday));
        assert!(settings.values().all(|d| *d == day));
    }
}
