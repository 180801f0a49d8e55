// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ValidationError;

/// Three-way percentage split. `cap_pool1` is derived and may be negative
/// while the operator is still typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySplit {
    pub cap_pool1: i64,
    pub cap_pool2: i64,
    pub cap_pool3: i64,
}

impl CapacitySplit {
    #[must_use]
    pub const fn total(self) -> i64 {
        self.cap_pool1 + self.cap_pool2 + self.cap_pool3
    }
}

/// Entered value of an editable pool. A cleared input stays blank instead of
/// collapsing to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum PoolInput {
    #[default]
    Blank,
    Value(i64),
}

impl PoolInput {
    #[must_use]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Blank => None,
            Self::Value(v) => Some(v),
        }
    }

    #[must_use]
    pub const fn or_zero(self) -> i64 {
        match self {
            Self::Blank => 0,
            Self::Value(v) => v,
        }
    }
}

impl From<Option<i64>> for PoolInput {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Blank, Self::Value)
    }
}

impl From<PoolInput> for Option<i64> {
    fn from(value: PoolInput) -> Self {
        value.value()
    }
}

impl From<i64> for PoolInput {
    fn from(value: i64) -> Self {
        Self::Value(value)
    }
}

/// Per-day capacity entry of the capacity settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCapacity {
    pub cap_pool1: PoolInput,
    pub cap_pool2: PoolInput,
    pub cap_pool3: PoolInput,
    pub dumm: PoolInput,
}

impl Default for DayCapacity {
    fn default() -> Self {
        Self {
            cap_pool1: PoolInput::Value(100),
            cap_pool2: PoolInput::Value(0),
            cap_pool3: PoolInput::Value(0),
            dumm: PoolInput::Value(20),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| ValidationError(format!("unknown weekday `{s}`")))
    }
}

/// Selected days mapped to the capacity entered for them.
pub type CapacitySettings = BTreeMap<Weekday, DayCapacity>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_day_capacity_matches_dialog_defaults() {
        let day = DayCapacity::default();
        assert_eq!(day.cap_pool1, PoolInput::Value(100));
        assert_eq!(day.cap_pool2, PoolInput::Value(0));
        assert_eq!(day.cap_pool3, PoolInput::Value(0));
        assert_eq!(day.dumm, PoolInput::Value(20));
    }

    #[test]
    fn blank_pool_serializes_as_null() {
        let day = DayCapacity {
            cap_pool2: PoolInput::Blank,
            ..DayCapacity::default()
        };
        let json = serde_json::to_value(day).expect("encode");
        assert_eq!(
            json,
            serde_json::json!({"capPool1": 100, "capPool2": null, "capPool3": 0, "dumm": 20})
        );
    }

    #[test]
    fn weekdays_parse_case_insensitively_and_sort_monday_first() {
        assert_eq!("Friday".parse::<Weekday>().expect("friday"), Weekday::Friday);
        assert!("funday".parse::<Weekday>().is_err());
        let mut days = vec![Weekday::Sunday, Weekday::Monday, Weekday::Wednesday];
        days.sort();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday, Weekday::Sunday]);
    }
}
