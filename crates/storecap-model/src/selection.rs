// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::store::Division;

/// Numeric store id typed into the id input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(u64);

impl StoreId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Reads the leading run of digits after trimming, so `"12abc"` is 12.
    /// Input without a leading digit is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(ValidationError(format!(
                "only numbers are allowed, got `{trimmed}`"
            )));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError(format!("store id `{digits}` is out of range")))
    }
}

pub fn parse_store_id(input: &str) -> Result<StoreId, ValidationError> {
    StoreId::parse(input)
}

impl Display for StoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Scope of an update: one division or an explicit id list, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Division(Division),
    Ids(Vec<StoreId>),
}

impl Selection {
    #[must_use]
    pub fn division(&self) -> Option<&Division> {
        match self {
            Self::Division(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[StoreId] {
        match self {
            Self::Ids(ids) => ids,
            _ => &[],
        }
    }

    /// True once a division is chosen or at least one id is entered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::None => false,
            Self::Division(_) => true,
            Self::Ids(ids) => !ids.is_empty(),
        }
    }
}
