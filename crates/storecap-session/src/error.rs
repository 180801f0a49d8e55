// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use storecap_model::{SpecialFlag, StoreId};

use crate::form::FormErrors;

/// Rejected session transition. The session state is unchanged whenever one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    UnknownDivision(String),
    UnknownFlag(String),
    UnknownTextField(String),
    NotNumeric(String),
    Duplicate(StoreId),
    FlagNotOn(SpecialFlag),
    Invalid(FormErrors),
}

impl SessionError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownDivision(_) => "unknown_division",
            Self::UnknownFlag(_) => "unknown_flag",
            Self::UnknownTextField(_) => "unknown_text_field",
            Self::NotNumeric(_) => "not_numeric",
            Self::Duplicate(_) => "duplicate_id",
            Self::FlagNotOn(_) => "flag_not_on",
            Self::Invalid(_) => "invalid_form",
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDivision(value) => write!(f, "unknown division `{value}`"),
            Self::UnknownFlag(name) => write!(f, "unknown flag `{name}`"),
            Self::UnknownTextField(name) => write!(f, "unknown text field `{name}`"),
            Self::NotNumeric(raw) => write!(f, "Only numbers are allowed: `{raw}`"),
            Self::Duplicate(id) => write!(f, "Only unique numbers are allowed: {id}"),
            Self::FlagNotOn(flag) => write!(f, "`{flag}` must be ON to take special values"),
            Self::Invalid(errors) => write!(f, "Please complete all required fields: {errors}"),
        }
    }
}

impl std::error::Error for SessionError {}
