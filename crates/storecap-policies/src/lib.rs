// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod capacity;
mod evaluation;
mod field;
mod special;
mod text_field;

pub use capacity::{
    apply_pool_input, build_capacity_settings, reconcile, reconcile_split,
    validate_capacity_settings, CapacityField, CapacityReconciliation, POOL_TOTAL,
};
pub use evaluation::{evaluate_update_payload, PolicySeverity, PolicyViolation};
pub use field::FieldError;
pub use special::{
    completeness_errors, format, format_by_name, is_complete, validate_raw_fields,
    WFC_ID_MAX_DIGITS,
};
pub use text_field::{text_field_rule, validate_text_value, validate_with_rule, TextFieldRule};

pub const CRATE_NAME: &str = "storecap-policies";
