// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Client-side edit state for one store capacity change.
//!
//! [`EditSession`] owns the two flag snapshots, the selection, special
//! payloads and text values. Everything callers display or gate on comes
//! from [`EditSession::form_state`], which is recomputed on every call.

mod error;
mod form;
mod reconcile;
mod session;

pub use error::SessionError;
pub use form::{FormErrors, FormState};
pub use reconcile::{changed_flags, has_changes, FlagState};
pub use session::{EditSession, FlagRow};

pub const CRATE_NAME: &str = "storecap-session";
