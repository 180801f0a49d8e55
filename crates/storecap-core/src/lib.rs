// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Primitives shared by every storecap crate: exit codes, machine-readable
//! errors, error context, configuration path resolution and canonical JSON
//! hashing.

pub mod domain;
pub mod errors;

pub use domain::canonical;
pub use domain::canonical::{sha256_hex, stable_json_hash_hex};
pub use domain::config::{resolve_storecap_config_path, ConfigPathScope};
pub use errors::{Error, ErrorContext, ExitCode, MachineError, Result, ResultExt};

pub const CRATE_NAME: &str = "storecap-core";

pub const ENV_STORECAP_LOG_LEVEL: &str = "STORECAP_LOG_LEVEL";
pub const ENV_STORECAP_LOG_JSON: &str = "STORECAP_LOG_JSON";
pub const ENV_STORECAP_BASE_URL: &str = "STORECAP_BASE_URL";
pub const ENV_STORECAP_TIMEOUT_MS: &str = "STORECAP_TIMEOUT_MS";
pub const ENV_STORECAP_CONFIG: &str = "STORECAP_CONFIG";
