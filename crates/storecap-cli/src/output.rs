// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use storecap_core::canonical;

use crate::error::CliError;

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

/// `--json` prints one canonical line; otherwise pretty JSON.
pub(crate) fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), CliError> {
    if output_mode.json {
        let bytes = canonical::stable_json_bytes(payload).map_err(CliError::internal)?;
        let text = String::from_utf8(bytes).map_err(CliError::internal)?;
        println!("{text}");
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(payload).map_err(CliError::internal)?
        );
    }
    Ok(())
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
        for (key, value) in &error.machine.details {
            eprintln!("  {key}: {value}");
        }
    }
}
