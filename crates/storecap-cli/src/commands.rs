// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use storecap_client::{
    apply_env_overrides, load_client_config, submit_session, third_party_options_or_empty,
    validate_client_config, ClientConfig, ConsoleBackend, HttpConsoleBackend, SubmitGate,
};
use storecap_core::{resolve_storecap_config_path, ConfigPathScope, ResultExt};
use storecap_model::{DayCapacity, FlagLevel, RequestStatus, StoreConfig, Weekday};
use storecap_policies::{
    apply_pool_input, build_capacity_settings, evaluate_update_payload, reconcile, CapacityField,
};
use storecap_session::{EditSession, SessionError};

use crate::error::CliError;
use crate::output::{emit_ok, OutputMode};
use crate::plan::EditPlan;

/// Shared inputs of commands that talk to the backend.
pub(crate) struct Context {
    pub(crate) output_mode: OutputMode,
    pub(crate) base_url: Option<String>,
}

/// A `.storecap/config.toml` in the working directory shadows the user file.
fn client_config_path() -> PathBuf {
    let workspace = resolve_storecap_config_path(ConfigPathScope::Workspace);
    if workspace.is_file() {
        workspace
    } else {
        resolve_storecap_config_path(ConfigPathScope::User)
    }
}

impl Context {
    /// File, then environment, then `--base-url`.
    fn client_config(&self) -> Result<(PathBuf, ClientConfig), CliError> {
        let path = client_config_path();
        let mut config = apply_env_overrides(load_client_config(Some(&path))?);
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        validate_client_config(&config).map_err(CliError::usage)?;
        debug!(path = %path.display(), base_url = %config.base_url, "client config resolved");
        Ok((path, config))
    }

    fn backend(&self) -> Result<HttpConsoleBackend, CliError> {
        let (_, config) = self.client_config()?;
        Ok(HttpConsoleBackend::from_config(&config)?)
    }
}

pub(crate) fn config_show(ctx: &Context) -> Result<(), CliError> {
    let (path, config) = ctx.client_config()?;
    emit_ok(
        ctx.output_mode,
        &json!({
            "command": "config show",
            "path": path,
            "config": config,
        }),
    )
}

pub(crate) fn flags_list(ctx: &Context, level: FlagLevel, search: &str) -> Result<(), CliError> {
    let session = EditSession::load(ctx.backend()?.fetch_config()?);
    let rows: Vec<Value> = session
        .flags_at_level(&level, search)
        .into_iter()
        .map(|row| {
            json!({
                "flagName": row.descriptor.flag_name,
                "flagViewName": row.descriptor.flag_view_name,
                "flagValue": row.value,
                "state": row.value.label(),
            })
        })
        .collect();
    emit_ok(
        ctx.output_mode,
        &json!({"command": "flags list", "level": level.as_str(), "flags": rows}),
    )
}

pub(crate) fn third_party_options(ctx: &Context) -> Result<(), CliError> {
    let options = third_party_options_or_empty(&ctx.backend()?);
    emit_ok(
        ctx.output_mode,
        &json!({"command": "options third-party", "options": options}),
    )
}

/// Prints the derived split. Exits with a validation error when `capPool1`
/// falls outside `[0, 100]`.
pub(crate) fn capacity_check(
    output_mode: OutputMode,
    cap_pool2: i64,
    cap_pool3: i64,
) -> Result<(), CliError> {
    let derived = reconcile(cap_pool2, cap_pool3);
    emit_ok(
        output_mode,
        &json!({
            "command": "capacity check",
            "capPool1": derived.cap_pool1,
            "capPool2": cap_pool2,
            "capPool3": cap_pool3,
            "isValid": derived.is_valid,
        }),
    )?;
    if derived.is_valid {
        Ok(())
    } else {
        Err(CliError::validation(&format!(
            "capPool1 would be {}; pools must stay between 0-100",
            derived.cap_pool1
        )))
    }
}

pub(crate) struct SettingsArgs {
    pub(crate) days: Vec<String>,
    pub(crate) cap_pool2: String,
    pub(crate) cap_pool3: String,
    pub(crate) dumm: Option<String>,
}

pub(crate) fn capacity_settings(output_mode: OutputMode, args: SettingsArgs) -> Result<(), CliError> {
    let mut days = Vec::with_capacity(args.days.len());
    for raw in &args.days {
        let day = Weekday::from_str(raw).map_err(CliError::usage)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }

    let mut entry = DayCapacity::default();
    entry = apply_pool_input(entry, CapacityField::CapPool2, &args.cap_pool2);
    entry = apply_pool_input(entry, CapacityField::CapPool3, &args.cap_pool3);
    if let Some(dumm) = &args.dumm {
        entry = apply_pool_input(entry, CapacityField::Dumm, dumm);
    }

    let settings = build_capacity_settings(&days, &entry).map_err(|errors| {
        CliError::validation("capacity settings are invalid").with_field_errors(&errors)
    })?;
    emit_ok(
        output_mode,
        &json!({"command": "capacity settings", "capacitySettings": settings}),
    )
}

pub(crate) struct ApplyArgs {
    pub(crate) plan: PathBuf,
    pub(crate) dry_run: bool,
    pub(crate) store_config: Option<PathBuf>,
}

fn read_store_config(path: &Path) -> Result<StoreConfig, CliError> {
    let raw = std::fs::read_to_string(path)
        .with_context("read store config")
        .map_err(CliError::usage)?;
    serde_json::from_str(&raw)
        .with_context("parse store config")
        .map_err(CliError::usage)
}

pub(crate) fn apply(ctx: &Context, args: ApplyArgs) -> Result<(), CliError> {
    let plan = EditPlan::load(&args.plan)?;
    let config = match &args.store_config {
        Some(path) => read_store_config(path)?,
        None => ctx.backend()?.fetch_config()?,
    };

    let mut session = EditSession::load(config);
    let field_errors = plan.apply(&mut session)?;
    let state = session.form_state();

    if args.dry_run {
        let payload = session.build_update_payload().ok();
        let violations = payload
            .as_ref()
            .map(evaluate_update_payload)
            .unwrap_or_default();
        emit_ok(
            ctx.output_mode,
            &json!({
                "command": "apply",
                "dryRun": true,
                "formState": state,
                "fieldErrors": field_errors,
                "payload": payload,
                "violations": violations,
            }),
        )?;
        if state.errors.is_empty() {
            return Ok(());
        }
        return Err(SessionError::Invalid(state.errors).into());
    }

    if !state.errors.is_empty() {
        return Err(SessionError::Invalid(state.errors).into());
    }
    if !state.can_submit {
        return Err(CliError::validation("nothing to submit: the plan changes nothing"));
    }

    let backend = ctx.backend()?;
    let gate = SubmitGate::new();
    let report = submit_session(&backend, &gate, &mut session)?;
    info!(payload_sha256 = %report.fingerprint, "plan applied");
    emit_ok(
        ctx.output_mode,
        &json!({
            "command": "apply",
            "status": "submitted",
            "fingerprint": report.fingerprint,
            "changedFlags": report.payload.flags.len(),
            "warnings": report.warnings,
        }),
    )
}

pub(crate) fn history(
    ctx: &Context,
    status: Option<RequestStatus>,
    store_id: Option<u64>,
) -> Result<(), CliError> {
    let rows: Vec<_> = ctx
        .backend()?
        .fetch_request_history()?
        .into_iter()
        .filter(|row| status.map_or(true, |wanted| row.status == wanted))
        .filter(|row| store_id.map_or(true, |wanted| row.store_id == wanted))
        .collect();
    emit_ok(
        ctx.output_mode,
        &json!({"command": "history", "count": rows.len(), "requests": rows}),
    )
}

pub(crate) fn version(output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "name": "storecap",
            "version": env!("CARGO_PKG_VERSION"),
            "client": storecap_client::CRATE_NAME,
        }),
    )
}
