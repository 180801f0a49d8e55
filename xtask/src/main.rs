// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::Path;
use std::process::{Command, ExitCode};

const CHECKS: &[(&str, &[&str])] = &[
    ("fmt", &["fmt", "--all", "--", "--check"]),
    (
        "lint",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    ),
    ("test", &["test", "--workspace"]),
    ("bench", &["bench", "-p", "storecap-policies", "--no-run"]),
];

fn cargo(root: &Path, args: &[&str]) -> Result<(), String> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let status = Command::new(&cargo)
        .args(args)
        .current_dir(root)
        .status()
        .map_err(|e| format!("failed to run `{cargo} {}`: {e}", args.join(" ")))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: cargo {}", args.join(" ")))
    }
}

fn run_check(root: &Path, name: &str) -> Result<(), String> {
    let (_, args) = CHECKS
        .iter()
        .find(|(check, _)| *check == name)
        .ok_or_else(|| format!("unknown xtask command: {name} (try `cargo xtask help`)"))?;
    cargo(root, args)
}

fn main() -> ExitCode {
    let arg = env::args().nth(1).unwrap_or_else(|| "help".to_string());
    let Some(root) = Path::new(env!("CARGO_MANIFEST_DIR")).parent() else {
        eprintln!("failed to resolve workspace root");
        return ExitCode::FAILURE;
    };

    let result = match arg.as_str() {
        "ci" => CHECKS
            .iter()
            .try_for_each(|(name, _)| run_check(root, name)),
        "help" | "--help" | "-h" => {
            eprintln!("xtask commands:");
            for (name, args) in CHECKS {
                eprintln!("  {name:<6} cargo {}", args.join(" "));
            }
            eprintln!("  ci     all of the above, in order");
            Ok(())
        }
        other => run_check(root, other),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
