// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

/// Resolves where the client configuration file lives.
///
/// `STORECAP_CONFIG` wins for both scopes. The user scope then falls back to
/// `$XDG_CONFIG_HOME/storecap/config.toml` and `$HOME/.config/storecap/config.toml`.
#[must_use]
pub fn resolve_storecap_config_path(scope: ConfigPathScope) -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_STORECAP_CONFIG) {
        return PathBuf::from(explicit);
    }
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("storecap")
                    .join("config.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("storecap")
                    .join("config.toml");
            }
            PathBuf::from(".storecap").join("config.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".storecap").join("config.toml"),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
