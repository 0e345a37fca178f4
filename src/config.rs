/*
 * This file is part of DeltaPIN.
 *
 * Copyright (C) 2025 DeltaPIN contributors
 *
 * DeltaPIN is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * DeltaPIN is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with DeltaPIN. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::io::{BufRead, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use dp_core::constants::{defaults, wifi_db};
use dp_core::{DeltaPinError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::prompt_line;

fn default_base_url() -> String { wifi_db::DEFAULT_BASE_URL.to_string() }
fn default_deltas_path() -> PathBuf { PathBuf::from(defaults::DELTAS_FILE) }
fn default_account_path() -> PathBuf { PathBuf::from(defaults::ACCOUNT_FILE) }
fn default_timeout_secs() -> u64 { wifi_db::DEFAULT_TIMEOUT_SECS }

/// Optional on-disk settings; every field falls back to its default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// 3WiFi base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// DeltaMAC → DeltaPIN table
    #[serde(default = "default_deltas_path")]
    pub deltas_path: PathBuf,
    /// `login:password` credential file
    #[serde(default = "default_account_path")]
    pub account_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            deltas_path: default_deltas_path(),
            account_path: default_account_path(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("deltapin").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("deltapin")
            .join("config.json");
    }
    PathBuf::from("deltapin.json")
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    let url = settings.base_url.trim();
    if url.is_empty() {
        return Err(DeltaPinError::config("base_url must not be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(DeltaPinError::config(format!("base_url {:?} must be an http(s) URL", url)));
    }
    if settings.deltas_path.as_os_str().is_empty() {
        return Err(DeltaPinError::config("deltas_path must not be empty"));
    }
    if settings.account_path.as_os_str().is_empty() {
        return Err(DeltaPinError::config("account_path must not be empty"));
    }
    if settings.request_timeout_secs == 0 || settings.request_timeout_secs > wifi_db::MAX_TIMEOUT_SECS {
        return Err(DeltaPinError::config(format!(
            "request_timeout_secs must be within 1..={}",
            wifi_db::MAX_TIMEOUT_SECS
        )));
    }
    Ok(())
}

/// Load and validate settings from `path`; a missing file yields the defaults
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(DeltaPinError::FileRead { path: path.to_path_buf(), source });
        }
    };
    let settings: Settings = serde_json::from_str(&data)
        .map_err(|e| DeltaPinError::config(format!("{}: {}", path.display(), e)))?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// A 3WiFi account, persisted as a single `login:password` line
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login: login.into(), password: password.into() }
    }

    /// Parse `login:password`; the password may itself contain ':'
    pub fn parse(text: &str) -> Result<Self> {
        let (login, password) = text
            .trim()
            .split_once(':')
            .ok_or_else(|| DeltaPinError::config("credentials must have the form login:password"))?;
        if login.is_empty() || password.is_empty() {
            return Err(DeltaPinError::config("login and password must not be empty"));
        }
        Ok(Self::new(login, password))
    }

    /// Read stored credentials; `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DeltaPinError::FileRead { path: path.to_path_buf(), source }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = fs::create_dir_all(parent);
        }
        fs::write(path, format!("{}:{}", self.login, self.password))
            .map_err(|source| DeltaPinError::FileWrite { path: path.to_path_buf(), source })?;
        // Best-effort owner-only permissions
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
        Ok(())
    }

    /// Ask for a login and password interactively
    pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Self> {
        let login = prompt_line(input, output, "Username: ")?;
        let password = prompt_line(input, output, "Password: ")?;
        if login.is_empty() || password.is_empty() || login.contains(':') {
            return Err(DeltaPinError::config("login must be non-empty without ':' and password non-empty"));
        }
        Ok(Self::new(login, password))
    }
}
