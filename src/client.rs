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

//! 3WiFi wireless database client
//!
//! Blocking HTTP client holding a cookie session: one login, then one search
//! per run. There is no retry logic; failures surface to the caller.

use std::time::Duration;

use dp_core::constants::wifi_db;
use dp_core::{Bssid, DeltaPinError, RawRecord, RecordSource, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Credentials;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    result: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    result: bool,
    #[serde(default)]
    data: Option<Vec<RawRecord>>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode the login endpoint's reply
pub fn decode_auth(body: &str) -> Result<()> {
    let reply: AuthResponse = serde_json::from_str(body)
        .map_err(|e| DeltaPinError::Api(format!("unexpected login response: {}", e)))?;
    if reply.result {
        Ok(())
    } else {
        Err(DeltaPinError::Auth(
            reply.error.unwrap_or_else(|| "login rejected".to_string()),
        ))
    }
}

/// Decode the search endpoint's reply into records
pub fn decode_find(body: &str) -> Result<Vec<RawRecord>> {
    let reply: FindResponse = serde_json::from_str(body)
        .map_err(|e| DeltaPinError::Api(format!("unexpected search response: {}", e)))?;
    if !reply.result {
        let reason = reply.error.unwrap_or_else(|| "search failed".to_string());
        if reason == "unauthorized" || reason == "loginfail" {
            return Err(DeltaPinError::Auth(reason));
        }
        return Err(DeltaPinError::Api(reason));
    }
    Ok(reply.data.unwrap_or_default())
}

pub struct WifiDbClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl WifiDbClient {
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(wifi_db::USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| DeltaPinError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .map_err(|e| DeltaPinError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeltaPinError::Network(format!("{} returned HTTP {}", url, status)));
        }
        response.text().map_err(|e| DeltaPinError::Network(e.to_string()))
    }

    /// Log in; the session cookie is kept for later requests
    pub fn auth(&self) -> Result<()> {
        let body = self.post_form(
            wifi_db::LOGIN_PATH,
            &[
                ("login", self.credentials.login.as_str()),
                ("password", self.credentials.password.as_str()),
            ],
        )?;
        decode_auth(&body)?;
        info!(login = %self.credentials.login, "Authorized with 3WiFi");
        Ok(())
    }

    /// Records whose BSSID matches `mask` and that carry any WPS PIN
    pub fn find(&self, mask: &str) -> Result<Vec<RawRecord>> {
        let body = self.post_form(
            wifi_db::FIND_PATH,
            &[("bssid", mask), ("wps", wifi_db::ANY_WPS_PIN)],
        )?;
        let records = decode_find(&body)?;
        info!(mask, records = records.len(), "3WiFi search complete");
        Ok(records)
    }
}

impl RecordSource for WifiDbClient {
    fn fetch_neighbours(&self, target: &Bssid) -> Result<Vec<RawRecord>> {
        self.find(&target.search_mask())
    }
}
