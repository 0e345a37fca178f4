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

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dp_core::{AggregationMode, Bssid, DeltaPinError, DeltaTable, WpsPinGenerator};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use deltapin::app::{run, RunOptions, RunOutcome};
use deltapin::cli::{prompt_line, Cli};
use deltapin::client::WifiDbClient;
use deltapin::config::{config_path, load_settings_from, validate_settings, Credentials};
use deltapin::display::{no_result_message, render, Status};
use deltapin::logger;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Authorize with stored credentials, or ask for new ones and store them once accepted
fn connect(base_url: &str, account_path: &Path, timeout: Duration) -> anyhow::Result<Option<WifiDbClient>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let (credentials, prompted) = match Credentials::load(account_path)? {
        Some(credentials) => (credentials, false),
        None => {
            println!("You need to log in to 3WiFi");
            (Credentials::prompt(&mut input, &mut stdout)?, true)
        }
    };

    let client = WifiDbClient::new(base_url, credentials, timeout)?;
    match client.auth() {
        Ok(()) => {}
        Err(DeltaPinError::Auth(reason)) => {
            tracing::debug!(%reason, "Login rejected");
            println!("Authorization failed. Please check username and password.");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    }

    if prompted {
        client.credentials().save(account_path)?;
        println!("The credentials were written to {}", account_path.display());
    }
    println!("Authorization is successful");
    Ok(Some(client))
}

fn target_bssid(arg: Option<&str>) -> anyhow::Result<Bssid> {
    let text = match arg {
        Some(text) => text.to_string(),
        None => {
            let stdin = io::stdin();
            prompt_line(&mut stdin.lock(), &mut io::stdout(), "Please specify the BSSID: ")?
        }
    };
    let bssid = text.to_uppercase().parse::<Bssid>()?;
    Ok(bssid)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    if cli.logging_enabled() {
        let path = cli.log_file.clone().unwrap_or_else(logger::default_log_path);
        if logger::init_logging(&path) {
            logger::log_event("startup", json!({
                "args": std::env::args().collect::<Vec<_>>(),
                "mode": AggregationMode::from(cli.mode).as_str(),
            }));
        }
    }

    let settings_path = cli.config.clone().unwrap_or_else(config_path);
    let settings = cli.apply_overrides(load_settings_from(&settings_path)?);
    validate_settings(&settings)?;

    let table = DeltaTable::load(&settings.deltas_path)
        .with_context(|| format!("loading DeltaPIN table {}", settings.deltas_path.display()))?;

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let Some(client) = connect(&settings.base_url, &settings.account_path, timeout)? else {
        return Ok(ExitCode::FAILURE);
    };

    let target = target_bssid(cli.bssid.as_deref())?;
    let options = RunOptions {
        ignore_pin: cli.ignore_pin,
        inference: cli.inference_options(),
        mode: cli.mode.into(),
    };
    let status = Status { styled: io::stdout().is_terminal() };
    let oracle = WpsPinGenerator::new();
    let mut stdout = io::stdout().lock();

    let code = match run(&target, &client, &oracle, &table, options, status, &mut stdout) {
        Ok(RunOutcome::KnownPin(pin)) => {
            writeln!(stdout, "The PIN for {} was found in 3WiFi: {}", target, pin)?;
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Ranked(aggregation)) => {
            render(&mut stdout, &aggregation)?;
            ExitCode::SUCCESS
        }
        Err(e) => match no_result_message(&e) {
            Some(msg) => {
                status.failure(&mut stdout, msg)?;
                logger::log_event("no_result", json!({ "reason": msg }));
                ExitCode::FAILURE
            }
            None => return Err(e.into()),
        },
    };
    stdout.flush()?;
    logger::shutdown_logging();
    Ok(code)
}
