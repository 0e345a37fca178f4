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

//! Command Line Interface

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dp_core::{AggregationMode, DeltaPinError, InferenceOptions, Result};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "deltapin")]
#[command(version)]
#[command(about = "Experimental online WPS PIN generator for some Tenda devices")]
#[command(long_about = "Experimental online WPS PIN generator for some Tenda devices.

Uses the 3WiFi wireless database to find anchor points: nearby access points
with a known PIN. The PIN offset observed for each address offset is undone
to rank candidate PINs for the target.

EXAMPLES:
    deltapin C8:3A:35:D2:A5:F0
    deltapin C8:3A:35:D2:A5:F0 --mode unified --anchors 3
    deltapin C8:3A:35:D2:A5:F0 --major-deltas-only

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Enable debug logging

FILES:
    account.txt                         3WiFi login:password
    tenda_deltas.json                   DeltaMAC -> DeltaPIN table
    ~/.config/deltapin/config.json      Optional settings")]
pub struct Cli {
    /// The target BSSID (prompted for when omitted)
    pub bssid: Option<String>,

    /// Ignore the PIN stored in 3WiFi for the target BSSID itself
    #[arg(short = 'i', long = "ignore-pin")]
    pub ignore_pin: bool,

    /// Maximum number of anchor BSSIDs used to search PINs (0 = unlimited)
    #[arg(short = 'a', long = "anchors", default_value_t = 0)]
    pub anchors: usize,

    /// WPS PIN list mode
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = ModeArg::Classical)]
    pub mode: ModeArg,

    /// Use only major DeltaPINs (seen more than once)
    #[arg(long = "major-deltas-only")]
    pub major_only: bool,

    /// DeltaMAC -> DeltaPIN table
    #[arg(long, value_name = "PATH")]
    pub deltas: Option<PathBuf>,

    /// Credential file (login:password)
    #[arg(long, value_name = "PATH")]
    pub account: Option<PathBuf>,

    /// 3WiFi base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append JSON event lines to a log file
    #[arg(long)]
    pub logging: bool,

    /// Event log location (implies --logging)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// One list per anchor point
    Classical,
    /// Single merged list, earlier positions preferred
    Unified,
    /// Single merged list ranked by mean position
    #[value(name = "unified1")]
    Unified1,
}

impl From<ModeArg> for AggregationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classical => AggregationMode::Classical,
            ModeArg::Unified => AggregationMode::Unified,
            ModeArg::Unified1 => AggregationMode::Unified1,
        }
    }
}

impl Cli {
    pub fn inference_options(&self) -> InferenceOptions {
        InferenceOptions {
            max_anchors: self.anchors,
            major_only: self.major_only,
        }
    }

    /// Settings with command line overrides applied
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.deltas {
            settings.deltas_path = path.clone();
        }
        if let Some(path) = &self.account {
            settings.account_path = path.clone();
        }
        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
        settings
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging || self.log_file.is_some()
    }
}

/// Print `label` and read one trimmed line
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(DeltaPinError::generic("unexpected end of input"));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["deltapin"]).unwrap();
        assert!(cli.bssid.is_none());
        assert_eq!(cli.anchors, 0);
        assert_eq!(cli.mode, ModeArg::Classical);
        assert!(!cli.ignore_pin);
        assert!(!cli.major_only);
        assert!(!cli.logging_enabled());
    }

    #[test]
    fn test_full_argument_set() {
        let cli = Cli::try_parse_from([
            "deltapin",
            "c8:3a:35:d2:a5:f0",
            "-i",
            "-a",
            "3",
            "-m",
            "unified1",
            "--major-deltas-only",
            "--log-file",
            "/tmp/events.json",
        ])
        .unwrap();
        assert_eq!(cli.bssid.as_deref(), Some("c8:3a:35:d2:a5:f0"));
        assert!(cli.ignore_pin);
        assert_eq!(AggregationMode::from(cli.mode), AggregationMode::Unified1);
        assert_eq!(
            cli.inference_options(),
            InferenceOptions { max_anchors: 3, major_only: true }
        );
        assert!(cli.logging_enabled());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["deltapin", "-m", "merged"]).is_err());
        assert!(Cli::try_parse_from(["deltapin", "-a", "-1"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "deltapin",
            "--deltas",
            "/data/d.json",
            "--base-url",
            "http://localhost:8080",
        ])
        .unwrap();
        let settings = cli.apply_overrides(Settings::default());
        assert_eq!(settings.deltas_path, PathBuf::from("/data/d.json"));
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.account_path, Settings::default().account_path);
    }

    #[test]
    fn test_prompt_line() {
        let mut input = Cursor::new("  11:22:33:44:55:66  \n");
        let mut output = Vec::new();
        let line = prompt_line(&mut input, &mut output, "BSSID: ").unwrap();
        assert_eq!(line, "11:22:33:44:55:66");
        assert_eq!(output, b"BSSID: ");

        let mut empty = Cursor::new("");
        assert!(prompt_line(&mut empty, &mut output, "x").is_err());
    }
}
