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

//! Console output: status lines and candidate tables

use std::io::{self, Write};

use crossterm::style::Stylize;
use dp_core::{Aggregation, AnchorPrediction, DeltaPinError, RankedPin};

/// Writes `[*]`/`[+]`/`[-]` status lines, coloured when attached to a terminal
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub styled: bool,
}

impl Status {
    pub fn plain() -> Self {
        Self { styled: false }
    }

    pub fn info<W: Write>(&self, out: &mut W, msg: &str) -> io::Result<()> {
        if self.styled {
            writeln!(out, "{} {}", "[*]".cyan(), msg)
        } else {
            writeln!(out, "[*] {}", msg)
        }
    }

    pub fn success<W: Write>(&self, out: &mut W, msg: &str) -> io::Result<()> {
        if self.styled {
            writeln!(out, "{} {}", "[+]".green(), msg)
        } else {
            writeln!(out, "[+] {}", msg)
        }
    }

    pub fn failure<W: Write>(&self, out: &mut W, msg: &str) -> io::Result<()> {
        if self.styled {
            writeln!(out, "{} {}", "[-]".red().bold(), msg)
        } else {
            writeln!(out, "[-] {}", msg)
        }
    }
}

/// User-facing text for the expected "nothing found" outcomes
pub fn no_result_message(err: &DeltaPinError) -> Option<&'static str> {
    if !err.is_no_result() {
        return None;
    }
    Some(match err {
        DeltaPinError::NoRecords => "Not found similar BSSIDs in the 3WiFi",
        DeltaPinError::NoAnchors => "Not found anchor points",
        _ => "No known DeltaPINs found",
    })
}

fn title_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// One table per anchor; anchors without candidates are omitted
pub fn render_classical<W: Write>(out: &mut W, predictions: &[AnchorPrediction]) -> io::Result<()> {
    for prediction in predictions.iter().filter(|p| !p.pins.is_empty()) {
        writeln!(
            out,
            "\nPINs generated with {} (deltaMAC: {}; count: {}):",
            prediction.anchor.address,
            prediction.address_delta,
            prediction.pins.len()
        )?;
        writeln!(
            out,
            "{:<4} {:<10} {:<10} {:<14} {}",
            "№", "WPS PIN", "deltaPIN", "deltaPIN_cnt", "isMajorDeltaPIN"
        )?;
        for (i, pin) in prediction.pins.iter().enumerate() {
            writeln!(
                out,
                "{:<4} {:<10} {:<10} {:<14} {}",
                format!("{})", i + 1),
                pin.pin,
                pin.pin_delta,
                pin.count,
                title_bool(pin.is_major())
            )?;
        }
    }
    Ok(())
}

/// Single merged table; `X` is the number of anchors proposing the PIN
pub fn render_ranked<W: Write>(out: &mut W, pins: &[RankedPin]) -> io::Result<()> {
    writeln!(out, "{:<5} {:<10} {}", "№", "WPS PIN", "X")?;
    for (i, pin) in pins.iter().enumerate() {
        writeln!(out, "{:<5} {:<10} {}", format!("{})", i + 1), pin.pin, pin.occurrences)?;
    }
    Ok(())
}

pub fn render<W: Write>(out: &mut W, aggregation: &Aggregation) -> io::Result<()> {
    match aggregation {
        Aggregation::Classical(predictions) => render_classical(out, predictions),
        Aggregation::Ranked(pins) => render_ranked(out, pins),
    }
}
