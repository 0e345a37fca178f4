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

//! One inference run: query, filter, infer, aggregate

use std::io::Write;

use dp_core::{
    aggregate, filter_records, Aggregation, AggregationMode, Bssid, DeltaPinError, DeltaTable,
    FilterOutcome, InferenceEngine, InferenceOptions, PinOracle, RecordSource, Result,
};
use serde_json::json;
use tracing::info;

use crate::display::Status;
use crate::logger::log_event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Do not stop at a PIN already stored for the target
    pub ignore_pin: bool,
    pub inference: InferenceOptions,
    pub mode: AggregationMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The database already knows the target's PIN
    KnownPin(String),
    Ranked(Aggregation),
}

pub fn run<S, O, W>(
    target: &Bssid,
    source: &S,
    oracle: &O,
    table: &DeltaTable,
    options: RunOptions,
    status: Status,
    out: &mut W,
) -> Result<RunOutcome>
where
    S: RecordSource + ?Sized,
    O: PinOracle + ?Sized,
    W: Write,
{
    let mask = target.search_mask();
    status.info(out, &format!("Requesting 3WiFi for \"{}\"…", mask))?;
    let records = source.fetch_neighbours(target)?;
    log_event("records", json!({ "mask": mask, "count": records.len() }));
    if records.is_empty() {
        return Err(DeltaPinError::NoRecords);
    }
    status.success(out, &format!("Found {} records", records.len()))?;

    let anchors = match filter_records(target, &records, oracle, options.ignore_pin) {
        FilterOutcome::KnownPin(pin) => {
            log_event("known_pin", json!({ "bssid": target.to_string(), "pin": pin }));
            return Ok(RunOutcome::KnownPin(pin));
        }
        FilterOutcome::Anchors(anchors) => anchors,
    };

    let engine = InferenceEngine::new(table, oracle);
    let deltas = engine.resolve_deltas(target, &anchors)?;
    status.success(out, &format!("{} anchor points defined", deltas.len()))?;
    log_event("anchors", json!({ "count": deltas.len() }));

    let predictions = engine.infer_resolved(target, &deltas, options.inference)?;
    let aggregation = aggregate(options.mode, predictions)?;
    info!(mode = %options.mode, pins = aggregation.pin_count(), "Candidates ranked");
    log_event(
        "result",
        json!({ "mode": options.mode.as_str(), "pins": aggregation.pin_count() }),
    );
    Ok(RunOutcome::Ranked(aggregation))
}
