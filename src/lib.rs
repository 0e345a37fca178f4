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

//! DeltaPIN - delta-based WPS PIN inference for Tenda access points
//!
//! The driver around `dp-core`: command line parsing, settings and
//! credentials, the 3WiFi client, console rendering and the event log.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod logger;

#[cfg(test)]
pub mod test_utils;
