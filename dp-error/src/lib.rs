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

//! Unified error handling for DeltaPIN
//!
//! This crate provides a single error type used across all DeltaPIN components.
//! It uses thiserror for ergonomic error definitions with proper Display and Error trait impls.

use std::io;
use std::path::PathBuf;

/// Result type alias using DeltaPinError
pub type Result<T> = std::result::Result<T, DeltaPinError>;

/// Unified error type for all DeltaPIN operations
#[derive(thiserror::Error, Debug)]
pub enum DeltaPinError {
    // ============================================================================
    // Input Format Errors
    // ============================================================================
    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid hardware address {address:?}: {reason}")]
    InvalidAddress {
        address: String,
        reason: String,
    },

    #[error("Invalid WPS PIN {pin:?}: {reason}")]
    InvalidPin {
        pin: String,
        reason: String,
    },

    // ============================================================================
    // Inference Outcomes
    // ============================================================================
    #[error("No similar BSSIDs found in the database")]
    NoRecords,

    #[error("No anchor points defined")]
    NoAnchors,

    #[error("No known DeltaPINs found for the anchor points")]
    NoCandidates,

    #[error("Nothing to aggregate: no candidate PINs")]
    EmptyInput,

    // ============================================================================
    // Remote Database Errors
    // ============================================================================
    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Database API error: {0}")]
    Api(String),

    // ============================================================================
    // Configuration and File Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Generic(String),
}

impl DeltaPinError {
    /// Create a format error from a string
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create an invalid address error
    pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid PIN error
    pub fn invalid_pin(pin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPin {
            pin: pin.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error from a string
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Whether this is one of the expected "no result" outcomes rather than a failure
    pub fn is_no_result(&self) -> bool {
        matches!(
            self,
            Self::NoRecords | Self::NoAnchors | Self::NoCandidates | Self::EmptyInput
        )
    }

    /// Whether the error came from malformed input data
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::InvalidAddress { .. } | Self::InvalidPin { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_result_classification() {
        assert!(DeltaPinError::NoRecords.is_no_result());
        assert!(DeltaPinError::NoAnchors.is_no_result());
        assert!(DeltaPinError::NoCandidates.is_no_result());
        assert!(DeltaPinError::EmptyInput.is_no_result());
        assert!(!DeltaPinError::Auth("bad".into()).is_no_result());
        assert!(!DeltaPinError::format("x").is_no_result());
    }

    #[test]
    fn test_format_classification() {
        assert!(DeltaPinError::invalid_address("zz", "not hex").is_format());
        assert!(DeltaPinError::invalid_pin("1", "too short").is_format());
        assert!(!DeltaPinError::NoAnchors.is_format());
    }

    #[test]
    fn test_display_messages() {
        let err = DeltaPinError::invalid_address("GG:00", "non-hex character");
        assert_eq!(
            err.to_string(),
            "Invalid hardware address \"GG:00\": non-hex character"
        );
        assert_eq!(DeltaPinError::generic("plain").to_string(), "plain");
        let err: DeltaPinError = io::Error::new(io::ErrorKind::UnexpectedEof, "closed").into();
        assert!(matches!(err, DeltaPinError::Io(_)));
    }
}
