// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Smobot library.
//!
//! Failures fall into four categories: client-side value validation,
//! transport (connection and HTTP status), response parsing, and lookups of
//! raw status fields by name.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was rejected before anything was sent to the device.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A raw status field was requested by an unknown name.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i32,
        /// Maximum allowed value.
        max: i32,
        /// The actual value that was provided.
        actual: i32,
    },
}

/// Errors related to HTTP communication with the device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed (connection refused, timeout, DNS failure, ...).
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status code.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, or `Unknown`.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing Smobot responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed, including missing or unexpected status fields.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned when looking up a raw status field by name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No status field has this name.
    #[error("requested key ({0}) not present in status message")]
    UnknownField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
