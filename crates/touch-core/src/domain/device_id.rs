//! Input device identifier assigned by the X input subsystem.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when building a [`DeviceId`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceIdError {
    /// The text was empty.
    #[error("device id must not be empty")]
    Empty,

    /// The text contained something other than ASCII digits.
    #[error("device id must be numeric, got {0:?}")]
    NotNumeric(String),
}

/// Opaque handle of one input device, e.g. the `11` in `id=11`.
///
/// The value is kept as the exact digit string `xinput` printed so it can be
/// passed back to `xinput` unchanged.  It is only meaningful for the lifetime
/// of the current X session and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Validates `raw` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceIdError::Empty`] for an empty string and
    /// [`DeviceIdError::NotNumeric`] if any character is not an ASCII digit.
    pub fn new(raw: impl Into<String>) -> Result<Self, DeviceIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DeviceIdError::Empty);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeviceIdError::NotNumeric(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the id exactly as `xinput` printed it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = DeviceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
