//! # touch-core
//!
//! Shared library for the touch screen toggle containing the device
//! identifier type, the `xinput` command-line surface, and the parsers that
//! turn `xinput` text output into typed values.
//!
//! This crate never runs a process.  It has zero dependencies on OS APIs,
//! async runtimes, or the file system, so every parser can be tested against
//! captured sample output on any machine.
//!
//! # Architecture overview (for beginners)
//!
//! The toggle switches one physical touch screen on and off by shelling out
//! to `xinput`.  All of the knowledge about what `xinput` prints lives here:
//!
//! - **`domain`** – The [`DeviceId`] handed out by the X input subsystem.
//!   It is only valid for the current session and is passed to every
//!   device-scoped `xinput` call.
//!
//! - **`xinput`** – Argument builders for the four `xinput` invocations the
//!   toggle needs (`list`, `list-props`, `enable`, `disable`) and the fixed
//!   patterns used to pull the device id and the "Device Enabled" flag out of
//!   their output.

pub mod domain;
pub mod xinput;

// Re-export the most-used items at the crate root so callers can write
// `touch_core::DeviceId` instead of `touch_core::domain::device_id::DeviceId`.
pub use domain::device_id::{DeviceId, DeviceIdError};
pub use xinput::parse::{find_device_ids, parse_device_id, parse_enabled_state};
pub use xinput::{DeviceQuery, XinputCommand};
