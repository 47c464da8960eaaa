//! touch-toggle library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does touch-toggle do? (for beginners)
//!
//! Some laptops ship a touch screen that is easy to brush against.  X11 can
//! stop a device from delivering events without unloading its driver, and
//! `xinput` is the command-line front end for that.  This crate:
//!
//! 1. Runs `xinput list` and finds the panel by its vendor:product id.
//! 2. Runs `xinput list-props <id>` to learn whether it is enabled.
//! 3. Runs `xinput enable <id>` / `xinput disable <id>` on request, and
//!    re-reads the property afterwards so the reported state is always the
//!    one X actually applied.

/// Application layer: device controller and toggle lifecycle.
pub mod application;

/// Infrastructure layer: process execution, test doubles, and config storage.
pub mod infrastructure;
