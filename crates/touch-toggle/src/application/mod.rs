//! Application layer use cases for the touch screen toggle.
//!
//! - **`command`** – The [`command::CommandRunner`] seam through which every
//!   external program is executed, plus the raw output and error types.
//!
//! - **`device`** – The device controller.  Finds the touch screen in the
//!   `xinput` device list, mirrors its enabled state, and re-queries that
//!   state after every enable/disable request.
//!
//! - **`toggle`** – The toggle-consumer contract and the start/stop lifecycle
//!   object that owns the single device for the host.

pub mod command;
pub mod device;
pub mod toggle;
