//! Domain types for the touch screen toggle.
//!
//! Pure value types only.  Nothing in here knows how the values are obtained
//! from the operating system.

/// Session-scoped input device handle.
///
/// See [`device_id::DeviceId`] for the main type.
pub mod device_id;
