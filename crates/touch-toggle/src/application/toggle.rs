//! Toggle lifecycle and the toggle-consumer contract.
//!
//! A desktop panel, a tray icon, or the bundled CLI all want the same thing:
//! "is the touch screen on, and flip it".  [`ToggleSwitch`] is that contract,
//! and [`TouchScreenToggle`] owns the single [`Device`] behind it for as long
//! as the host keeps the feature started.
//!
//! Consumers must display the state returned *after* an action, never the
//! state they asked for.  Both [`flip`] and [`TouchScreenToggle::toggle`]
//! return the re-queried value for exactly that reason.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use touch_core::{DeviceId, DeviceQuery};
use tracing::info;

use crate::application::command::CommandRunner;
use crate::application::device::{Device, DeviceError};

/// Label shown next to the switch.
pub const TOGGLE_LABEL: &str = "Touch Screen";

/// Error type for toggle operations.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The toggle has not been started, or has been stopped.
    #[error("touch screen toggle is not running")]
    NotRunning,

    /// The underlying device operation failed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Read/enable/disable contract consumed by UI and automation layers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToggleSwitch: Send {
    /// The last-known state, without touching the OS.
    fn current_state(&self) -> bool;

    /// Requests the enabled state.
    async fn enable(&mut self) -> Result<(), DeviceError>;

    /// Requests the disabled state.
    async fn disable(&mut self) -> Result<(), DeviceError>;
}

#[async_trait]
impl ToggleSwitch for Device {
    fn current_state(&self) -> bool {
        Device::current_state(self)
    }

    async fn enable(&mut self) -> Result<(), DeviceError> {
        Device::enable(self).await
    }

    async fn disable(&mut self) -> Result<(), DeviceError> {
        Device::disable(self).await
    }
}

/// Requests the opposite of the current state and returns the state the
/// switch actually landed in.
///
/// # Errors
///
/// Propagates the error of the underlying `enable`/`disable` call.
pub async fn flip(switch: &mut dyn ToggleSwitch) -> Result<bool, DeviceError> {
    if switch.current_state() {
        switch.disable().await?;
    } else {
        switch.enable().await?;
    }
    Ok(switch.current_state())
}

/// Requests `enabled` and returns the state the switch actually landed in.
///
/// # Errors
///
/// Propagates the error of the underlying `enable`/`disable` call.
pub async fn set(switch: &mut dyn ToggleSwitch, enabled: bool) -> Result<bool, DeviceError> {
    if enabled {
        switch.enable().await?;
    } else {
        switch.disable().await?;
    }
    Ok(switch.current_state())
}

/// Snapshot of a running toggle, as rendered by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleStatus {
    pub label: &'static str,
    pub device_id: DeviceId,
    pub enabled: bool,
}

impl fmt::Display for ToggleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        write!(f, "{}: {} (device {})", self.label, state, self.device_id)
    }
}

/// Owns the touch screen [`Device`] between `start()` and `stop()`.
///
/// The host creates exactly one of these.  While stopped no device exists
/// and every operation fails with [`ToggleError::NotRunning`]; a failed
/// `start()` leaves it stopped, so no toggle in an unknown state is ever
/// offered.
pub struct TouchScreenToggle {
    runner: Arc<dyn CommandRunner>,
    query: DeviceQuery,
    device: Option<Device>,
}

impl TouchScreenToggle {
    /// Creates a stopped toggle.
    pub fn new(runner: Arc<dyn CommandRunner>, query: DeviceQuery) -> Self {
        Self {
            runner,
            query,
            device: None,
        }
    }

    /// Label to display next to the switch.
    pub fn label(&self) -> &'static str {
        TOGGLE_LABEL
    }

    /// Discovers the device from the live device list.
    ///
    /// Calling `start()` on a running toggle discards the old device first.
    ///
    /// # Errors
    ///
    /// Returns the construction error; the toggle stays stopped.
    pub async fn start(&mut self) -> Result<&Device, ToggleError> {
        self.device = None;
        let device = Device::construct(Arc::clone(&self.runner), self.query.clone()).await?;
        info!("touch screen toggle started");
        Ok(self.device.insert(device))
    }

    /// Drops the device.  Idempotent.
    pub fn stop(&mut self) {
        if self.device.take().is_some() {
            info!("touch screen toggle stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.device.is_some()
    }

    /// The discovered device, `None` while stopped.
    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    /// Mirrored state, `None` while stopped.
    pub fn state(&self) -> Option<bool> {
        self.device.as_ref().map(Device::current_state)
    }

    /// Current snapshot, `None` while stopped.
    pub fn status(&self) -> Option<ToggleStatus> {
        self.device.as_ref().map(|device| ToggleStatus {
            label: TOGGLE_LABEL,
            device_id: device.id().clone(),
            enabled: device.current_state(),
        })
    }

    /// Flips the device and returns the re-queried state.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotRunning`] while stopped, otherwise the device error.
    pub async fn toggle(&mut self) -> Result<bool, ToggleError> {
        let device = self.device.as_mut().ok_or(ToggleError::NotRunning)?;
        Ok(flip(device).await?)
    }

    /// Requests `enabled` and returns the re-queried state.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotRunning`] while stopped, otherwise the device error.
    pub async fn set_enabled(&mut self, enabled: bool) -> Result<bool, ToggleError> {
        let device = self.device.as_mut().ok_or(ToggleError::NotRunning)?;
        Ok(set(device, enabled).await?)
    }

    /// Re-reads the state from the OS.
    ///
    /// # Errors
    ///
    /// [`ToggleError::NotRunning`] while stopped, otherwise the device error.
    pub async fn refresh(&mut self) -> Result<bool, ToggleError> {
        let device = self.device.as_mut().ok_or(ToggleError::NotRunning)?;
        Ok(device.refresh_state().await?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::command::{CommandError, CommandOutput, MockCommandRunner};
    use std::sync::Mutex;

    // ── flip / set against a mocked switch ────────────────────────────────────

    #[tokio::test]
    async fn test_flip_disables_an_enabled_switch() {
        // Arrange
        let state = Arc::new(Mutex::new(true));
        let mut switch = MockToggleSwitch::new();
        let read = Arc::clone(&state);
        switch
            .expect_current_state()
            .returning(move || *read.lock().unwrap());
        let write = Arc::clone(&state);
        switch.expect_disable().times(1).returning(move || {
            *write.lock().unwrap() = false;
            Ok(())
        });
        switch.expect_enable().never();

        // Act
        let landed = flip(&mut switch).await.unwrap();

        // Assert
        assert!(!landed);
    }

    #[tokio::test]
    async fn test_flip_reports_where_the_switch_landed_not_the_request() {
        // Arrange – enable "succeeds" but the state stays off
        let mut switch = MockToggleSwitch::new();
        switch.expect_current_state().return_const(false);
        switch.expect_enable().times(1).returning(|| Ok(()));

        // Act
        let landed = flip(&mut switch).await.unwrap();

        // Assert
        assert!(!landed);
    }

    #[tokio::test]
    async fn test_set_propagates_device_errors() {
        // Arrange
        let mut switch = MockToggleSwitch::new();
        switch.expect_disable().times(1).returning(|| {
            Err(DeviceError::Command(CommandError::Failed {
                command: "xinput disable 11".to_string(),
                status: Some(1),
                stderr: "denied".to_string(),
            }))
        });

        // Act
        let result = set(&mut switch, false).await;

        // Assert
        assert!(matches!(result, Err(DeviceError::Command(_))));
    }

    // ── TouchScreenToggle lifecycle ───────────────────────────────────────────

    fn runner_with_state(enabled: bool) -> MockCommandRunner {
        let flag = Arc::new(Mutex::new(enabled));
        let mut mock = MockCommandRunner::new();
        mock.expect_run().returning(move |_, args| {
            let mut flag = flag.lock().unwrap();
            let stdout = match args[0].as_str() {
                "list" => "↳ SYNA7DB5:01 06CB:19AC \tid=11\t[slave  pointer  (2)]\n".to_string(),
                "list-props" => format!("\tDevice Enabled (143):\t{}\n", u8::from(*flag)),
                "enable" => {
                    *flag = true;
                    String::new()
                }
                "disable" => {
                    *flag = false;
                    String::new()
                }
                other => panic!("unexpected xinput sub-command {other}"),
            };
            Ok(CommandOutput::ok(stdout))
        });
        mock
    }

    #[test]
    fn test_new_toggle_is_stopped() {
        let toggle = TouchScreenToggle::new(Arc::new(MockCommandRunner::new()), DeviceQuery::default());

        assert!(!toggle.is_running());
        assert_eq!(toggle.state(), None);
        assert_eq!(toggle.status(), None);
        assert_eq!(toggle.label(), "Touch Screen");
    }

    #[tokio::test]
    async fn test_operations_on_stopped_toggle_fail() {
        let mut toggle =
            TouchScreenToggle::new(Arc::new(MockCommandRunner::new()), DeviceQuery::default());

        assert!(matches!(toggle.toggle().await, Err(ToggleError::NotRunning)));
        assert!(matches!(toggle.set_enabled(true).await, Err(ToggleError::NotRunning)));
        assert!(matches!(toggle.refresh().await, Err(ToggleError::NotRunning)));
    }

    #[tokio::test]
    async fn test_start_then_toggle_round_trip() {
        // Arrange
        let mut toggle =
            TouchScreenToggle::new(Arc::new(runner_with_state(true)), DeviceQuery::default());

        // Act
        toggle.start().await.unwrap();
        let after_first = toggle.toggle().await.unwrap();
        let after_second = toggle.toggle().await.unwrap();

        // Assert
        assert!(!after_first);
        assert!(after_second);
        assert_eq!(
            toggle.status().unwrap().to_string(),
            "Touch Screen: enabled (device 11)"
        );
    }

    #[tokio::test]
    async fn test_failed_start_leaves_toggle_stopped() {
        // Arrange
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .returning(|_, _| Ok(CommandOutput::failed(1, "Unable to connect to X server")));
        let mut toggle = TouchScreenToggle::new(Arc::new(mock), DeviceQuery::default());

        // Act
        let result = toggle.start().await;

        // Assert
        assert!(matches!(
            result,
            Err(ToggleError::Device(DeviceError::NotFound { .. }))
        ));
        assert!(!toggle.is_running());
    }

    #[tokio::test]
    async fn test_stop_drops_device_and_is_idempotent() {
        // Arrange
        let mut toggle =
            TouchScreenToggle::new(Arc::new(runner_with_state(false)), DeviceQuery::default());
        toggle.start().await.unwrap();

        // Act
        toggle.stop();
        toggle.stop();

        // Assert
        assert!(!toggle.is_running());
        assert_eq!(toggle.state(), None);
    }

    #[tokio::test]
    async fn test_set_enabled_returns_requeried_state() {
        let mut toggle =
            TouchScreenToggle::new(Arc::new(runner_with_state(false)), DeviceQuery::default());
        toggle.start().await.unwrap();

        assert!(toggle.set_enabled(true).await.unwrap());
        assert_eq!(toggle.state(), Some(true));
    }

    #[test]
    fn test_status_serializes_for_json_output() {
        let status = ToggleStatus {
            label: TOGGLE_LABEL,
            device_id: DeviceId::new("11").unwrap(),
            enabled: false,
        };
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"label":"Touch Screen","device_id":"11","enabled":false}"#
        );
    }
}
