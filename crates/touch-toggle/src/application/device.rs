//! Device controller: discovery, state mirror, and enable/disable.
//!
//! A [`Device`] is the in-memory model of exactly one touch screen.  It is
//! built by [`Device::construct`], which finds the panel in `xinput list` and
//! reads its "Device Enabled" property.  Construction either yields a fully
//! initialised device or an error; a half-built device never exists.
//!
//! # Re-query after every mutation
//!
//! `xinput enable` exiting with status 0 does not prove the property changed
//! (missing permissions, a driver that ignores the request, or another
//! process flipping it back).  [`Device::enable`] and [`Device::disable`]
//! therefore never write the mirror themselves: they issue the command and
//! then run [`Device::refresh_state`], so the mirror always holds the value
//! last read from the OS.

use std::sync::Arc;

use thiserror::Error;
use touch_core::{find_device_ids, parse_enabled_state, DeviceId, DeviceQuery, XinputCommand};
use tracing::{debug, info, warn};

use crate::application::command::{command_line, CommandError, CommandRunner};

/// Error type for device controller operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No device in the listing matched the hardware identifier, or the
    /// listing itself could not be produced.
    #[error("touch screen device {identifier} not found")]
    NotFound {
        identifier: String,
        source: Option<CommandError>,
    },

    /// The enabled property of the device could not be read.
    #[error("cannot read enabled state of device {device_id}")]
    StateQuery {
        device_id: DeviceId,
        source: Option<CommandError>,
    },

    /// An enable or disable command failed.  The state mirror has already
    /// been refreshed when this is returned.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// One touch screen, addressed by its session-scoped `xinput` id.
pub struct Device {
    runner: Arc<dyn CommandRunner>,
    query: DeviceQuery,
    id: DeviceId,
    enabled: bool,
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Device {
    /// Discovers the device and loads its initial state.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::NotFound`] if `xinput list` fails or prints no line
    ///   matching `query.identifier`.
    /// - [`DeviceError::StateQuery`] if the initial property read fails.
    pub async fn construct(
        runner: Arc<dyn CommandRunner>,
        query: DeviceQuery,
    ) -> Result<Self, DeviceError> {
        let listing = execute(runner.as_ref(), &query.program, XinputCommand::ListDevices)
            .await
            .map_err(|e| DeviceError::NotFound {
                identifier: query.identifier.clone(),
                source: Some(e),
            })?;

        let mut matches = find_device_ids(&listing, &query.identifier).into_iter();
        let id = matches.next().ok_or_else(|| DeviceError::NotFound {
            identifier: query.identifier.clone(),
            source: None,
        })?;

        let ignored: Vec<String> = matches.map(|other| other.to_string()).collect();
        if !ignored.is_empty() {
            warn!(
                "{} matched several devices; using id={id}, ignoring {}",
                query.identifier,
                ignored.join(", ")
            );
        }

        let enabled = read_enabled(runner.as_ref(), &query, &id).await?;
        info!("found touch screen {} as device {id} (enabled: {enabled})", query.identifier);

        Ok(Self {
            runner,
            query,
            id,
            enabled,
        })
    }

    /// The `xinput` id discovered at construction.
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// The last-known enabled state.  Does not touch the OS.
    pub fn current_state(&self) -> bool {
        self.enabled
    }

    /// Re-reads the enabled property and updates the mirror.
    ///
    /// Returns the freshly read state.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::StateQuery`] if the property cannot be read.
    /// The mirror keeps its previous value in that case.
    pub async fn refresh_state(&mut self) -> Result<bool, DeviceError> {
        self.enabled = read_enabled(self.runner.as_ref(), &self.query, &self.id).await?;
        info!("device state updated - {}", self.enabled);
        Ok(self.enabled)
    }

    /// Issues `xinput enable` and re-reads the state.
    ///
    /// The command is issued even if the device is already enabled.
    ///
    /// # Errors
    ///
    /// [`DeviceError::StateQuery`] if the re-read fails, otherwise
    /// [`DeviceError::Command`] if the enable command itself failed.
    pub async fn enable(&mut self) -> Result<(), DeviceError> {
        self.switch(true).await
    }

    /// Issues `xinput disable` and re-reads the state.
    ///
    /// # Errors
    ///
    /// Same as [`Device::enable`].
    pub async fn disable(&mut self) -> Result<(), DeviceError> {
        self.switch(false).await
    }

    async fn switch(&mut self, enable: bool) -> Result<(), DeviceError> {
        let command = if enable {
            XinputCommand::Enable(&self.id)
        } else {
            XinputCommand::Disable(&self.id)
        };
        let outcome = execute(self.runner.as_ref(), &self.query.program, command).await;

        self.refresh_state().await?;

        if self.enabled != enable && outcome.is_ok() {
            warn!(
                "device {} still reports enabled={} after {}",
                self.id,
                self.enabled,
                command_name(enable)
            );
        }
        outcome.map(drop).map_err(DeviceError::Command)
    }
}

fn command_name(enable: bool) -> &'static str {
    if enable {
        "enable"
    } else {
        "disable"
    }
}

async fn read_enabled(
    runner: &dyn CommandRunner,
    query: &DeviceQuery,
    id: &DeviceId,
) -> Result<bool, DeviceError> {
    let props = execute(runner, &query.program, XinputCommand::ListProps(id))
        .await
        .map_err(|e| DeviceError::StateQuery {
            device_id: id.clone(),
            source: Some(e),
        })?;

    parse_enabled_state(&props, &query.property_label).ok_or_else(|| DeviceError::StateQuery {
        device_id: id.clone(),
        source: None,
    })
}

/// Runs one `xinput` invocation and returns its stdout.
///
/// Any unsuccessful termination becomes [`CommandError::Failed`] with the
/// captured stderr.
async fn execute(
    runner: &dyn CommandRunner,
    program: &str,
    command: XinputCommand<'_>,
) -> Result<String, CommandError> {
    let args = command.args();
    let line = command_line(program, &args);
    debug!("execute - {line}");

    let output = match runner.run(program, args).await {
        Ok(output) => output,
        Err(e) => {
            warn!("execute error - {e}");
            return Err(e);
        }
    };

    if !output.is_success() {
        let stderr = output.stderr_text();
        warn!("execute error - {line}: {}", stderr.trim_end());
        return Err(CommandError::Failed {
            command: line,
            status: output.status,
            stderr,
        });
    }

    let stdout = output.stdout_text();
    debug!("execute result - {}", stdout.trim_end());
    Ok(stdout)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
