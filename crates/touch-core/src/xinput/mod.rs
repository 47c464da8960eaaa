//! The `xinput` command-line surface used by the toggle.
//!
//! `xinput` is the X.Org utility for listing input devices and reading or
//! changing their properties.  The toggle only needs four invocations:
//!
//! | Invocation              | Purpose                                     |
//! |-------------------------|---------------------------------------------|
//! | `xinput list`           | Find the touch screen and its session id    |
//! | `xinput list-props <id>`| Read the "Device Enabled" property          |
//! | `xinput enable <id>`    | Start delivering events from the device     |
//! | `xinput disable <id>`   | Stop delivering events from the device      |
//!
//! The parsers for the first two live in [`parse`].

pub mod parse;

use crate::domain::device_id::DeviceId;

/// Program invoked when no override is configured.
pub const DEFAULT_PROGRAM: &str = "xinput";

/// USB vendor:product pair of the supported touch screen panel.
pub const DEFAULT_IDENTIFIER: &str = "06CB:19AC";

/// Label of the property that reports whether the device delivers events.
pub const DEFAULT_PROPERTY_LABEL: &str = "Device Enabled";

/// Everything needed to locate the device and read its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    /// Executable name or path of the device tool.
    pub program: String,
    /// Hardware identifier searched for in the device listing.
    pub identifier: String,
    /// Property label searched for in the property listing.
    pub property_label: String,
}

impl Default for DeviceQuery {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            identifier: DEFAULT_IDENTIFIER.to_string(),
            property_label: DEFAULT_PROPERTY_LABEL.to_string(),
        }
    }
}

/// One of the `xinput` invocations issued by the device controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XinputCommand<'a> {
    /// `xinput list`
    ListDevices,
    /// `xinput list-props <id>`
    ListProps(&'a DeviceId),
    /// `xinput enable <id>`
    Enable(&'a DeviceId),
    /// `xinput disable <id>`
    Disable(&'a DeviceId),
}

impl XinputCommand<'_> {
    /// The `xinput` sub-command name.
    pub fn subcommand(&self) -> &'static str {
        match self {
            XinputCommand::ListDevices => "list",
            XinputCommand::ListProps(_) => "list-props",
            XinputCommand::Enable(_) => "enable",
            XinputCommand::Disable(_) => "disable",
        }
    }

    /// Builds the argument vector passed after the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand().to_string()];
        match self {
            XinputCommand::ListDevices => {}
            XinputCommand::ListProps(id) | XinputCommand::Enable(id) | XinputCommand::Disable(id) => {
                args.push(id.as_str().to_string());
            }
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_targets_xinput_and_known_panel() {
        let query = DeviceQuery::default();
        assert_eq!(query.program, "xinput");
        assert_eq!(query.identifier, "06CB:19AC");
        assert_eq!(query.property_label, "Device Enabled");
    }

    #[test]
    fn test_list_devices_has_no_device_argument() {
        assert_eq!(XinputCommand::ListDevices.args(), vec!["list".to_string()]);
    }

    #[test]
    fn test_device_scoped_commands_append_the_id() {
        let id = DeviceId::new("11").unwrap();

        assert_eq!(XinputCommand::ListProps(&id).args(), vec!["list-props", "11"]);
        assert_eq!(XinputCommand::Enable(&id).args(), vec!["enable", "11"]);
        assert_eq!(XinputCommand::Disable(&id).args(), vec!["disable", "11"]);
    }
}
