//! Infrastructure layer for the touch screen toggle.
//!
//! Contains OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `touch_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`process`** – [`process::SystemCommandRunner`], the production
//!   `CommandRunner`.  Spawns real child processes and kills them when they
//!   exceed the configured timeout.
//!
//! - **`mock`** – [`mock::ScriptedCommandRunner`], a `CommandRunner` that
//!   answers from canned responses and records every invocation.  Always
//!   compiled so integration tests can use it.
//!
//! - **`storage`** – TOML configuration file persistence.

pub mod mock;
pub mod process;
pub mod storage;
