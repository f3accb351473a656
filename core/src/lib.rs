//! Core types for slash-command reference generation.
//!
//! This crate defines the in-memory model shared by the extractor and the
//! renderer:
//!
//! - [`Command`]: one slash command with help text, arguments and examples.
//! - [`ArgumentDescriptor`]: a named or unnamed argument with explicit
//!   optional fields and documented defaults.
//! - [`EnumEntry`]: one allowed value of an enumerated argument.
//! - [`CommandRegistry`] / [`Group`]: commands grouped by category in
//!   first-seen order.
//!
//! # Example
//!
//! ```
//! use slashdoc_core::*;
//!
//! let mut registry = CommandRegistry::new();
//! let cmd = registry.push_command("Math", Command::new("add"));
//! cmd.help = "Adds two numbers".into();
//! cmd.unnamed.push(
//!     ArgumentDescriptor::unnamed()
//!         .with_types(["ARGUMENT_TYPE.NUMBER"])
//!         .required(),
//! );
//!
//! let math = registry.group("Math").unwrap();
//! assert_eq!(math.command_names(), vec!["add"]);
//! assert_eq!(math.commands[0].unnamed[0].type_names(true), vec!["number"]);
//! ```

mod registry;
mod types;

pub use registry::{CommandRegistry, DEFAULT_GROUP, Group};
pub use types::*;
