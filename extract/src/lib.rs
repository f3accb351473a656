//! Slash command extraction from registration source files.
//!
//! This crate scans a command registration file (a script that calls
//! `SlashCommandParser.addCommandObject(SlashCommand.fromProps({ ... }))`
//! once per command) and collects the documentation-relevant parts of every
//! command into a [`CommandRegistry`]:
//!
//! - `// GROUP: <name>` comment lines assign commands to groups,
//! - `helpString` values become the command help (single-line strings
//!   verbatim, multi-line template blocks normalized),
//! - `SlashCommandNamedArgument.fromProps({...})` and
//!   `SlashCommandArgument.fromProps({...})` blocks become
//!   [`ArgumentDescriptor`](slashdoc_core::ArgumentDescriptor)s.
//!
//! Only these literal shapes are recognized; every other line is skipped.
//!
//! # Example
//!
//! ```
//! use slashdoc_extract::extract_commands;
//!
//! let source = "\
//! // GROUP: Math
//! SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'add',
//!     callback: (args, value) => add(value),
//!     unnamedArgumentList: [
//!         SlashCommandArgument.fromProps({
//!             description: 'the numbers to add',
//!             typeList: [ARGUMENT_TYPE.NUMBER],
//!             isRequired: true,
//!         }),
//!     ],
//!     helpString: 'Adds two numbers',
//! }));
//! ";
//!
//! let registry = extract_commands(source).unwrap();
//! let math = registry.group("Math").unwrap();
//! assert_eq!(math.commands[0].name, "add");
//! assert_eq!(math.commands[0].help, "Adds two numbers");
//! assert!(math.commands[0].unnamed[0].is_required);
//! ```
//!
//! [`CommandRegistry`]: slashdoc_core::CommandRegistry

mod descriptor;
mod error;
mod help;
pub mod literal;
mod patterns;
mod scanner;

use slashdoc_core::CommandRegistry;
use tracing::info;

pub use descriptor::TEMPLATE_DEFAULT_PLACEHOLDER;
pub use error::{ExtractError, Result};
pub use help::normalize_multiline_help;
pub use literal::{LiteralError, Value};
pub use scanner::{ArgumentKind, ScanOptions, SourceScanner};

/// Extracts all commands from `source` using the default options.
pub fn extract_commands(source: &str) -> Result<CommandRegistry> {
    extract_commands_with(source, &ScanOptions::default())
}

/// Extracts all commands from `source`.
///
/// Fails only when a recognized argument literal cannot be parsed or has a
/// known key of the wrong shape.
pub fn extract_commands_with(source: &str, options: &ScanOptions) -> Result<CommandRegistry> {
    let registry = SourceScanner::new(options).scan(source)?;
    info!(
        groups = registry.groups().len(),
        commands = registry.command_count(),
        "Extracted commands"
    );
    Ok(registry)
}
