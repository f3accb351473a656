//! Recovery of hand-written content from a previously generated document.
//!
//! Only two things survive a regeneration: the prose under
//! `## Requirements` and the fenced examples under each command heading.
//! Everything else is regenerated from the source. A legacy usage line
//! directly under a command heading is also picked up and kept on the model.
//!
//! Between a command heading and its `##### Examples` line (or first fence)
//! the text is help, so a heading there only counts as outline when it names
//! a known group or has the generated ``#### `/name` `` form.

use slashdoc_core::{Command, CommandRegistry};
use tracing::{debug, trace, warn};

use crate::config::DocConfig;
use crate::error::{RenderError, Result};

/// Content carried forward from the old document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recovered {
    /// Non-blank lines of the requirements section, with their line endings.
    pub requirements: String,
    /// Number of examples attached to commands.
    pub examples: usize,
    /// Number of command headings matched against the registry.
    pub commands: usize,
}

/// Position in the document outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecoverState {
    /// Before `## Requirements`.
    Preamble,
    /// Inside the requirements section.
    Requirements,
    /// After the requirements section.
    Body,
}

/// Location of the command whose section is being read.
#[derive(Debug, Clone)]
struct Cursor {
    group: String,
    command: String,
    /// Still waiting for the first non-blank line under the heading.
    awaiting_usage: bool,
    /// Reading help text, before `##### Examples` or the first fence.
    in_help: bool,
}

struct Recovery<'a> {
    registry: &'a mut CommandRegistry,
    config: &'a DocConfig,
    state: RecoverState,
    group: Option<String>,
    cursor: Option<Cursor>,
    /// Body of the example being captured, `None` outside a fence.
    fence: Option<String>,
    recovered: Recovered,
}

/// Reads `old_doc` and attaches its examples and usage lines to the
/// matching commands in `registry`.
///
/// # Errors
///
/// Returns [`RenderError::UnknownCommand`] when a command heading names a
/// group or command the registry does not contain.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{Command, CommandRegistry};
/// use slashdoc_readme::{DocConfig, recover};
///
/// let mut registry = CommandRegistry::new();
/// registry.push_command("Math", Command::new("add"));
///
/// let old = "## Requirements\n\n- nothing\n\n## Commands\n\n### Math\n\n#### `/add`\n\n```stscript\n/add 1 2\n```\n";
/// let recovered = recover(&mut registry, old, &DocConfig::default()).unwrap();
///
/// assert_eq!(recovered.requirements, "- nothing\n");
/// assert_eq!(registry.group("Math").unwrap().commands[0].examples, vec!["/add 1 2\n"]);
/// ```
pub fn recover(registry: &mut CommandRegistry, old_doc: &str, config: &DocConfig) -> Result<Recovered> {
    let mut recovery = Recovery {
        registry,
        config,
        state: RecoverState::Preamble,
        group: None,
        cursor: None,
        fence: None,
        recovered: Recovered::default(),
    };

    for (idx, raw) in old_doc.split_inclusive('\n').enumerate() {
        recovery.feed(idx + 1, raw)?;
    }

    if recovery.fence.is_some() {
        warn!("Document ends inside an example block, dropping it");
    }
    debug!(
        commands = recovery.recovered.commands,
        examples = recovery.recovered.examples,
        "Recovered document content"
    );
    Ok(recovery.recovered)
}

impl Recovery<'_> {
    fn feed(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let line = raw.trim_end_matches(['\n', '\r']);

        match self.state {
            RecoverState::Preamble if line.starts_with("## Requirements") => {
                self.state = RecoverState::Requirements;
                Ok(())
            }
            RecoverState::Requirements => {
                if line.starts_with("## ") {
                    self.state = RecoverState::Body;
                } else if !line.trim().is_empty() {
                    self.recovered.requirements.push_str(raw);
                }
                Ok(())
            }
            RecoverState::Preamble | RecoverState::Body => self.feed_outline(line_no, line, raw),
        }
    }

    fn feed_outline(&mut self, line_no: usize, line: &str, raw: &str) -> Result<()> {
        if self.cursor.is_some() {
            if self.config.is_fence(line) {
                self.toggle_fence();
                return Ok(());
            }
            if let Some(body) = self.fence.as_mut() {
                body.push_str(raw);
                return Ok(());
            }
        }

        let in_help = self.cursor.as_ref().is_some_and(|c| c.in_help);
        if in_help && line.starts_with("##### ") {
            if let Some(cursor) = self.cursor.as_mut() {
                cursor.in_help = false;
            }
        }

        if !in_help || self.is_outline_heading(line) {
            if let Some(group) = line.strip_prefix("### ") {
                let group = group.trim();
                trace!(group, line = line_no, "Group heading");
                self.group = Some(group.to_string());
                self.cursor = None;
                return Ok(());
            }

            if let Some(heading) = line.strip_prefix("#### ") {
                return self.open_command(line_no, heading);
            }
        } else if line.starts_with("### ") || line.starts_with("#### ") {
            trace!(line = line_no, "Heading inside help text");
        }

        let is_usage = match self.cursor.as_mut() {
            Some(cursor) if cursor.awaiting_usage && !line.trim().is_empty() => {
                cursor.awaiting_usage = false;
                line.starts_with('`') && !line.starts_with("``")
            }
            _ => false,
        };
        if is_usage {
            if let Some(command) = self.current_command() {
                debug!(command = %command.name, "Recovered usage line");
                command.args = Some(line.to_string());
            }
        }
        Ok(())
    }

    fn open_command(&mut self, line_no: usize, heading: &str) -> Result<()> {
        self.cursor = None;

        let Some(group) = self.group.clone() else {
            trace!(line = line_no, "Command heading outside any group");
            return Ok(());
        };
        let Some(token) = heading.split('`').nth(1) else {
            trace!(line = line_no, "Command heading without a command token");
            return Ok(());
        };
        let name = token.strip_prefix('/').unwrap_or(token);

        let known = self
            .registry
            .group(&group)
            .is_some_and(|g| g.find(name).is_some());
        if !known {
            return Err(RenderError::UnknownCommand {
                group,
                command: name.to_string(),
            });
        }

        trace!(group = %group, command = name, line = line_no, "Command heading");
        self.recovered.commands += 1;
        self.cursor = Some(Cursor {
            group,
            command: name.to_string(),
            awaiting_usage: true,
            in_help: true,
        });
        Ok(())
    }

    /// Whether a heading met inside help text still belongs to the outline.
    fn is_outline_heading(&self, line: &str) -> bool {
        if let Some(group) = line.strip_prefix("### ") {
            return self.registry.group(group.trim()).is_some();
        }
        if let Some(heading) = line.strip_prefix("#### ") {
            let heading = heading.trim();
            return heading.len() > 2 && heading.starts_with("`/") && heading.ends_with('`');
        }
        false
    }

    fn toggle_fence(&mut self) {
        match self.fence.take() {
            None => self.fence = Some(String::new()),
            Some(body) => {
                if let Some(command) = self.current_command() {
                    command.examples.push(body);
                    self.recovered.examples += 1;
                }
            }
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.awaiting_usage = false;
            cursor.in_help = false;
        }
    }

    fn current_command(&mut self) -> Option<&mut Command> {
        let cursor = self.cursor.as_ref()?;
        self.registry
            .group_mut(&cursor.group)?
            .find_mut(&cursor.command)
    }
}
