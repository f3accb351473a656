//! Line-oriented scanner over a command registration source.
//!
//! The scanner walks the source once, line by line. Group markers and
//! command-start markers are recognized in every state; everything else is
//! interpreted according to the current [`ScanState`]:
//!
//! ```text
//!            start marker                 multi-line help open
//!  Idle ───────────────────▶ Open ─────────────────────────────▶ Help
//!   ▲                        │  ▲                                  │
//!   │   single-line help     │  │ block terminator        `, line  │
//!   ├────────────────────────┘  │                                  │
//!   │                 argument  ▼                                  │
//!   │                 start ─▶ Argument                            │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines that match nothing expected in the current state are ignored.

use slashdoc_core::{ArgumentDescriptor, Command, CommandRegistry, DEFAULT_GROUP};
use tracing::{debug, trace, warn};

use crate::descriptor::descriptor_from_value;
use crate::error::{ExtractError, Result};
use crate::help::normalize_multiline_help;
use crate::literal::{balanced_object_len, parse_literal};
use crate::patterns::{PATTERNS, first_capture};

/// Options controlling a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Group for commands registered before any group marker.
    pub default_group: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            default_group: DEFAULT_GROUP.to_string(),
        }
    }
}

/// Whether an argument block declares a named or an unnamed argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Named,
    Unnamed,
}

/// Location of the open command inside the registry.
#[derive(Debug, Clone)]
struct CommandRef {
    group: String,
    index: usize,
}

#[derive(Debug)]
enum ScanState {
    /// No open command.
    Idle,
    /// A command is open and waiting for help text or arguments.
    Open(CommandRef),
    /// Collecting a multi-line help block.
    Help { command: CommandRef, text: String },
    /// Collecting an argument literal.
    Argument {
        command: CommandRef,
        kind: ArgumentKind,
        indent: usize,
        raw: String,
    },
}

/// Scanner for command registration sources.
pub struct SourceScanner {
    registry: CommandRegistry,
    group: String,
    state: ScanState,
}

impl SourceScanner {
    /// Creates a scanner with the given options.
    pub fn new(options: &ScanOptions) -> Self {
        Self {
            registry: CommandRegistry::new(),
            group: options.default_group.clone(),
            state: ScanState::Idle,
        }
    }

    /// Scans every line of `source` and returns the collected registry.
    pub fn scan(mut self, source: &str) -> Result<CommandRegistry> {
        for (idx, line) in source.lines().enumerate() {
            self.feed(idx + 1, line)?;
        }
        self.finish();
        Ok(self.registry)
    }

    /// Interprets one line.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<()> {
        if let Some(caps) = PATTERNS.group.captures(line) {
            self.group = caps[1].to_string();
            self.registry.ensure_group(&self.group);
            debug!(group = %self.group, line = line_no, "Group marker");
            return Ok(());
        }

        if let Some(name) = PATTERNS
            .command_start
            .captures(line)
            .and_then(|caps| first_capture(&caps).map(str::to_string))
        {
            if !matches!(self.state, ScanState::Idle | ScanState::Open(_)) {
                warn!(line = line_no, command = %name, "Command started inside an unterminated block");
            }
            let group = self.registry.ensure_group(&self.group);
            group.commands.push(Command::new(&name));
            let index = group.commands.len() - 1;
            debug!(group = %self.group, command = %name, line = line_no, "Command start");
            self.state = ScanState::Open(CommandRef {
                group: self.group.clone(),
                index,
            });
            return Ok(());
        }

        let state = std::mem::replace(&mut self.state, ScanState::Idle);
        self.state = match state {
            ScanState::Idle => {
                trace!(line = line_no, "Ignored line");
                ScanState::Idle
            }
            ScanState::Open(command) => self.on_open(line_no, line, command)?,
            ScanState::Help { command, mut text } => {
                let trimmed = line.trim_end();
                if let Some(last) = trimmed.strip_suffix("`,") {
                    text.push_str(last);
                    self.close_help(&command, &text);
                    ScanState::Idle
                } else {
                    text.push_str(line);
                    text.push('\n');
                    ScanState::Help { command, text }
                }
            }
            ScanState::Argument {
                command,
                kind,
                indent,
                mut raw,
            } => match PATTERNS.argument_stop.captures(line) {
                Some(caps) if caps[1].len() <= indent => {
                    raw.push('}');
                    self.push_argument(line_no, &command, kind, &raw)?;
                    ScanState::Open(command)
                }
                _ => {
                    raw.push_str(line);
                    raw.push('\n');
                    ScanState::Argument {
                        command,
                        kind,
                        indent,
                        raw,
                    }
                }
            },
        };
        Ok(())
    }

    fn on_open(&mut self, line_no: usize, line: &str, command: CommandRef) -> Result<ScanState> {
        if let Some(help) = PATTERNS
            .single_help
            .captures(line)
            .and_then(|caps| first_capture(&caps).map(str::to_string))
        {
            if let Some(cmd) = self.command_mut(&command) {
                debug!(command = %cmd.name, line = line_no, "Single-line help");
                cmd.help = help;
            }
            return Ok(ScanState::Idle);
        }

        if PATTERNS.multi_help_open.is_match(line) {
            return Ok(ScanState::Help {
                command,
                text: String::new(),
            });
        }

        let start = PATTERNS
            .named_start
            .captures(line)
            .map(|caps| (ArgumentKind::Named, caps))
            .or_else(|| {
                PATTERNS
                    .unnamed_start
                    .captures(line)
                    .map(|caps| (ArgumentKind::Unnamed, caps))
            });
        let Some((kind, caps)) = start else {
            return Ok(ScanState::Open(command));
        };

        let indent = caps[1].len();
        let body = &caps[2];
        if let Some(len) = balanced_object_len(body) {
            self.push_argument(line_no, &command, kind, &body[..len])?;
            return Ok(ScanState::Open(command));
        }

        let mut raw = body.to_string();
        raw.push('\n');
        Ok(ScanState::Argument {
            command,
            kind,
            indent,
            raw,
        })
    }

    fn close_help(&mut self, command: &CommandRef, text: &str) {
        if let Some(cmd) = self.command_mut(command) {
            cmd.help = normalize_multiline_help(text);
            debug!(command = %cmd.name, "Multi-line help");
        }
    }

    fn push_argument(
        &mut self,
        line_no: usize,
        command: &CommandRef,
        kind: ArgumentKind,
        raw: &str,
    ) -> Result<()> {
        let name = self
            .command_mut(command)
            .map(|cmd| cmd.name.clone())
            .unwrap_or_default();
        let value = parse_literal(raw).map_err(|source| ExtractError::Literal {
            line: line_no,
            command: name.clone(),
            source,
        })?;
        let descriptor: ArgumentDescriptor =
            descriptor_from_value(&value).map_err(|message| ExtractError::Field {
                line: line_no,
                command: name.clone(),
                message,
            })?;

        debug!(
            command = %name,
            kind = ?kind,
            argument = ?descriptor.name,
            line = line_no,
            "Argument"
        );
        if let Some(cmd) = self.command_mut(command) {
            match kind {
                ArgumentKind::Named => cmd.named.push(descriptor),
                ArgumentKind::Unnamed => cmd.unnamed.push(descriptor),
            }
        }
        Ok(())
    }

    fn command_mut(&mut self, command: &CommandRef) -> Option<&mut Command> {
        self.registry
            .group_mut(&command.group)
            .and_then(|group| group.commands.get_mut(command.index))
    }

    /// Handles blocks left open at end of input.
    fn finish(&mut self) {
        match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::Help { command, text } => {
                warn!(group = %command.group, "Source ended inside a multi-line help block");
                self.close_help(&command, &text);
            }
            ScanState::Argument { command, .. } => {
                warn!(group = %command.group, "Source ended inside an argument block; argument dropped");
            }
            ScanState::Idle | ScanState::Open(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> CommandRegistry {
        SourceScanner::new(&ScanOptions::default())
            .scan(source)
            .expect("source should scan")
    }

    const START: &str = "SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: ";

    fn start(name: &str) -> String {
        format!("{START}'{name}',")
    }

    #[test]
    fn test_commands_before_any_group_use_default_group() {
        let src = format!("{}\n    helpString: 'Echo.',\n}}));\n", start("echo"));
        let registry = scan(&src);
        assert_eq!(registry.group_names(), vec![DEFAULT_GROUP]);
        assert_eq!(registry.group(DEFAULT_GROUP).unwrap().commands[0].help, "Echo.");
    }

    #[test]
    fn test_revisited_group_keeps_commands() {
        let src = [
            "// GROUP: A".to_string(),
            start("one"),
            "// GROUP: B".to_string(),
            start("two"),
            "// GROUP: A".to_string(),
            start("three"),
        ]
        .join("\n");
        let registry = scan(&src);
        assert_eq!(registry.group_names(), vec!["A", "B"]);
        assert_eq!(registry.group("A").unwrap().command_names(), vec!["one", "three"]);
    }

    #[test]
    fn test_single_line_help_closes_command() {
        let src = [
            start("and"),
            "    helpString: 'Returns true if both are true.',".to_string(),
            "    unnamedArgumentList: [".to_string(),
            "        SlashCommandArgument.fromProps({ description: 'late' }),".to_string(),
            "    ],".to_string(),
        ]
        .join("\n");
        let registry = scan(&src);
        let cmd = &registry.group(DEFAULT_GROUP).unwrap().commands[0];
        assert_eq!(cmd.help, "Returns true if both are true.");
        assert!(cmd.unnamed.is_empty());
    }

    #[test]
    fn test_argument_block_terminates_at_matching_indent() {
        let src = [
            start("var"),
            "    namedArgumentList: [".to_string(),
            "        SlashCommandNamedArgument.fromProps({ name: 'key',".to_string(),
            "            typeList: [ARGUMENT_TYPE.VARIABLE_NAME],".to_string(),
            "            enumProvider: () => [".to_string(),
            "                SlashCommandEnumValue.fromProps({ value: 'x',".to_string(),
            "                }),".to_string(),
            "            ],".to_string(),
            "        }),".to_string(),
            "    ],".to_string(),
            "    helpString: 'Sets a variable.',".to_string(),
        ]
        .join("\n");
        let registry = scan(&src);
        let cmd = &registry.group(DEFAULT_GROUP).unwrap().commands[0];
        assert_eq!(cmd.named.len(), 1);
        assert_eq!(cmd.named[0].name.as_deref(), Some("key"));
        assert_eq!(cmd.help, "Sets a variable.");
    }

    #[test]
    fn test_comment_in_provider_callback() {
        let src = [
            "// GROUP:  Variables".to_string(),
            start("var"),
            "    namedArgumentList: [".to_string(),
            "        SlashCommandNamedArgument.fromProps({ name: 'key',".to_string(),
            "            enumProvider: () => { // don't list hidden ones".to_string(),
            "                return [];".to_string(),
            "            },".to_string(),
            "            isRequired: true,".to_string(),
            "        }),".to_string(),
            "    ],".to_string(),
            "    helpString: 'Sets a variable.',".to_string(),
        ]
        .join("\n");
        let registry = scan(&src);
        assert_eq!(registry.group_names(), vec!["Variables"]);
        let cmd = &registry.group("Variables").unwrap().commands[0];
        assert_eq!(cmd.named[0].name.as_deref(), Some("key"));
        assert!(cmd.named[0].is_required);
    }

    #[test]
    fn test_single_line_argument() {
        let src = [
            start("len"),
            "    unnamedArgumentList: [".to_string(),
            "        SlashCommandArgument.fromProps({ description: 'the value', isRequired: true }),"
                .to_string(),
            "        SlashCommandArgument.fromProps({ description: 'second' }),".to_string(),
            "    ],".to_string(),
        ]
        .join("\n");
        let registry = scan(&src);
        let cmd = &registry.group(DEFAULT_GROUP).unwrap().commands[0];
        assert_eq!(cmd.unnamed.len(), 2);
        assert!(cmd.unnamed[0].is_required);
        assert_eq!(cmd.unnamed[1].description.as_deref(), Some("second"));
    }

    #[test]
    fn test_malformed_argument_is_fatal() {
        let src = [
            start("bad"),
            "        SlashCommandNamedArgument.fromProps({ name: 'x'".to_string(),
            "            description: 'missing comma above',".to_string(),
            "        }),".to_string(),
        ]
        .join("\n");
        let err = SourceScanner::new(&ScanOptions::default())
            .scan(&src)
            .unwrap_err();
        match err {
            ExtractError::Literal { line, command, .. } => {
                assert_eq!(line, 4);
                assert_eq!(command, "bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_help_keeps_collected_text() {
        let src = [start("late"), "    helpString: `".to_string(), "        partial".to_string()]
            .join("\n");
        let registry = scan(&src);
        assert_eq!(registry.group(DEFAULT_GROUP).unwrap().commands[0].help, "partial");
    }

    #[test]
    fn test_custom_default_group() {
        let options = ScanOptions {
            default_group: "Misc".to_string(),
        };
        let registry = SourceScanner::new(&options).scan(&start("x")).unwrap();
        assert_eq!(registry.group_names(), vec!["Misc"]);
    }
}
