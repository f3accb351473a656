//! Line patterns recognized in command registration sources.

use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for the literal shapes of a registration file.
pub(crate) static PATTERNS: LazyLock<SourcePatterns> = LazyLock::new(SourcePatterns::new);

pub(crate) struct SourcePatterns {
    // Structure markers
    pub(crate) group: Regex,
    pub(crate) command_start: Regex,

    // Help strings
    pub(crate) single_help: Regex,
    pub(crate) multi_help_open: Regex,

    // Argument blocks
    pub(crate) named_start: Regex,
    pub(crate) unnamed_start: Regex,
    pub(crate) argument_stop: Regex,

    // Help cleanup
    pub(crate) example_callout: Regex,
}

impl SourcePatterns {
    fn new() -> Self {
        Self {
            // // GROUP: List Operations
            group: Regex::new(r"^// GROUP:\s*(\S.*?)\s*$").expect("static regex must compile"),
            // SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'test',
            command_start: Regex::new(
                r#"^SlashCommandParser\.addCommandObject\(SlashCommand\.fromProps\(\{\s*name:\s*(?:'([^']+)'|"([^"]+)"),\s*$"#,
            )
            .expect("static regex must compile"),

            // helpString: 'Returns a shuffled list.',
            single_help: Regex::new(
                r#"^\s*helpString:\s*(?:'(.*)'|"(.*)"|`(.+)`),\s*$"#,
            )
            .expect("static regex must compile"),
            // helpString: `
            multi_help_open: Regex::new(r"^\s*helpString:\s*`\s*$").expect("static regex must compile"),

            // SlashCommandNamedArgument.fromProps({ name: 'left',
            named_start: Regex::new(r"^(\s*)SlashCommandNamedArgument\.fromProps\((\{.*)$")
                .expect("static regex must compile"),
            // SlashCommandArgument.fromProps({
            unnamed_start: Regex::new(r"^(\s*)SlashCommandArgument\.fromProps\((\{.*)$")
                .expect("static regex must compile"),
            // }),
            argument_stop: Regex::new(r"^(\s*)\}\),\s*$").expect("static regex must compile"),

            // <div>\n<strong>Example:</strong> ... </div>
            example_callout: Regex::new(r"(?s)\s*<div>\n\s*<strong>Example.+?</div>")
                .expect("static regex must compile"),
        }
    }
}

/// Returns the first participating capture group of a match.
pub(crate) fn first_capture<'t>(caps: &regex::Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_marker() {
        let caps = PATTERNS.group.captures("// GROUP: Boolean Operations").unwrap();
        assert_eq!(&caps[1], "Boolean Operations");
        let caps = PATTERNS.group.captures("// GROUP:  Math \t").unwrap();
        assert_eq!(&caps[1], "Math");
        assert!(!PATTERNS.group.is_match("  // GROUP: Indented"));
        assert!(!PATTERNS.group.is_match("// group: lower"));
    }

    #[test]
    fn test_command_start_requires_line_end_after_name() {
        let line = "SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'lalib?',";
        let caps = PATTERNS.command_start.captures(line).unwrap();
        assert_eq!(first_capture(&caps), Some("lalib?"));

        let inline = "SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'x', callback: f,";
        assert!(!PATTERNS.command_start.is_match(inline));
    }

    #[test]
    fn test_single_help_quotes() {
        for (line, expected) in [
            ("    helpString: 'Pretty print JSON.',", "Pretty print JSON."),
            (r#"    helpString: "Language defaults to 'en'.","#, "Language defaults to 'en'."),
            ("    helpString: `Use <code>x</code>`,", "Use <code>x</code>"),
        ] {
            let caps = PATTERNS.single_help.captures(line).unwrap();
            assert_eq!(first_capture(&caps), Some(expected));
        }
    }

    #[test]
    fn test_multi_help_open_is_not_single_help() {
        let line = "    helpString: `";
        assert!(PATTERNS.multi_help_open.is_match(line));
        assert!(!PATTERNS.single_help.is_match(line));
    }

    #[test]
    fn test_argument_patterns() {
        let named = "        SlashCommandNamedArgument.fromProps({ name: 'left',";
        let caps = PATTERNS.named_start.captures(named).unwrap();
        assert_eq!(&caps[1], "        ");
        assert_eq!(&caps[2], "{ name: 'left',");

        assert!(PATTERNS.unnamed_start.is_match("        SlashCommandArgument.fromProps({"));
        assert!(!PATTERNS.unnamed_start.is_match(named));

        let stop = PATTERNS.argument_stop.captures("        }),").unwrap();
        assert_eq!(caps_len(&stop), 8);
    }

    fn caps_len(caps: &regex::Captures<'_>) -> usize {
        caps.get(1).map_or(0, |m| m.as_str().len())
    }
}
