//! Markdown generation.
//!
//! The layout is fixed: title and description, an index list of groups,
//! the preserved requirements prose, then one section per group with one
//! subsection per command. Spacing between sections is part of the format;
//! the recovery pass relies on headings starting at column 0.

use slashdoc_core::{ArgumentDescriptor, Command, CommandRegistry};

use crate::config::DocConfig;

const SECTION_GAP: &str = "\n\n\n\n\n\n";
const COMMAND_GAP: &str = "\n\n\n\n";

/// Renders the complete document.
///
/// `requirements` is inserted verbatim under the `## Requirements` heading.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{ArgumentDescriptor, Command, CommandRegistry};
/// use slashdoc_readme::{DocConfig, render_document};
///
/// let mut registry = CommandRegistry::new();
/// let mut add = Command::new("add");
/// add.help = "Adds two numbers".to_string();
/// add.unnamed.push(ArgumentDescriptor::unnamed().with_types(["ARGUMENT_TYPE.NUMBER"]).required());
/// registry.push_command("Math", add);
///
/// let doc = render_document(&registry, "", &DocConfig::default());
/// assert!(doc.contains("\n- Math (add)"));
/// assert!(doc.contains("#### `/add`\n- `(number)`\n\nAdds two numbers\n"));
/// ```
pub fn render_document(registry: &CommandRegistry, requirements: &str, config: &DocConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", config.title));
    out.push_str(&format!("{}\n\n", config.description));
    for group in registry.groups() {
        if config.is_excluded(&group.name) {
            continue;
        }
        out.push_str(&format!(
            "\n- {} ({})",
            group.name,
            group.command_names().join(", ")
        ));
    }

    out.push_str(SECTION_GAP);
    out.push_str("## Requirements\n\n");
    out.push_str(requirements);

    out.push_str(SECTION_GAP);
    out.push_str("## Commands\n\n");
    for group in registry.groups() {
        out.push_str(SECTION_GAP);
        out.push_str(&format!("### {}", group.name));
        for command in &group.commands {
            out.push_str(COMMAND_GAP);
            render_command(&mut out, command, config);
        }
    }

    out
}

fn render_command(out: &mut String, command: &Command, config: &DocConfig) {
    out.push_str(&format!("#### `/{}`\n", command.name));
    for arg in &command.named {
        out.push_str(&named_argument_line(arg));
    }
    for arg in &command.unnamed {
        out.push_str(&unnamed_argument_line(arg));
    }

    out.push('\n');
    out.push_str(&command.help);
    out.push_str("\n\n");
    out.push_str("##### Examples\n\n");

    let fence = format!("```{}\n", config.example_language);
    if command.examples.is_empty() {
        out.push_str(&fence);
        out.push_str(&config.example_placeholder);
        out.push_str("\n```\n\n");
    } else {
        for example in &command.examples {
            out.push_str(&fence);
            out.push_str(example);
            out.push_str("```\n\n");
        }
    }
}

/// Renders the bullet line for a named argument, including its trailing
/// newline.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{ArgumentDescriptor, EnumEntry};
/// use slashdoc_readme::named_argument_line;
///
/// let arg = ArgumentDescriptor::named("asList")
///     .with_description("whether to return the results as a list")
///     .with_types(["ARGUMENT_TYPE.BOOLEAN"])
///     .with_enum(EnumEntry::new("true"))
///     .with_enum(EnumEntry::new("false"))
///     .with_default("false");
/// assert_eq!(
///     named_argument_line(&arg),
///     "- `[asList=true|false]? = false`  \n *optional* whether to return the results as a list\n",
/// );
/// ```
pub fn named_argument_line(arg: &ArgumentDescriptor) -> String {
    let name = arg.name.as_deref().unwrap_or_default();
    let shape = if !arg.enum_list.is_empty() {
        format!("{name}={}", arg.enum_values().join("|"))
    } else {
        let types = arg.type_names(false);
        if types.is_empty() {
            name.to_string()
        } else {
            format!("{name}:{}", types.join("|"))
        }
    };
    argument_line(&format!("[{shape}]"), arg)
}

/// Renders the bullet line for an unnamed argument, including its trailing
/// newline.
pub fn unnamed_argument_line(arg: &ArgumentDescriptor) -> String {
    let shape = if !arg.enum_list.is_empty() {
        format!("={}", arg.enum_values().join("|"))
    } else {
        arg.type_names(true).join("|")
    };
    argument_line(&format!("({shape})"), arg)
}

fn argument_line(shape: &str, arg: &ArgumentDescriptor) -> String {
    let mut line = format!("- `{shape}");
    if !arg.is_required {
        line.push('?');
    }
    if let Some(default) = arg.displayed_default() {
        line.push_str(&format!(" = {default}"));
    }
    line.push('`');
    if let Some(description) = arg.displayed_description() {
        let optional = if arg.is_required { "" } else { "*optional* " };
        line.push_str(&format!("  \n {optional}{description}"));
    }
    line.push('\n');
    line
}
