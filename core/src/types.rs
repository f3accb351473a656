//! Command type definitions.
//!
//! These types model one slash command as it is registered in a command
//! source file: its identifier, help text, named and unnamed argument
//! descriptors, and the examples preserved from the previous document
//! revision. All types serialize with [`serde`] so an extracted registry can
//! be dumped as JSON or YAML.

use serde::{Deserialize, Serialize};

/// Type tag used for unnamed arguments that declare no type list.
pub const DEFAULT_UNNAMED_TYPE: &str = "string";

/// One allowed value of an enumerated argument.
///
/// Registration files list enum values either as bare strings or as
/// constructor calls carrying a description. Only [`value`](Self::value) is
/// rendered in argument signatures.
///
/// # Examples
///
/// ```
/// use slashdoc_core::EnumEntry;
///
/// let bare = EnumEntry::new("true");
/// assert!(bare.description.is_none());
///
/// let described = EnumEntry::new("gt").with_description("a > b");
/// assert_eq!(described.description.as_deref(), Some("a > b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// The literal value accepted by the argument.
    pub value: String,
    /// Optional explanation attached to the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumEntry {
    /// Creates an entry without a description.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Descriptor of a named or unnamed command argument.
///
/// Every key a registration literal may carry has its own field. Absent keys
/// fall back to the documented defaults:
///
/// | Field | Default |
/// |-------|---------|
/// | `name` | `None` (unnamed arguments usually have none) |
/// | `description` | `None`, no description line is rendered |
/// | `type_list` | `None`, see [`effective_types`](Self::effective_types) |
/// | `is_required` | `false` |
/// | `accepts_multiple` | `false` |
/// | `default_value` | `None` |
/// | `enum_list` | empty |
///
/// # Examples
///
/// ```
/// use slashdoc_core::{ArgumentDescriptor, EnumEntry};
///
/// let rule = ArgumentDescriptor::named("rule")
///     .with_description("the boolean operation rule")
///     .with_types(["ARGUMENT_TYPE.STRING"])
///     .with_enum(EnumEntry::new("gt").with_description("a > b"))
///     .required();
///
/// assert!(rule.is_required);
/// assert_eq!(rule.enum_values(), vec!["gt"]);
/// assert_eq!(rule.type_names(false), vec!["string"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    /// Keyword the argument is passed by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw type tags as written in the source (e.g. `ARGUMENT_TYPE.NUMBER`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_list: Option<Vec<String>>,
    /// Whether the argument must be supplied.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the argument may be supplied more than once.
    #[serde(default)]
    pub accepts_multiple: bool,
    /// Default value, already reduced to displayable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Allowed values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_list: Vec<EnumEntry>,
}

impl ArgumentDescriptor {
    /// Creates a descriptor for a named argument.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Creates a descriptor for an unnamed (positional) argument.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the type list.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_list = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Appends an enum entry.
    pub fn with_enum(mut self, entry: EnumEntry) -> Self {
        self.enum_list.push(entry);
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Returns the raw type tags, applying the unnamed-argument fallback.
    ///
    /// Unnamed arguments without a type list are treated as a single
    /// [`DEFAULT_UNNAMED_TYPE`]; named arguments without one have no types.
    pub fn effective_types(&self, unnamed: bool) -> Vec<&str> {
        match &self.type_list {
            Some(types) => types.iter().map(String::as_str).collect(),
            None if unnamed => vec![DEFAULT_UNNAMED_TYPE],
            None => Vec::new(),
        }
    }

    /// Returns display names of the types: the last `.`-separated segment of
    /// each tag, lower-cased.
    ///
    /// # Examples
    ///
    /// ```
    /// use slashdoc_core::ArgumentDescriptor;
    ///
    /// let arg = ArgumentDescriptor::unnamed()
    ///     .with_types(["ARGUMENT_TYPE.VARIABLE_NAME", "ARGUMENT_TYPE.NUMBER"]);
    /// assert_eq!(arg.type_names(true), vec!["variable_name", "number"]);
    ///
    /// assert_eq!(ArgumentDescriptor::unnamed().type_names(true), vec!["string"]);
    /// ```
    pub fn type_names(&self, unnamed: bool) -> Vec<String> {
        self.effective_types(unnamed)
            .into_iter()
            .map(|tag| tag.rsplit('.').next().unwrap_or(tag).to_lowercase())
            .collect()
    }

    /// Returns the primary value of every enum entry, in order.
    pub fn enum_values(&self) -> Vec<&str> {
        self.enum_list.iter().map(|e| e.value.as_str()).collect()
    }

    /// Returns the default value if it is present and non-empty.
    pub fn displayed_default(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }

    /// Returns the description if it is present and non-empty.
    pub fn displayed_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// A single slash command extracted from the source file.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{ArgumentDescriptor, Command};
///
/// let mut cmd = Command::new("add");
/// cmd.help = "Adds two numbers".into();
/// cmd.unnamed.push(
///     ArgumentDescriptor::unnamed()
///         .with_types(["ARGUMENT_TYPE.NUMBER"])
///         .required(),
/// );
///
/// assert_eq!(cmd.name, "add");
/// assert_eq!(cmd.argument_count(), 1);
/// assert!(cmd.examples.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Identifier the command is invoked by (without the leading slash).
    pub name: String,
    /// Legacy single-line usage signature recovered from an older document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Help text.
    #[serde(default)]
    pub help: String,
    /// Arguments passed by keyword.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<ArgumentDescriptor>,
    /// Arguments identified by position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unnamed: Vec<ArgumentDescriptor>,
    /// Example snippets preserved from the previous document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl Command {
    /// Creates an empty command with the given identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Total number of declared arguments.
    pub fn argument_count(&self) -> usize {
        self.named.len() + self.unnamed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_without_types_has_no_type_names() {
        let arg = ArgumentDescriptor::named("var");
        assert!(arg.type_names(false).is_empty());
        assert!(arg.effective_types(false).is_empty());
    }

    #[test]
    fn test_unnamed_without_types_falls_back_to_string() {
        let arg = ArgumentDescriptor::unnamed();
        assert_eq!(arg.effective_types(true), vec![DEFAULT_UNNAMED_TYPE]);
    }

    #[test]
    fn test_plain_type_tag_is_lowercased() {
        let arg = ArgumentDescriptor::unnamed().with_types(["STRING"]);
        assert_eq!(arg.type_names(true), vec!["string"]);
    }

    #[test]
    fn test_empty_default_and_description_are_hidden() {
        let arg = ArgumentDescriptor::named("glue")
            .with_default("")
            .with_description("");
        assert_eq!(arg.displayed_default(), None);
        assert_eq!(arg.displayed_description(), None);
    }

    #[test]
    fn test_descriptor_defaults_when_deserialized_sparse() {
        let arg: ArgumentDescriptor =
            serde_json::from_str(r#"{"name":"left"}"#).expect("sparse descriptor");
        assert_eq!(arg.name.as_deref(), Some("left"));
        assert!(!arg.is_required);
        assert!(!arg.accepts_multiple);
        assert!(arg.enum_list.is_empty());
        assert!(arg.type_list.is_none());
    }

    #[test]
    fn test_command_serializes_without_empty_lists() {
        let cmd = Command::new("trim");
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(!json.contains("named"));
        assert!(!json.contains("examples"));
        assert!(json.contains("\"name\":\"trim\""));
    }
}
