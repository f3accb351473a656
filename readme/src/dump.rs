//! Machine-readable output of an extracted registry.

use slashdoc_core::CommandRegistry;

use crate::error::Result;

/// Serialization format for [`dump_registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Yaml,
}

/// Serializes `registry` as a list of groups.
///
/// JSON output is pretty-printed and ends with a newline.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{Command, CommandRegistry};
/// use slashdoc_readme::{DumpFormat, dump_registry};
///
/// let mut registry = CommandRegistry::new();
/// registry.push_command("Math", Command::new("add"));
///
/// let yaml = dump_registry(&registry, DumpFormat::Yaml).unwrap();
/// assert!(yaml.contains("name: Math"));
/// ```
pub fn dump_registry(registry: &CommandRegistry, format: DumpFormat) -> Result<String> {
    match format {
        DumpFormat::Json => {
            let mut raw = serde_json::to_string_pretty(registry)?;
            raw.push('\n');
            Ok(raw)
        }
        DumpFormat::Yaml => Ok(serde_yaml::to_string(registry)?),
    }
}

#[cfg(test)]
mod tests {
    use slashdoc_core::{ArgumentDescriptor, Command};

    use super::*;

    #[test]
    fn test_json_dump_reads_back() {
        let mut registry = CommandRegistry::new();
        let add = registry.push_command("Math", Command::new("add"));
        add.unnamed.push(ArgumentDescriptor::unnamed().required());
        add.examples.push("/add 1 2\n".to_string());

        let raw = dump_registry(&registry, DumpFormat::Json).unwrap();
        assert!(raw.ends_with("]\n"));
        let back: CommandRegistry = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, registry);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert_eq!(dump_registry(&registry, DumpFormat::Json).unwrap(), "[]\n");
    }
}
