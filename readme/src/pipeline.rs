//! End-to-end regeneration: extract, back up, recover, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use slashdoc_core::CommandRegistry;
use slashdoc_extract::{ScanOptions, extract_commands_with};
use tracing::info;

use crate::config::DocConfig;
use crate::error::{RenderError, Result};
use crate::recover::{Recovered, recover};
use crate::render::render_document;

/// Default name of the command registration source.
pub const DEFAULT_SOURCE: &str = "index.js";
/// Default name of the generated document.
pub const DEFAULT_README: &str = "README.md";
/// Default name of the backup written before the document is replaced.
pub const DEFAULT_BACKUP: &str = "README.bak.md";
/// Default name of the optional configuration file.
pub const DEFAULT_CONFIG: &str = "slashdoc.yml";

/// Files and settings for one regeneration.
#[derive(Debug, Clone)]
pub struct Options {
    pub source: PathBuf,
    pub readme: PathBuf,
    pub backup: PathBuf,
    pub config: DocConfig,
}

impl Options {
    /// Uses the default file names inside `root` and the default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use slashdoc_readme::Options;
    ///
    /// let options = Options::in_dir("ext");
    /// assert_eq!(options.source, Path::new("ext/index.js"));
    /// assert_eq!(options.backup, Path::new("ext/README.bak.md"));
    /// ```
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            source: root.join(DEFAULT_SOURCE),
            readme: root.join(DEFAULT_README),
            backup: root.join(DEFAULT_BACKUP),
            config: DocConfig::default(),
        }
    }
}

/// Result of a regeneration or preview.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Commands from the source, with recovered examples attached.
    pub registry: CommandRegistry,
    /// What was carried over from the old document.
    pub recovered: Recovered,
    /// The rendered document.
    pub document: String,
    /// Whether `document` differs from the document that was on disk.
    pub changed: bool,
}

/// Regenerates the document in place.
///
/// The source is extracted completely before anything is written, and the
/// old document is copied to the backup path (overwriting it) before it is
/// replaced. Any failure leaves the document untouched.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if a file cannot be read, copied or written,
/// [`RenderError::Extract`] if the source cannot be extracted, or
/// [`RenderError::UnknownCommand`] if the old document documents a command
/// the source no longer declares.
pub fn regenerate(options: &Options) -> Result<Outcome> {
    let registry = extract_source(&options.source, &options.config)?;

    fs::copy(&options.readme, &options.backup).map_err(|e| RenderError::io(&options.readme, e))?;
    info!(backup = %options.backup.display(), "Backup written");

    let outcome = render_over(registry, &options.readme, &options.config)?;
    fs::write(&options.readme, &outcome.document)
        .map_err(|e| RenderError::io(&options.readme, e))?;
    info!(
        readme = %options.readme.display(),
        changed = outcome.changed,
        "Document written"
    );
    Ok(outcome)
}

/// Renders the document that [`regenerate`] would write, without touching
/// any file.
pub fn preview(options: &Options) -> Result<Outcome> {
    let registry = extract_source(&options.source, &options.config)?;
    render_over(registry, &options.readme, &options.config)
}

/// Reads and extracts the command source.
pub fn extract_source(path: &Path, config: &DocConfig) -> Result<CommandRegistry> {
    let source = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
    let scan = ScanOptions {
        default_group: config.default_group.clone(),
    };
    let registry = extract_commands_with(&source, &scan)?;
    info!(
        source = %path.display(),
        commands = registry.command_count(),
        "Source extracted"
    );
    Ok(registry)
}

fn render_over(mut registry: CommandRegistry, readme: &Path, config: &DocConfig) -> Result<Outcome> {
    let old = fs::read_to_string(readme).map_err(|e| RenderError::io(readme, e))?;
    let recovered = recover(&mut registry, &old, config)?;
    let document = render_document(&registry, &recovered.requirements, config);
    let changed = document != old;
    Ok(Outcome {
        registry,
        recovered,
        document,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
// GROUP: Math
SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'add',
    unnamedArgumentList: [
        SlashCommandArgument.fromProps({
            description: 'the numbers to add',
            typeList: [ARGUMENT_TYPE.NUMBER],
            isRequired: true,
        }),
    ],
    helpString: 'Adds two numbers',
}));
";

    const OLD_README: &str = "# LALib\n\n## Requirements\n\n- SillyTavern\n\n## Commands\n\n### Math\n\n#### `/add`\n\n```stscript\n/add 1 2\n```\n";

    fn setup(readme: Option<&str>) -> (tempfile::TempDir, Options) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_SOURCE), SOURCE).unwrap();
        if let Some(readme) = readme {
            fs::write(dir.path().join(DEFAULT_README), readme).unwrap();
        }
        let options = Options::in_dir(dir.path());
        (dir, options)
    }

    #[test]
    fn test_regenerate_writes_document_and_backup() {
        let (_dir, options) = setup(Some(OLD_README));

        let outcome = regenerate(&options).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.recovered.examples, 1);

        let written = fs::read_to_string(&options.readme).unwrap();
        assert_eq!(written, outcome.document);
        assert!(written.contains("- SillyTavern\n"));
        assert!(written.contains("- `(number)`  \n the numbers to add\n"));
        assert!(written.contains("```stscript\n/add 1 2\n```\n\n"));
        assert_eq!(fs::read_to_string(&options.backup).unwrap(), OLD_README);
    }

    #[test]
    fn test_regenerate_is_idempotent() {
        let (_dir, options) = setup(Some(OLD_README));

        let first = regenerate(&options).unwrap();
        let second = regenerate(&options).unwrap();
        assert!(!second.changed);
        assert_eq!(first.document, second.document);
        assert_eq!(fs::read_to_string(&options.backup).unwrap(), first.document);
    }

    #[test]
    fn test_padded_group_marker_is_idempotent() {
        let (dir, options) = setup(Some(OLD_README));
        fs::write(
            dir.path().join(DEFAULT_SOURCE),
            SOURCE.replace("// GROUP: Math", "// GROUP:  Math  "),
        )
        .unwrap();

        let first = regenerate(&options).unwrap();
        assert!(first.document.contains("\n### Math\n"));
        let second = regenerate(&options).unwrap();
        assert!(!second.changed);
        assert_eq!(first.document, second.document);
    }

    #[test]
    fn test_headings_in_help_survive_regeneration() {
        let (dir, options) = setup(Some(OLD_README));
        fs::write(
            dir.path().join(DEFAULT_SOURCE),
            "// GROUP: Math
SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'add',
    helpString: `
        Adds numbers.
        ### Details
        #### Notes
    `,
}));
",
        )
        .unwrap();

        let first = regenerate(&options).unwrap();
        assert!(first.document.contains("Adds numbers.\n### Details\n#### Notes\n"));
        let second = regenerate(&options).unwrap();
        assert!(!second.changed);
        assert_eq!(second.recovered.examples, 1);
        assert!(second.document.contains("```stscript\n/add 1 2\n```\n\n"));
    }

    #[test]
    fn test_missing_readme_is_fatal() {
        let (_dir, options) = setup(None);
        let err = regenerate(&options).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(!options.backup.exists());
        assert!(!options.readme.exists());
    }

    #[test]
    fn test_unknown_command_leaves_document_untouched() {
        let old = "### Math\n#### `/mul`\n";
        let (_dir, options) = setup(Some(old));

        let err = regenerate(&options).unwrap_err();
        assert!(matches!(err, RenderError::UnknownCommand { .. }));
        assert_eq!(fs::read_to_string(&options.readme).unwrap(), old);
    }

    #[test]
    fn test_extraction_failure_happens_before_backup() {
        let (dir, options) = setup(Some(OLD_README));
        fs::write(
            dir.path().join(DEFAULT_SOURCE),
            "// GROUP: Math\n\
SlashCommandParser.addCommandObject(SlashCommand.fromProps({ name: 'add',\n\
    unnamedArgumentList: [\n\
        SlashCommandArgument.fromProps({\n\
            isRequired: 'yes',\n\
        }),\n",
        )
        .unwrap();

        let err = regenerate(&options).unwrap_err();
        assert!(matches!(err, RenderError::Extract(_)));
        assert!(!options.backup.exists());
    }

    #[test]
    fn test_preview_writes_nothing() {
        let (_dir, options) = setup(Some(OLD_README));

        let outcome = preview(&options).unwrap();
        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&options.readme).unwrap(), OLD_README);
        assert!(!options.backup.exists());
    }
}
