use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use slashdoc_readme::{
    DEFAULT_BACKUP, DEFAULT_CONFIG, DEFAULT_README, DEFAULT_SOURCE, DocConfig, DumpFormat,
    Options, dump_registry, preview, regenerate,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// CLI-specific dump format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDumpFormat {
    Json,
    Yaml,
}

impl From<CliDumpFormat> for DumpFormat {
    fn from(fmt: CliDumpFormat) -> Self {
        match fmt {
            CliDumpFormat::Json => Self::Json,
            CliDumpFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "slashdoc", version)]
#[command(about = "Regenerate a slash command README from the command registration source")]
struct Cli {
    /// Directory the default file names are resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Command registration source (default: <root>/index.js).
    #[arg(long)]
    source: Option<PathBuf>,
    /// Document to regenerate (default: <root>/README.md).
    #[arg(long)]
    readme: Option<PathBuf>,
    /// Backup of the previous document (default: <root>/README.bak.md).
    #[arg(long)]
    backup: Option<PathBuf>,
    /// YAML settings file (default: <root>/slashdoc.yml, if present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail if the document on disk is not up to date. Writes nothing.
    #[arg(long, conflicts_with_all = ["stdout", "dump"])]
    check: bool,
    /// Print the regenerated document instead of writing it.
    #[arg(long, conflicts_with = "dump")]
    stdout: bool,
    /// Print the command registry (with recovered examples) and exit.
    #[arg(long, value_name = "FORMAT")]
    dump: Option<CliDumpFormat>,
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let options = build_options(&cli)?;

    if let Some(format) = cli.dump {
        let outcome = preview(&options).map_err(|e| e.to_string())?;
        let raw = dump_registry(&outcome.registry, format.into()).map_err(|e| e.to_string())?;
        print!("{raw}");
        return Ok(());
    }

    if cli.check {
        let outcome = preview(&options).map_err(|e| e.to_string())?;
        if outcome.changed {
            return Err(format!(
                "'{}' is out of date; run slashdoc to regenerate it",
                options.readme.display()
            ));
        }
        println!("'{}' is up to date.", options.readme.display());
        return Ok(());
    }

    if cli.stdout {
        let outcome = preview(&options).map_err(|e| e.to_string())?;
        print!("{}", outcome.document);
        return Ok(());
    }

    let outcome = regenerate(&options).map_err(|e| e.to_string())?;
    println!(
        "Wrote '{}': {} command(s) in {} group(s), {} example(s) kept. Backup at '{}'.",
        options.readme.display(),
        outcome.registry.command_count(),
        outcome.registry.groups().len(),
        outcome.recovered.examples,
        options.backup.display()
    );
    Ok(())
}

fn build_options(cli: &Cli) -> Result<Options, String> {
    let config = match &cli.config {
        Some(path) => DocConfig::load(path),
        None => DocConfig::load_or_default(cli.root.join(DEFAULT_CONFIG)),
    }
    .map_err(|e| e.to_string())?;

    Ok(Options {
        source: resolve(&cli.root, cli.source.as_deref(), DEFAULT_SOURCE),
        readme: resolve(&cli.root, cli.readme.as_deref(), DEFAULT_README),
        backup: resolve(&cli.root, cli.backup.as_deref(), DEFAULT_BACKUP),
        config,
    })
}

fn resolve(root: &Path, explicit: Option<&Path>, default_name: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => root.join(default_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_resolve_against_root() {
        let cli = Cli::parse_from(["slashdoc", "--root", "/nonexistent/ext"]);
        let options = build_options(&cli).unwrap();
        assert_eq!(options.source, Path::new("/nonexistent/ext/index.js"));
        assert_eq!(options.readme, Path::new("/nonexistent/ext/README.md"));
        assert_eq!(options.backup, Path::new("/nonexistent/ext/README.bak.md"));
        assert_eq!(options.config, DocConfig::default());
    }

    #[test]
    fn test_explicit_paths_win() {
        let cli = Cli::parse_from([
            "slashdoc",
            "--root",
            "/nonexistent/ext",
            "--source",
            "src/commands.js",
            "--backup",
            "/tmp/old.md",
        ]);
        let options = build_options(&cli).unwrap();
        assert_eq!(options.source, Path::new("src/commands.js"));
        assert_eq!(options.readme, Path::new("/nonexistent/ext/README.md"));
        assert_eq!(options.backup, Path::new("/tmp/old.md"));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let cli = Cli::parse_from(["slashdoc", "--config", "/nonexistent/slashdoc.yml"]);
        assert!(build_options(&cli).is_err());
    }

    #[test]
    fn test_check_conflicts_with_stdout() {
        assert!(Cli::try_parse_from(["slashdoc", "--check", "--stdout"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["slashdoc", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
