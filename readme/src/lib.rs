//! Markdown command reference generation.
//!
//! Turns the commands extracted by `slashdoc-extract` into a README while
//! carrying hand-written content forward from the previous version of the
//! document: the requirements prose and every fenced example.
//!
//! # Quick start
//!
//! ```no_run
//! use slashdoc_readme::{Options, regenerate};
//!
//! let outcome = regenerate(&Options::in_dir(".")).unwrap();
//! println!(
//!     "{} commands, {} examples kept",
//!     outcome.registry.command_count(),
//!     outcome.recovered.examples,
//! );
//! ```
//!
//! The lower-level passes are exposed as well: [`recover`] reads an old
//! document into a registry and [`render_document`] produces the new one.

mod config;
mod dump;
mod error;
mod pipeline;
mod recover;
mod render;

pub use config::DocConfig;
pub use dump::{DumpFormat, dump_registry};
pub use error::{RenderError, Result};
pub use pipeline::{
    DEFAULT_BACKUP, DEFAULT_CONFIG, DEFAULT_README, DEFAULT_SOURCE, Options, Outcome,
    extract_source, preview, regenerate,
};
pub use recover::{Recovered, recover};
pub use render::{named_argument_line, render_document, unnamed_argument_line};
