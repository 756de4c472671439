//! Command line arguments
//!
//! The historical interface uses single-dash long flags (`-id`, `-name`).
//! clap reads `-id` as `-i -d`, so those spellings are rewritten to their
//! double-dash form before parsing.

use clap::{ArgGroup, Parser, builder::NonEmptyStringValueParser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::{
    config::{ConsoleView, Settings},
    types::{ComputerId, Target},
};

const LEGACY_FLAGS: [&str; 2] = ["-id", "-name"];

/// Retrieve a FileVault 2 recovery key from Jamf Pro
#[derive(Debug, Parser)]
#[command(name = "keysword", author, version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "name"])))]
pub struct Cli {
    /// Computer ID (also accepted as -id)
    #[arg(long, value_name = "ID")]
    pub id: Option<ComputerId>,

    /// Computer name, resolved through the REST API (also accepted as -name)
    #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    pub name: Option<String>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Inventory page view that carries the session token and key marker
    #[arg(long, value_enum, value_name = "VIEW")]
    pub view: Option<ConsoleView>,

    /// Skip the FileVault key ID lookup before reading the key
    #[arg(long)]
    pub no_key_id: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse `std::env::args_os` after rewriting legacy flags
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The computer selected on the command line
    pub fn target(&self) -> crate::Result<Target> {
        match (&self.id, &self.name) {
            (Some(id), None) => Ok(Target::Id(id.clone())),
            (None, Some(name)) => Ok(Target::Name(name.clone())),
            _ => Err(crate::Error::config(
                "provide exactly one of -id or -name",
            )),
        }
    }

    /// Apply command line overrides on top of file and environment settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(view) = self.view {
            settings.console.view = view;
        }
        if self.no_key_id {
            settings.console.require_key_id = false;
        }
        if self.verbose {
            settings.logging.verbose = true;
        }
    }
}

/// Rewrite `-id`/`-name` (and `-id=42` style) into `--id`/`--name`.
///
/// Arguments after a `--` terminator are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                terminated = true;
                return arg;
            }
            let is_legacy = LEGACY_FLAGS.iter().any(|flag| {
                s == *flag
                    || s.strip_prefix(flag)
                        .is_some_and(|rest| rest.starts_with('='))
            });
            if is_legacy {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}
