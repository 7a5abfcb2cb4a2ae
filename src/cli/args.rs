// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// convlint - Conventional commit message linter
///
/// Reads a commit message from a file, standard input, git's
/// COMMIT_EDITMSG or existing history, and reports every rule it breaks.
#[derive(Parser, Debug)]
#[command(name = "convlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the implicit lint command
    #[command(flatten)]
    pub lint: LintArgs,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CONVLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Only report messages with violations
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// One JSON record per message
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message (default command)
    Lint(LintArgs),

    /// Lint commits from git history
    Check(CheckArgs),

    /// Print the effective configuration
    Rules,

    /// Write an example configuration file
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Args, Debug, Default, Clone)]
pub struct LintArgs {
    /// Message file to lint; reads stdin when absent or "-"
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Lint the message git is editing (.git/COMMIT_EDITMSG unless PATH is given)
    #[arg(short, long, value_name = "PATH", conflicts_with = "file")]
    pub edit: Option<Option<PathBuf>>,
}

/// Arguments for the check command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Revision or A..B range to lint
    #[arg(default_value = "HEAD", conflicts_with = "from")]
    pub target: String,

    /// Lint commits after this revision (exclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Lint commits up to this revision (default: HEAD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl CheckArgs {
    /// The revision range this command covers.
    pub fn range(&self) -> String {
        match self.from {
            Some(ref from) => format!("{}..{}", from, self.to.as_deref().unwrap_or("HEAD")),
            None => self.target.clone(),
        }
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            target: "HEAD".to_string(),
            from: None,
            to: None,
        }
    }
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,

    /// Where to write the configuration
    #[arg(long, default_value = "convlint.toml")]
    pub path: PathBuf,
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Lint(self.lint.clone()))
    }
}
