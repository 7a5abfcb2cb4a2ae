// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::Path;

use crate::config::LintConfig;
use crate::error::{ConfigError, LintError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, ValidationResult};

use super::args::{CheckArgs, Cli, Commands, InitArgs, LintArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Commands that never read the rule table
    match cli.effective_command() {
        Commands::Version => return run_version(),
        Commands::Init(args) => return run_init(args),
        _ => {}
    }

    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };

    if !config.output.color {
        console::set_colors_enabled(false);
    }

    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, config, args),
        Commands::Check(args) => run_check(&cli, config, args),
        Commands::Rules => run_rules(&config),
        Commands::Version | Commands::Init(_) => Ok(()),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: LintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let message = read_message(&args)?;
    let engine = RuleEngine::new(config)?;
    let result = engine.lint(&message);

    report(cli, &engine, &[result])
}

/// Run the check command.
fn run_check(cli: &Cli, config: LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::new(config)?;
    let range = args.range();

    let results = if range.contains("..") {
        engine.check_range(&range)?
    } else {
        vec![engine.check_commit(&range)?]
    };

    report(cli, &engine, &results)
}

/// Print the effective configuration.
fn run_rules(config: &LintConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("rules")?;
    print!("{}", rendered);
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("convlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    if args.path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists {
            path: args.path.clone(),
        }));
    }

    std::fs::write(&args.path, example_config()).map_err(|e| LintError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write {}: {}", args.path.display(), e),
    })?;

    println!("✓ Created {}", args.path.display());

    Ok(())
}

/// Read the message to lint from `--edit`, a file or standard input.
fn read_message(args: &LintArgs) -> Result<String> {
    if let Some(edit) = &args.edit {
        let path = match edit {
            Some(path) => path.clone(),
            None => crate::git::open_repo()?.commit_editmsg_path(),
        };
        return read_file(&path);
    }

    match &args.file {
        Some(path) if path.as_os_str() != "-" => read_file(path),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| LintError::WithContext {
        context: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Print results and turn them into the process outcome.
fn report(cli: &Cli, engine: &RuleEngine, results: &[ValidationResult]) -> Result<()> {
    let help_url = engine.config().output.help_url.as_deref();

    for result in results {
        let clean = result.ignored || (result.is_valid() && result.warning_count() == 0);
        if cli.quiet && clean {
            continue;
        }
        result.print(cli.format, help_url);
    }

    let unparseable = results.iter().filter(|r| r.parse_error.is_some()).count();
    let errors: usize = results.iter().map(|r| r.error_count()).sum();
    let warnings: usize = results.iter().map(|r| r.warning_count()).sum();

    if cli.format == OutputFormat::Text && results.len() > 1 && !cli.quiet {
        println!(
            "\n{} message(s) checked: {} error(s), {} warning(s)",
            results.len(),
            errors,
            warnings
        );
    }

    if unparseable > 0 {
        return Err(ValidationError::Unparseable { count: unparseable }.into());
    }
    if errors > 0 || (cli.strict && warnings > 0) {
        return Err(ValidationError::Failed { errors, warnings }.into());
    }

    Ok(())
}
