//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use ktindent_core::{Analyzer, Config, LintResult};
use ktindent_kotlin::KotlinFrontend;
use ktindent_rules::{all_rules, indent::settings};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::output::Sources;
use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of `ktindent check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to analyze (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read one Kotlin source from standard input
    #[arg(long)]
    pub stdin: bool,

    /// File name reported for standard input
    #[arg(long, default_value = "stdin.kt")]
    pub stdin_filename: PathBuf,

    /// Block indent size (number or `unset`), overrides the config
    #[arg(long, value_name = "N")]
    pub indent_size: Option<String>,

    /// Continuation indent size (number or `unset`), overrides the config
    #[arg(long, value_name = "N")]
    pub continuation_indent_size: Option<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<()> {
    let mut config = load_config(source)?;
    if let Some(size) = &args.indent_size {
        config.set_property(settings::INDENT_SIZE, size.as_str());
    }
    if let Some(size) = &args.continuation_indent_size {
        config.set_property(settings::CONTINUATION_INDENT_SIZE, size.as_str());
    }

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .config(config)
        .frontend(KotlinFrontend::new())
        .excludes(args.exclude.iter().cloned());

    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules",
        args.path,
        analyzer.rule_count()
    );

    let (result, mut sources) = if args.stdin {
        check_stdin(&analyzer, &args.stdin_filename)?
    } else {
        let result = analyzer.analyze().context("Analysis failed")?;
        (result, Sources::from_root(analyzer.root()))
    };

    super::output::print(&result, args.format, &mut sources)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn check_stdin(analyzer: &Analyzer, filename: &Path) -> Result<(LintResult, Sources)> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read standard input")?;

    let mut result = LintResult::new();
    result.violations = analyzer
        .analyze_source(filename, &content)
        .with_context(|| format!("Analysis of {} failed", filename.display()))?;
    result.files_checked = 1;
    result.sort();

    Ok((result, Sources::from_stdin(content)))
}
