//! Shared output formatting for lint results.

use anyhow::Result;
use ktindent_core::{LintResult, Violation};
use miette::GraphicalReportHandler;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Where the `pretty` format reads source text from.
pub enum Sources {
    /// Files relative to the analysis root.
    Root {
        /// Analysis root.
        root: PathBuf,
        /// Already loaded files.
        cache: HashMap<PathBuf, String>,
    },
    /// A single source read from standard input.
    Stdin(String),
}

impl Sources {
    /// Reads sources from disk, relative to `root`.
    pub fn from_root(root: &Path) -> Self {
        Self::Root {
            root: root.to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Uses `content` for every violation.
    pub fn from_stdin(content: String) -> Self {
        Self::Stdin(content)
    }

    fn get(&mut self, file: &Path) -> Option<&str> {
        match self {
            Self::Stdin(content) => Some(content.as_str()),
            Self::Root { root, cache } => {
                if !cache.contains_key(file) {
                    let content = std::fs::read_to_string(root.join(file)).ok()?;
                    cache.insert(file.to_path_buf(), content);
                }
                cache.get(file).map(String::as_str)
            }
        }
    }
}

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, sources: &mut Sources) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result, sources, &GraphicalReportHandler::new())?,
    };
    println!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();

    let mut output = String::new();
    for violation in &result.violations {
        output.push_str(&violation.format());
        output.push('\n');
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    output.push_str(&format!(
        "{summary_color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    ));
    output
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pretty(
    result: &LintResult,
    sources: &mut Sources,
    handler: &GraphicalReportHandler,
) -> Result<String> {
    let mut output = String::new();

    for violation in &result.violations {
        match sources.get(&violation.location.file) {
            Some(source) => {
                let diagnostic = violation.to_diagnostic(source);
                handler.render_report(&mut output, &diagnostic)?;
            }
            None => {
                tracing::debug!(
                    "Source for {} unavailable, falling back to compact output",
                    violation.location.file.display()
                );
                output.push_str(&violation.to_string());
                output.push('\n');
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktindent_core::{Location, Severity};
    use miette::GraphicalTheme;

    fn plain() -> GraphicalReportHandler {
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
    }

    fn result() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 1;
        result.violations.push(Violation::new(
            "KI001",
            "indent",
            Severity::Error,
            Location::new(PathBuf::from("Main.kt"), 2, 1).with_span(13, 2),
            "Unexpected indentation (2) (it should be 4)",
        ));
        result
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        insta::assert_snapshot!(
            render_compact(&result()),
            @"Main.kt:2:1: error [KI001] Unexpected indentation (2) (it should be 4)"
        );
    }

    #[test]
    fn text_ends_with_summary() {
        let text = render_text(&result());
        assert!(text.starts_with("KI001 indent at Main.kt:2:1"));
        assert!(text.contains("Found 1 error(s), 0 warning(s), 0 info(s) in 1 file(s)"));
    }

    #[test]
    fn pretty_points_into_source() {
        let mut sources = Sources::from_stdin("fun main() {\n  println()\n}\n".to_string());
        let pretty = render_pretty(&result(), &mut sources, &plain()).unwrap();
        assert!(pretty.contains("[KI001] Unexpected indentation (2) (it should be 4)"));
        assert!(pretty.contains("println()"));
    }

    #[test]
    fn pretty_falls_back_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut sources = Sources::from_root(dir.path());
        let pretty = render_pretty(&result(), &mut sources, &plain()).unwrap();
        assert!(pretty.starts_with("Main.kt:2:1: error [KI001]"));
    }
}
