//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::{relative_to, FileContext};
use crate::frontend::{FrontendBox, FrontendError, LanguageFrontend, ParsedSource};
use crate::rule::{Finding, NodeVisitor, Rule, RuleBox, RuleError};
use crate::syntax::LineIndex;
use crate::types::{LintResult, Location, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Source file has syntax errors and `fail_on_parse_error` is set.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The frontend could not produce a tree.
    #[error("Frontend error in {path}: {source}")]
    Frontend {
        /// Path to the file being parsed.
        path: PathBuf,
        /// Underlying frontend error.
        source: FrontendError,
    },

    /// A rule's traversal contract was broken.
    #[error("Rule error in {path}: {source}")]
    Rule {
        /// Path to the file being checked.
        path: PathBuf,
        /// Underlying rule error.
        source: RuleError,
    },

    /// No registered frontend handles this file.
    #[error("No frontend registered for {0}")]
    UnsupportedFile(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    frontends: Vec<FrontendBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a language frontend.
    #[must_use]
    pub fn frontend<F: LanguageFrontend + 'static>(mut self, frontend: F) -> Self {
        self.frontends.push(Box::new(frontend));
        self
    }

    /// Adds a boxed language frontend.
    #[must_use]
    pub fn frontend_box(mut self, frontend: FrontendBox) -> Self {
        self.frontends.push(frontend);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: from config, else false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or
    /// the configuration is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.clone());

        let fail_on_parse_error = self
            .fail_on_parse_error
            .unwrap_or(config.analyzer.fail_on_parse_error);

        Ok(Analyzer {
            root,
            rules: self.rules,
            frontends: self.frontends,
            exclude_patterns,
            config,
            fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    frontends: Vec<FrontendBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery, reading or a rule fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            debug!("Analyzing: {}", file_path.display());
            let content = std::fs::read_to_string(file_path)?;
            let violations = self.analyze_source(file_path, &content)?;
            result.violations.extend(violations);
            result.files_checked += 1;
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes one in-memory source as if it lived at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no frontend handles `path`, parsing fails, or a
    /// rule breaks its traversal contract.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let frontend = self
            .frontends
            .iter()
            .find(|f| f.handles(path))
            .ok_or_else(|| AnalyzerError::UnsupportedFile(path.to_path_buf()))?;

        let parsed = frontend
            .parse(content)
            .map_err(|source| AnalyzerError::Frontend {
                path: path.to_path_buf(),
                source,
            })?;

        if parsed.has_syntax_errors {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: format!("{} parser reported syntax errors", frontend.language_id()),
                });
            }
            warn!("{} has syntax errors; checking recovered tree", path.display());
        }

        let properties = self
            .config
            .properties_for(&relative_to(path, &self.root));
        let ctx = FileContext::new(path, &self.root, &properties);

        self.run_rules(&ctx, &parsed, content)
    }

    /// Walks the tree once in document order, feeding every enabled rule.
    fn run_rules(
        &self,
        ctx: &FileContext<'_>,
        parsed: &ParsedSource,
        text: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let rules: Vec<&RuleBox> = self
            .rules
            .iter()
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let mut visitors: Vec<Box<dyn NodeVisitor>> = rules.iter().map(|r| r.visitor()).collect();
        let mut findings: Vec<Vec<Finding>> = vec![Vec::new(); rules.len()];

        for element in parsed.syntax().descendants_with_tokens() {
            for (visitor, sink) in visitors.iter_mut().zip(findings.iter_mut()) {
                visitor
                    .visit(&element, ctx, &mut |finding| sink.push(finding))
                    .map_err(|source| AnalyzerError::Rule {
                        path: ctx.path.to_path_buf(),
                        source,
                    })?;
            }
        }

        let lines = LineIndex::new(text);
        let mut violations = Vec::new();
        for (rule, rule_findings) in rules.iter().zip(findings) {
            let severity = self
                .config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity());

            for finding in rule_findings {
                let (line, column) = lines.line_col(text, finding.offset);
                let length = text
                    .get(finding.offset..)
                    .map_or(0, |rest| rest.bytes().take_while(|b| *b == b' ' || *b == b'\t').count());
                let location = Location::new(ctx.relative_path.clone(), line, column)
                    .with_span(finding.offset, length);

                violations.push(
                    Violation::new(rule.code(), rule.name(), severity, location, finding.message)
                        .with_correctable(finding.can_be_auto_corrected),
                );
            }
        }

        Ok(violations)
    }

    /// Discovers all source files handled by a registered frontend.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.frontends.iter().any(|f| f.handles(path)) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/build/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use crate::rule::Finding;
    use crate::syntax::{SyntaxElement, TreeBuilder};
    use crate::Severity;

    /// Frontend that turns every line into a token and every newline run
    /// into whitespace, good enough to drive the analyzer.
    struct LineFrontend;

    impl LanguageFrontend for LineFrontend {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".txt"]
        }

        fn parse(&self, source: &str) -> Result<ParsedSource, FrontendError> {
            let mut b = TreeBuilder::new();
            b.start_node(NodeKind::File);
            let mut rest = source;
            while !rest.is_empty() {
                let ws_len = rest.len() - rest.trim_start().len();
                if ws_len > 0 {
                    b.token(NodeKind::Whitespace, &rest[..ws_len]);
                    rest = &rest[ws_len..];
                    continue;
                }
                let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
                b.token(NodeKind::Token, &rest[..word_len]);
                rest = &rest[word_len..];
            }
            b.finish_node();
            Ok(ParsedSource {
                green: b.finish(),
                has_syntax_errors: source.contains("!!"),
            })
        }
    }

    /// Flags every token spelled `bad`, after checking the root came first.
    struct NoBad;

    struct NoBadVisitor {
        seen_root: bool,
    }

    impl NodeVisitor for NoBadVisitor {
        fn visit(
            &mut self,
            element: &SyntaxElement,
            _ctx: &FileContext<'_>,
            emit: &mut dyn FnMut(Finding),
        ) -> Result<(), RuleError> {
            if element.kind() == NodeKind::File {
                self.seen_root = true;
                return Ok(());
            }
            if !self.seen_root {
                return Err(RuleError::ConfigurationMissing { rule: "no-bad" });
            }
            if let Some(token) = element.as_token().filter(|t| t.text() == "bad") {
                let offset = usize::from(token.text_range().start());
                emit(Finding::new(offset, "bad token", false));
            }
            Ok(())
        }
    }

    impl Rule for NoBad {
        fn name(&self) -> &'static str {
            "no-bad"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn visitor(&self) -> Box<dyn NodeVisitor> {
            Box::new(NoBadVisitor { seen_root: false })
        }
    }

    fn analyzer(config: Config) -> Analyzer {
        Analyzer::builder()
            .root("/project")
            .frontend(LineFrontend)
            .rule(NoBad)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/build/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/build/tmp/Main.kt")));
        assert!(analyzer.should_exclude(Path::new("/foo/generated/Api.kt")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/Main.kt")));
    }

    #[test]
    fn findings_become_located_violations() {
        let analyzer = analyzer(Config::default());
        let violations = analyzer
            .analyze_source(Path::new("/project/src/a.txt"), "ok\n  bad\n")
            .unwrap();

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.code, "T001");
        assert_eq!(v.severity, Severity::Error);
        assert_eq!(v.location.file, PathBuf::from("src/a.txt"));
        assert_eq!((v.location.line, v.location.column), (2, 3));
        assert_eq!(v.location.offset, 5);
        assert!(!v.correctable);
    }

    #[test]
    fn severity_override_and_disable() {
        let config = Config::parse("[rules.no-bad]\nseverity = \"info\"\n").unwrap();
        let violations = analyzer(config)
            .analyze_source(Path::new("/project/a.txt"), "bad")
            .unwrap();
        assert_eq!(violations[0].severity, Severity::Info);

        let config = Config::parse("[rules.no-bad]\nenabled = false\n").unwrap();
        let violations = analyzer(config)
            .analyze_source(Path::new("/project/a.txt"), "bad")
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = analyzer(Config::default())
            .analyze_source(Path::new("/project/a.rs"), "bad")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedFile(_)));
    }

    #[test]
    fn syntax_errors_only_fail_when_requested() {
        let source = "bad !!";
        let lenient = analyzer(Config::default());
        assert_eq!(
            lenient
                .analyze_source(Path::new("/project/a.txt"), source)
                .unwrap()
                .len(),
            1
        );

        let strict = Analyzer::builder()
            .root("/project")
            .frontend(LineFrontend)
            .rule(NoBad)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        let err = strict
            .analyze_source(Path::new("/project/a.txt"), source)
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }

    #[test]
    fn analyze_walks_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        std::fs::create_dir_all(tmp.path().join("build")).unwrap();
        std::fs::write(tmp.path().join("src/one.txt"), "bad\nbad\n").unwrap();
        std::fs::write(tmp.path().join("src/two.txt"), "fine\n").unwrap();
        std::fs::write(tmp.path().join("src/skip.md"), "bad\n").unwrap();
        std::fs::write(tmp.path().join("build/gen.txt"), "bad\n").unwrap();

        let result = Analyzer::builder()
            .root(tmp.path())
            .frontend(LineFrontend)
            .rule(NoBad)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations[0].location.line < result.violations[1].location.line);
    }
}
