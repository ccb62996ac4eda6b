//! # ktindent-core
//!
//! Core framework for ktindent, a Kotlin indentation linter.
//!
//! This crate provides the foundational traits and types shared by
//! frontends and rules. It includes:
//!
//! - a rowan [`SyntaxNode`] tree over a closed set of [`NodeKind`]s
//! - [`LanguageFrontend`] for lowering parser output into a tree
//! - [`Rule`] and [`NodeVisitor`] for per-node rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use ktindent_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .frontend(KotlinFrontend::new())
//!     .rule(Indentation::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod frontend;
mod kind;
mod rule;
mod syntax;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, Override, Properties, RuleConfig};
pub use context::FileContext;
pub use frontend::{FrontendBox, FrontendError, LanguageFrontend, ParsedSource};
pub use kind::NodeKind;
pub use rule::{Finding, NodeVisitor, Rule, RuleBox, RuleError};
pub use rowan::{GreenNode, NodeOrToken, TextRange, TextSize};
pub use syntax::{
    is_multiline_whitespace, prev_non_trivia_sibling, start_column, KotlinLanguage, LineIndex,
    SyntaxElement, SyntaxNode, SyntaxToken, TreeBuilder,
};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
