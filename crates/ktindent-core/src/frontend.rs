//! Language-agnostic parsing trait.
//!
//! `LanguageFrontend` is the extension point for adding new languages.
//! Implement it to lower a parser's output into a rowan green tree with
//! whitespace and comments preserved as tokens.

use crate::syntax::SyntaxNode;
use rowan::GreenNode;
use thiserror::Error;

/// Result of parsing a single source file.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    /// The lowered green tree, rooted at a [`NodeKind::File`](crate::NodeKind::File) node.
    pub green: GreenNode,
    /// Whether the parser had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

impl ParsedSource {
    /// Returns the root of a fresh red tree over [`green`](Self::green).
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// Errors a frontend can report.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("{language} parser returned no tree")]
    NoTree {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific parsing.
///
/// The frontend receives raw source text and returns a [`ParsedSource`]
/// whose tokens concatenate back to exactly that text.
pub trait LanguageFrontend: Send + Sync {
    /// Language identifier (e.g., `"kotlin"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this frontend handles (e.g., `&[".kt", ".kts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source code into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be set up or produces no tree.
    fn parse(&self, source: &str) -> Result<ParsedSource, FrontendError>;

    /// Returns `true` if `path` has one of [`extensions`](Self::extensions).
    fn handles(&self, path: &std::path::Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|e| e.strip_prefix('.') == Some(ext))
    }
}

/// Type alias for boxed frontend trait objects.
pub type FrontendBox = Box<dyn LanguageFrontend>;
