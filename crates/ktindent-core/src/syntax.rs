//! Lossless syntax tree shared by frontends and rules.
//!
//! Frontends lower their parser output into a rowan green tree through a
//! [`TreeBuilder`]; rules navigate it with rowan's red-tree API. Every byte
//! of the source belongs to exactly one token, so whitespace and comments
//! are first-class tokens.

use crate::kind::NodeKind;
use rowan::{GreenNode, GreenNodeBuilder};

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KotlinLanguage {}

impl rowan::Language for KotlinLanguage {
    type Kind = NodeKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        NodeKind::from_raw(raw.0).unwrap_or(NodeKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<KotlinLanguage>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<KotlinLanguage>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<KotlinLanguage>;

/// Builds a green tree from [`NodeKind`]s in document order.
///
/// The calls must be balanced: every [`start_node`](Self::start_node) needs
/// a matching [`finish_node`](Self::finish_node) before [`finish`](Self::finish).
pub struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
        }
    }

    /// Opens a composite node.
    pub fn start_node(&mut self, kind: NodeKind) -> &mut Self {
        self.inner.start_node(kind.into());
        self
    }

    /// Appends a token to the open node.
    pub fn token(&mut self, kind: NodeKind, text: &str) -> &mut Self {
        self.inner.token(kind.into(), text);
        self
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) -> &mut Self {
        self.inner.finish_node();
        self
    }

    /// Returns the finished green tree.
    #[must_use]
    pub fn finish(self) -> GreenNode {
        self.inner.finish()
    }
}

/// Returns `true` for a whitespace token containing a line break.
#[must_use]
pub fn is_multiline_whitespace(token: &SyntaxToken) -> bool {
    token.kind() == NodeKind::Whitespace && token.text().contains('\n')
}

/// Nearest previous sibling that is neither whitespace nor a comment.
#[must_use]
pub fn prev_non_trivia_sibling(element: &SyntaxElement) -> Option<SyntaxElement> {
    std::iter::successors(element.prev_sibling_or_token(), |e| {
        e.prev_sibling_or_token()
    })
    .find(|e| !e.kind().is_trivia())
}

/// 1-indexed character column at which `token` starts.
///
/// Walks back through the preceding tokens until a line break.
#[must_use]
pub fn start_column(token: &SyntaxToken) -> usize {
    let mut column = 1;
    let mut previous = token.prev_token();
    while let Some(current) = previous {
        let text = current.text();
        if let Some(newline) = text.rfind('\n') {
            return column + text[newline + 1..].chars().count();
        }
        column += text.chars().count();
        previous = current.prev_token();
    }
    column
}

/// Byte offset of a line start, for turning offsets into line and column.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Indexes the line starts of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// Converts a byte offset into a 1-indexed `(line, column)` pair.
    ///
    /// Columns count characters, not bytes. Offsets past the end of `text`
    /// are clamped to the end.
    #[must_use]
    pub fn line_col(&self, text: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = text
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        (line, column + 1)
    }
}
