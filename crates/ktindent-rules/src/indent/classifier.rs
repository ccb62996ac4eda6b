//! Block vs. continuation context of a whitespace run.
//!
//! A continuation context wraps one logical expression or declaration over
//! several lines without opening a new scope, so it is indented by the
//! continuation unit instead of the block unit.

use ktindent_core::{prev_non_trivia_sibling, NodeKind, SyntaxElement, SyntaxToken};

/// Why a whitespace run is indented as a continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationReason {
    /// Right after `=`, `+=`, ...
    AfterAssignment,
    /// Inside a secondary constructor declaration.
    SecondaryConstructor,
    /// Right before a type reference.
    BeforeTypeReference,
    /// Right before a supertype list.
    BeforeSuperTypeList,
    /// Right before a supertype list entry.
    BeforeSuperTypeListEntry,
    /// Right before a type projection.
    BeforeTypeProjection,
    /// Inside call arguments.
    ValueArguments,
    /// Inside a binary expression.
    BinaryExpression,
    /// Inside a `.` or `?.` chain.
    QualifiedExpression,
    /// Inside parentheses.
    ParenthesizedExpression,
}

/// Indentation context of a whitespace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentContext {
    /// Plain block nesting.
    Block,
    /// Wrapped statement or expression.
    Continuation(ContinuationReason),
}

impl IndentContext {
    /// Returns `true` for [`IndentContext::Continuation`].
    #[must_use]
    pub fn is_continuation(self) -> bool {
        matches!(self, Self::Continuation(_))
    }
}

/// Classifies the whitespace token `whitespace`.
///
/// Looks at the nearest preceding non-trivia sibling, the immediately
/// following sibling and the parent.
#[must_use]
pub fn classify(whitespace: &SyntaxToken) -> IndentContext {
    use ContinuationReason as Reason;

    let previous = prev_non_trivia_sibling(&SyntaxElement::from(whitespace.clone()))
        .map(|e| e.kind());
    let next = whitespace.next_sibling_or_token().map(|e| e.kind());
    let parent = whitespace.parent().map(|p| p.kind());

    if previous == Some(NodeKind::AssignmentOperator) {
        return IndentContext::Continuation(Reason::AfterAssignment);
    }
    if parent == Some(NodeKind::SecondaryConstructor) {
        return IndentContext::Continuation(Reason::SecondaryConstructor);
    }

    let before = match next {
        Some(NodeKind::TypeReference) => Some(Reason::BeforeTypeReference),
        Some(NodeKind::SuperTypeList) => Some(Reason::BeforeSuperTypeList),
        Some(NodeKind::SuperTypeListEntry) => Some(Reason::BeforeSuperTypeListEntry),
        Some(NodeKind::TypeProjection) => Some(Reason::BeforeTypeProjection),
        _ => None,
    };
    if let Some(reason) = before {
        return IndentContext::Continuation(reason);
    }

    let inside = match parent {
        Some(NodeKind::ValueArgumentList) => Some(Reason::ValueArguments),
        Some(NodeKind::BinaryExpression) => Some(Reason::BinaryExpression),
        Some(NodeKind::DotQualifiedExpression | NodeKind::SafeQualifiedExpression) => {
            Some(Reason::QualifiedExpression)
        }
        Some(NodeKind::ParenthesizedExpression) => Some(Reason::ParenthesizedExpression),
        _ => None,
    };

    inside.map_or(IndentContext::Block, IndentContext::Continuation)
}
