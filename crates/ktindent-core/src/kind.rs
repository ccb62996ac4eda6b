//! Syntactic kinds recognised by the rules.

/// The closed set of node kinds a frontend lowers its grammar onto.
///
/// Only the kinds rules actually dispatch on get a dedicated variant;
/// everything else collapses into [`NodeKind::Token`] (leaves) or
/// [`NodeKind::Node`] (composites).
///
/// `repr(u16)` so a kind can be stored as a raw rowan kind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Root of a source file.
    File,
    /// Space, tab and newline trivia between tokens.
    Whitespace,
    /// Line or block comment.
    Comment,
    /// `=`, `+=`, `-=`, `*=`, `/=` or `%=`.
    AssignmentOperator,
    /// `constructor(...) : this(...)` inside a class body.
    SecondaryConstructor,
    /// Parenthesised call arguments.
    ValueArgumentList,
    /// Infix operator expression (`a + b`, `a && b`, `a ?: b`, ...).
    BinaryExpression,
    /// `receiver.member`
    DotQualifiedExpression,
    /// `receiver?.member`
    SafeQualifiedExpression,
    /// `(expression)`
    ParenthesizedExpression,
    /// Function or primary constructor parameters.
    ParameterList,
    /// A single entry of a [`NodeKind::ParameterList`].
    Parameter,
    /// A type reference (`String`, `List<Int>?`, `(A) -> B`).
    TypeReference,
    /// Supertypes after `:` in a class header.
    SuperTypeList,
    /// One entry of a [`NodeKind::SuperTypeList`].
    SuperTypeListEntry,
    /// Type argument inside `<...>`.
    TypeProjection,
    /// `this(...)` / `super(...)` delegation of a secondary constructor.
    ConstructorDelegationCall,
    /// Parser recovery node.
    Error,
    /// Any other leaf.
    Token,
    /// Any other composite node.
    Node,
}

impl NodeKind {
    /// Every kind, indexed by its raw value.
    const ALL: [Self; 20] = [
        Self::File,
        Self::Whitespace,
        Self::Comment,
        Self::AssignmentOperator,
        Self::SecondaryConstructor,
        Self::ValueArgumentList,
        Self::BinaryExpression,
        Self::DotQualifiedExpression,
        Self::SafeQualifiedExpression,
        Self::ParenthesizedExpression,
        Self::ParameterList,
        Self::Parameter,
        Self::TypeReference,
        Self::SuperTypeList,
        Self::SuperTypeListEntry,
        Self::TypeProjection,
        Self::ConstructorDelegationCall,
        Self::Error,
        Self::Token,
        Self::Node,
    ];

    /// Looks up the kind stored as `raw`.
    #[must_use]
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Returns `true` for whitespace and comments.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

impl From<NodeKind> for rowan::SyntaxKind {
    fn from(kind: NodeKind) -> Self {
        Self(kind as u16)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::AssignmentOperator => "assignment-operator",
            Self::SecondaryConstructor => "secondary-constructor",
            Self::ValueArgumentList => "value-argument-list",
            Self::BinaryExpression => "binary-expression",
            Self::DotQualifiedExpression => "dot-qualified-expression",
            Self::SafeQualifiedExpression => "safe-qualified-expression",
            Self::ParenthesizedExpression => "parenthesized-expression",
            Self::ParameterList => "parameter-list",
            Self::Parameter => "parameter",
            Self::TypeReference => "type-reference",
            Self::SuperTypeList => "super-type-list",
            Self::SuperTypeListEntry => "super-type-list-entry",
            Self::TypeProjection => "type-projection",
            Self::ConstructorDelegationCall => "constructor-delegation-call",
            Self::Error => "error",
            Self::Token => "token",
            Self::Node => "node",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia_kinds() {
        assert!(NodeKind::Whitespace.is_trivia());
        assert!(NodeKind::Comment.is_trivia());
        assert!(!NodeKind::Token.is_trivia());
        assert!(!NodeKind::AssignmentOperator.is_trivia());
    }

    #[test]
    fn raw_values_round_trip() {
        for (raw, kind) in NodeKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(rowan::SyntaxKind::from(*kind).0), raw);
            assert_eq!(NodeKind::from_raw(rowan::SyntaxKind::from(*kind).0), Some(*kind));
        }
        assert_eq!(NodeKind::from_raw(20), None);
    }

    #[test]
    fn display_is_kebab_case() {
        assert_eq!(NodeKind::SuperTypeListEntry.to_string(), "super-type-list-entry");
        assert_eq!(NodeKind::File.to_string(), "file");
    }
}
