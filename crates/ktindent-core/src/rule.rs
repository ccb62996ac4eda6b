//! Rule traits for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SyntaxElement;
use crate::types::Severity;
use thiserror::Error;

/// A raw finding emitted by a [`NodeVisitor`].
///
/// The analyzer turns findings into located [`Violation`](crate::Violation)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Byte offset the finding points at.
    pub offset: usize,
    /// Human-readable message.
    pub message: String,
    /// Whether the rule could fix this finding automatically.
    pub can_be_auto_corrected: bool,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>, can_be_auto_corrected: bool) -> Self {
        Self {
            offset,
            message: message.into(),
            can_be_auto_corrected,
        }
    }
}

/// Errors a visitor can raise while walking a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A node was visited before the file root delivered configuration.
    #[error("rule `{rule}` visited a node before the file root was visited")]
    ConfigurationMissing {
        /// Name of the rule whose precondition failed.
        rule: &'static str,
    },
}

/// Per-file state of a rule.
///
/// The analyzer calls [`visit`](Self::visit) for every node and token in
/// document order, starting with the file root.
pub trait NodeVisitor {
    /// Visits one element, reporting findings through `emit`.
    ///
    /// # Errors
    ///
    /// Returns an error when the traversal contract was broken.
    fn visit(
        &mut self,
        element: &SyntaxElement,
        ctx: &FileContext<'_>,
        emit: &mut dyn FnMut(Finding),
    ) -> Result<(), RuleError>;
}

/// A per-file lint rule that inspects the syntax tree node by node.
///
/// Rules themselves are stateless and shareable; anything that must be
/// remembered while walking one file lives in the [`NodeVisitor`] returned
/// by [`visitor`](Self::visitor), which is created fresh for every file.
///
/// # Example
///
/// ```ignore
/// use ktindent_core::{Finding, FileContext, NodeKind, NodeVisitor, Rule, RuleError, SyntaxElement};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "KI100" }
///     fn visitor(&self) -> Box<dyn NodeVisitor> { Box::new(NoTabsVisitor) }
/// }
///
/// struct NoTabsVisitor;
///
/// impl NodeVisitor for NoTabsVisitor {
///     fn visit(
///         &mut self,
///         element: &SyntaxElement,
///         _ctx: &FileContext<'_>,
///         emit: &mut dyn FnMut(Finding),
///     ) -> Result<(), RuleError> {
///         if let Some(token) = element.as_token() {
///             if token.kind() == NodeKind::Whitespace && token.text().contains('\t') {
///                 let offset = usize::from(token.text_range().start());
///                 emit(Finding::new(offset, "Unexpected tab", false));
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "indent").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "KI001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Creates the per-file visitor for this rule.
    fn visitor(&self) -> Box<dyn NodeVisitor>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use crate::syntax::{SyntaxNode, TreeBuilder};
    use std::path::Path;

    struct TestRule;

    struct CountTokens;

    impl NodeVisitor for CountTokens {
        fn visit(
            &mut self,
            element: &SyntaxElement,
            _ctx: &FileContext<'_>,
            emit: &mut dyn FnMut(Finding),
        ) -> Result<(), RuleError> {
            if let Some(token) = element.as_token() {
                let offset = usize::from(token.text_range().start());
                emit(Finding::new(offset, token.text(), false));
            }
            Ok(())
        }
    }

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn visitor(&self) -> Box<dyn NodeVisitor> {
            Box::new(CountTokens)
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn visitor_emits_through_callback() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File)
            .token(NodeKind::Token, "a")
            .token(NodeKind::Whitespace, " ")
            .token(NodeKind::Token, "b")
            .finish_node();
        let root = SyntaxNode::new_root(b.finish());

        let properties = crate::Properties::default();
        let ctx = FileContext::new(Path::new("A.kt"), Path::new("."), &properties);
        let mut visitor = TestRule.visitor();
        let mut findings = Vec::new();
        for element in root.descendants_with_tokens() {
            visitor
                .visit(&element, &ctx, &mut |f| findings.push(f))
                .unwrap();
        }

        let offsets: Vec<usize> = findings.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
    }

    #[test]
    fn configuration_missing_names_rule() {
        let err = RuleError::ConfigurationMissing { rule: "indent" };
        assert_eq!(
            err.to_string(),
            "rule `indent` visited a node before the file root was visited"
        );
    }
}
