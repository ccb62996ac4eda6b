//! Mapping of tree-sitter-kotlin node kinds onto [`NodeKind`].

use ktindent_core::NodeKind;
use tree_sitter::Node;

/// Grammar kinds lowered to a single opaque leaf.
///
/// Line breaks inside string literals are content, not indentation.
pub(crate) const OPAQUE: &[&str] = &[
    "string_literal",
    "multiline_string_literal",
    "line_string_literal",
    "character_literal",
];

/// Returns the [`NodeKind`] for a grammar node.
pub(crate) fn lower(node: Node<'_>) -> NodeKind {
    let composite = node.child_count() > 0;
    match node.kind() {
        "source_file" => NodeKind::File,
        "line_comment" | "block_comment" | "comment" | "multiline_comment" => NodeKind::Comment,
        "=" | "+=" | "-=" | "*=" | "/=" | "%=" => NodeKind::AssignmentOperator,
        "ERROR" => NodeKind::Error,
        kind if composite => composite_kind(node, kind),
        _ => NodeKind::Token,
    }
}

fn composite_kind(node: Node<'_>, kind: &str) -> NodeKind {
    match kind {
        "secondary_constructor" => NodeKind::SecondaryConstructor,
        "value_arguments" => NodeKind::ValueArgumentList,
        "additive_expression"
        | "multiplicative_expression"
        | "comparison_expression"
        | "equality_expression"
        | "conjunction_expression"
        | "disjunction_expression"
        | "elvis_expression"
        | "infix_expression"
        | "range_expression"
        | "binary_expression" => NodeKind::BinaryExpression,
        "navigation_expression" if is_safe_call(node) => NodeKind::SafeQualifiedExpression,
        "navigation_expression" => NodeKind::DotQualifiedExpression,
        "parenthesized_expression" => NodeKind::ParenthesizedExpression,
        "function_value_parameters" | "class_parameters" => NodeKind::ParameterList,
        "parameter" | "function_value_parameter" | "class_parameter" => NodeKind::Parameter,
        "user_type" | "nullable_type" | "function_type" | "type" | "type_reference" => {
            NodeKind::TypeReference
        }
        "delegation_specifiers" => NodeKind::SuperTypeList,
        "delegation_specifier" | "annotated_delegation_specifier" => NodeKind::SuperTypeListEntry,
        "type_projection" => NodeKind::TypeProjection,
        "constructor_delegation_call" => NodeKind::ConstructorDelegationCall,
        _ => NodeKind::Node,
    }
}

/// `?.` appears either directly or inside a navigation suffix.
fn is_safe_call(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| {
        if child.kind() == "?." {
            return true;
        }
        let mut inner = child.walk();
        let found = child.children(&mut inner).any(|c| c.kind() == "?.");
        found
    });
    found
}
