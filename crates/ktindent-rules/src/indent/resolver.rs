//! Baseline column lookup.
//!
//! The baseline of a whitespace run is the indentation of the last line of
//! the nearest multi-line whitespace found by walking up from the run's
//! parent: previous siblings first, then the parent whenever a sibling chain
//! runs out. Siblings of the run itself never anchor it, so a misindented
//! line does not shift the baseline of the lines that follow it.

use ktindent_core::{is_multiline_whitespace, NodeKind, SyntaxElement, SyntaxToken};

/// Kinds that continue the previous line; whitespace right before them
/// never anchors indentation.
pub const ANCHOR_SKIP: &[NodeKind] = &[
    NodeKind::TypeReference,
    NodeKind::SuperTypeList,
    NodeKind::ConstructorDelegationCall,
];

/// Finds the anchor column for `whitespace`.
///
/// Starts at the parent of `whitespace`, then visits its previous siblings,
/// then the grandparent and its previous siblings, and so on up to the root.
/// The first multi-line whitespace whose next sibling is not in `skip` wins.
#[must_use]
pub fn anchor_column(whitespace: &SyntaxToken, skip: &[NodeKind]) -> Option<usize> {
    let mut current: Option<SyntaxElement> = whitespace.parent().map(Into::into);
    while let Some(candidate) = current {
        if let Some(token) = candidate.as_token() {
            let skipped = token
                .next_sibling_or_token()
                .is_some_and(|next| skip.contains(&next.kind()));
            if is_multiline_whitespace(token) && !skipped {
                return Some(last_line_len(token.text()));
            }
        }
        current = candidate
            .prev_sibling_or_token()
            .or_else(|| candidate.parent().map(Into::into));
    }
    None
}

/// Baseline for a whitespace run; 0 when nothing anchors it.
#[must_use]
pub fn baseline_indent(whitespace: &SyntaxToken) -> usize {
    anchor_column(whitespace, ANCHOR_SKIP).unwrap_or(0)
}

/// Character length of the text after the last line break, ignoring a
/// trailing carriage return.
#[must_use]
pub fn last_line_len(text: &str) -> usize {
    text.rsplit('\n')
        .next()
        .map_or(0, |line| line.trim_end_matches('\r').chars().count())
}
