//! Kotlin frontend using Tree-sitter.

use ktindent_core::{FrontendError, LanguageFrontend, NodeKind, ParsedSource, TreeBuilder};
use tracing::trace;
use tree_sitter::{Language, Node, Parser};

use crate::kinds;

const LANGUAGE_ID: &str = "kotlin";

/// Parses Kotlin sources and lowers them into a lossless syntax tree.
///
/// Tree-sitter does not materialise whitespace, so every gap between two
/// visible tokens becomes a [`NodeKind::Whitespace`] leaf. Whitespace at the
/// edges of a node is hoisted to the node's parent, which keeps a line break
/// and the indentation that follows it in a single leaf.
pub struct KotlinFrontend {
    language: Language,
}

impl KotlinFrontend {
    /// Creates a new Kotlin frontend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }
}

impl Default for KotlinFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for KotlinFrontend {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".kt", ".kts"]
    }

    fn parse(&self, source: &str) -> Result<ParsedSource, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| FrontendError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let ts_tree = parser
            .parse(source, None)
            .ok_or(FrontendError::NoTree {
                language: LANGUAGE_ID,
            })?;
        let root = ts_tree.root_node();

        let mut lowering = Lowering {
            src: source,
            builder: TreeBuilder::new(),
        };
        lowering.builder.start_node(NodeKind::File);
        lowering.children(root, 0, source.len());
        lowering.builder.finish_node();

        let green = lowering.builder.finish();
        trace!(text_len = u32::from(green.text_len()), "lowered kotlin source");

        Ok(ParsedSource {
            green,
            has_syntax_errors: root.has_error(),
        })
    }
}

struct Lowering<'s> {
    src: &'s str,
    builder: TreeBuilder,
}

impl Lowering<'_> {
    /// Lowers the children of `node` that fall inside `start..end`, filling
    /// the gaps between them.
    fn children(&mut self, node: Node<'_>, start: usize, end: usize) {
        let mut cursor = start;
        let mut walk = node.walk();
        for child in node.children(&mut walk) {
            let Some((child_start, child_end)) = self.trimmed(child, cursor, end) else {
                continue;
            };
            self.gap(cursor, child_start);
            self.node(child, child_start, child_end);
            cursor = child_end;
        }
        self.gap(cursor, end);
    }

    fn node(&mut self, node: Node<'_>, start: usize, end: usize) {
        let text = &self.src[start..end];
        if kinds::OPAQUE.contains(&node.kind()) {
            self.builder.token(NodeKind::Token, text);
            return;
        }
        match kinds::lower(node) {
            NodeKind::File => self.children(node, start, end),
            kind if node.child_count() == 0 => {
                self.builder.token(kind, text);
            }
            kind => {
                self.builder.start_node(kind);
                self.children(node, start, end);
                self.builder.finish_node();
            }
        }
    }

    /// Range of `node` without surrounding whitespace, clamped to
    /// `floor..ceil`. `None` when nothing visible remains.
    fn trimmed(&self, node: Node<'_>, floor: usize, ceil: usize) -> Option<(usize, usize)> {
        let start = node.start_byte().max(floor);
        let end = node.end_byte().min(ceil);
        let text = self.src.get(start..end)?;
        let trimmed = text.trim_start();
        let start = start + (text.len() - trimmed.len());
        let end = start + trimmed.trim_end().len();
        (start < end).then_some((start, end))
    }

    /// Emits the text between two visible tokens, split into whitespace and
    /// non-whitespace runs.
    fn gap(&mut self, start: usize, end: usize) {
        let Some(text) = self.src.get(start..end) else {
            return;
        };
        let mut run_start = 0;
        let mut run_ws = None;
        for (i, c) in text.char_indices() {
            let ws = c.is_whitespace();
            if run_ws.is_some_and(|prev| prev != ws) {
                self.run(&text[run_start..i], run_ws == Some(true));
                run_start = i;
            }
            run_ws = Some(ws);
        }
        if run_start < text.len() {
            self.run(&text[run_start..], run_ws == Some(true));
        }
    }

    fn run(&mut self, text: &str, whitespace: bool) {
        let kind = if whitespace {
            NodeKind::Whitespace
        } else {
            NodeKind::Token
        };
        self.builder.token(kind, text);
    }
}
