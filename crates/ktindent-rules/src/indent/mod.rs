//! Rule to check that every indented line is a multiple of the indent unit.
//!
//! # Rationale
//!
//! Consistent indentation makes nesting visible at a glance. Code that wraps
//! a single statement over several lines (assignments, binary expressions,
//! call arguments, supertype lists, ...) may use a separate continuation
//! indent.
//!
//! # Configuration
//!
//! Read from the file's properties when the file root is visited:
//!
//! - `indent_size`: block indent (default: 4, `unset` disables the rule)
//! - `continuation_indent_size`: continuation indent (default: the block
//!   indent, `unset` disables the rule)
//!
//! # Detected Patterns
//!
//! ```kotlin
//! fun main() {
//!   println()   // 2 is not a multiple of 4
//! }
//! ```
//!
//! # Accepted Alignment
//!
//! Parameters may be aligned with the first parameter instead of being
//! indented by a multiple of the unit:
//!
//! ```kotlin
//! fun foo(a: Int,
//!         b: Int)
//! ```

pub mod classifier;
pub mod resolver;
pub mod settings;

use ktindent_core::{
    is_multiline_whitespace, start_column, FileContext, Finding, NodeKind, NodeVisitor, Rule,
    RuleError, Severity, SyntaxElement, SyntaxToken,
};
use tracing::{debug, trace};

use classifier::IndentContext;
use settings::{IndentConfig, IndentUnits};

/// Rule code for indent.
pub const CODE: &str = "KI001";

/// Rule name for indent.
pub const NAME: &str = "indent";

/// Checks indentation against the configured block and continuation units.
#[derive(Debug, Clone)]
pub struct Indentation {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for Indentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Indentation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for Indentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires indentation to be a multiple of the block or continuation indent"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn visitor(&self) -> Box<dyn NodeVisitor> {
        Box::new(IndentationVisitor::default())
    }
}

/// Per-file state: the units captured at the file root.
#[derive(Debug, Default)]
pub struct IndentationVisitor {
    config: Option<IndentConfig>,
}

impl NodeVisitor for IndentationVisitor {
    fn visit(
        &mut self,
        element: &SyntaxElement,
        ctx: &FileContext<'_>,
        emit: &mut dyn FnMut(Finding),
    ) -> Result<(), RuleError> {
        match element.kind() {
            NodeKind::File => {
                let config = IndentConfig::from_context(ctx);
                if config.units().is_none() {
                    debug!("Indentation check disabled for {}", ctx.path.display());
                }
                self.config = Some(config);
            }
            NodeKind::Whitespace => {
                let config = self
                    .config
                    .ok_or(RuleError::ConfigurationMissing { rule: NAME })?;
                if let (Some(units), Some(token)) = (config.units(), element.as_token()) {
                    check_whitespace(token, units, emit);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Checks every line of one whitespace token.
///
/// Does nothing for single-line whitespace or whitespace inside a comment.
/// Lengths count characters; a carriage return before a line break is not
/// part of the indentation.
pub fn check_whitespace(
    whitespace: &SyntaxToken,
    units: IndentUnits,
    emit: &mut dyn FnMut(Finding),
) {
    let in_comment = whitespace
        .parent()
        .is_some_and(|parent| parent.ancestors().any(|n| n.kind() == NodeKind::Comment));
    if !is_multiline_whitespace(whitespace) || in_comment {
        return;
    }

    let start = usize::from(whitespace.text_range().start());
    let mut lines = whitespace.text().split('\n');
    let first = lines.next().unwrap_or_default();

    let baseline = resolver::baseline_indent(whitespace);
    let context = (units.continuation != units.block).then(|| classifier::classify(whitespace));
    let unit = if context.map_or(true, IndentContext::is_continuation) {
        units.continuation
    } else {
        units.block
    };
    trace!(offset = start, baseline, unit, ?context, "checking whitespace");

    let mut first_parameter = FirstParameterColumn::new(whitespace);
    let mut offset = start + first.len() + 1;

    for fragment in lines {
        let indent = fragment.strip_suffix('\r').unwrap_or(fragment);
        let len = indent.chars().count();
        if !indent.is_empty() && len.abs_diff(baseline) % unit != 0 {
            match first_parameter.get() {
                None => emit(Finding::new(
                    offset,
                    format!("Unexpected indentation ({len}) (it should be {unit})"),
                    false,
                )),
                Some(column) if column - 1 == len => {}
                Some(_) => emit(Finding::new(
                    offset,
                    format!(
                        "Unexpected indentation ({len}) (parameters should be either vertically aligned or indented by the multiple of {})",
                        units.block
                    ),
                    false,
                )),
            }
        }
        offset += fragment.len() + 1;
    }
}

/// Column of the first parameter of the parameter list enclosing a
/// whitespace token, computed on first use.
struct FirstParameterColumn<'t> {
    whitespace: &'t SyntaxToken,
    column: Option<Option<usize>>,
}

impl<'t> FirstParameterColumn<'t> {
    fn new(whitespace: &'t SyntaxToken) -> Self {
        Self {
            whitespace,
            column: None,
        }
    }

    /// 1-indexed column, `None` outside a parameter list or when the list
    /// is empty.
    fn get(&mut self) -> Option<usize> {
        let whitespace = self.whitespace;
        *self.column.get_or_insert_with(|| {
            let parameter = whitespace
                .parent()?
                .ancestors()
                .find(|n| n.kind() == NodeKind::ParameterList)?
                .children()
                .find(|child| child.kind() == NodeKind::Parameter)?;
            Some(start_column(&parameter.first_token()?))
        })
    }
}
