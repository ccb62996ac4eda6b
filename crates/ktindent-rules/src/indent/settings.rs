//! Indent unit sizes captured when the file root is visited.

use ktindent_core::FileContext;
use tracing::debug;

/// Property holding the block indent size.
pub const INDENT_SIZE: &str = "indent_size";

/// Property holding the continuation indent size.
pub const CONTINUATION_INDENT_SIZE: &str = "continuation_indent_size";

/// Block indent used when `indent_size` is absent or unreadable.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// One configured indentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// Indent by this many columns (always > 0).
    Columns(usize),
    /// Checking is switched off (`unset`, zero or negative).
    Disabled,
}

impl IndentUnit {
    /// Parses a property value.
    ///
    /// Integers map to [`Columns`](Self::Columns) when positive and to
    /// [`Disabled`](Self::Disabled) otherwise; `unset` in any case is
    /// disabled. Anything else returns `None` so the caller can fall back.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(n) = value.parse::<i64>() {
            return Some(
                usize::try_from(n)
                    .ok()
                    .filter(|&n| n > 0)
                    .map_or(Self::Disabled, Self::Columns),
            );
        }
        value.eq_ignore_ascii_case("unset").then_some(Self::Disabled)
    }

    /// Column count, `None` when disabled.
    #[must_use]
    pub fn columns(self) -> Option<usize> {
        match self {
            Self::Columns(n) => Some(n),
            Self::Disabled => None,
        }
    }
}

/// Block and continuation units for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    /// Unit for a new nested scope.
    pub block: IndentUnit,
    /// Unit for a wrapped statement or expression.
    pub continuation: IndentUnit,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            block: IndentUnit::Columns(DEFAULT_INDENT_SIZE),
            continuation: IndentUnit::Columns(DEFAULT_INDENT_SIZE),
        }
    }
}

/// Both units, known to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentUnits {
    /// Block indent in columns.
    pub block: usize,
    /// Continuation indent in columns.
    pub continuation: usize,
}

impl IndentConfig {
    /// Resolves the two raw property values.
    ///
    /// An unreadable block value keeps the default; an unreadable
    /// continuation value falls back to the resolved block value.
    #[must_use]
    pub fn resolve(block: Option<&str>, continuation: Option<&str>) -> Self {
        let block = resolve_unit(INDENT_SIZE, block, Self::default().block);
        let continuation = resolve_unit(CONTINUATION_INDENT_SIZE, continuation, block);
        Self {
            block,
            continuation,
        }
    }

    /// Reads the units from the properties of the file being checked.
    #[must_use]
    pub fn from_context(ctx: &FileContext<'_>) -> Self {
        Self::resolve(
            ctx.property(INDENT_SIZE),
            ctx.property(CONTINUATION_INDENT_SIZE),
        )
    }

    /// Returns both units, or `None` if either one is disabled.
    #[must_use]
    pub fn units(self) -> Option<IndentUnits> {
        Some(IndentUnits {
            block: self.block.columns()?,
            continuation: self.continuation.columns()?,
        })
    }
}

fn resolve_unit(key: &str, raw: Option<&str>, fallback: IndentUnit) -> IndentUnit {
    match raw.map(|value| (value, IndentUnit::parse(value))) {
        Some((_, Some(unit))) => unit,
        Some((value, None)) => {
            debug!("Ignoring {key} = {value:?}, using {fallback:?}");
            fallback
        }
        None => fallback,
    }
}
