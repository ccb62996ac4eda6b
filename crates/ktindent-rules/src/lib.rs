//! # ktindent-rules
//!
//! Built-in lint rules for ktindent.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | KI001 | `indent` | Requires indentation to be a multiple of the block or continuation indent |
//!
//! ## Usage
//!
//! ```ignore
//! use ktindent_core::Analyzer;
//! use ktindent_kotlin::KotlinFrontend;
//! use ktindent_rules::Indentation;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .frontend(KotlinFrontend::new())
//!     .rule(Indentation::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod indent;
mod presets;

pub use indent::settings::{IndentConfig, IndentUnit, IndentUnits};
pub use indent::Indentation;
pub use presets::all_rules;

/// Re-export core types for convenience.
pub use ktindent_core::{Rule, Severity, Violation};
