//! # ktindent-kotlin
//!
//! Tree-sitter based Kotlin frontend for ktindent.
//!
//! [`KotlinFrontend`] implements [`ktindent_core::LanguageFrontend`]: it
//! parses `.kt` and `.kts` sources with `tree-sitter-kotlin-ng` and lowers
//! the result into a lossless rowan tree ([`ktindent_core::SyntaxNode`]), mapping the
//! grammar's node types onto [`ktindent_core::NodeKind`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod kinds;
pub mod kotlin;

pub use kotlin::KotlinFrontend;
