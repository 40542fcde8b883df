//! TASM assembler.
//!
//! This crate turns assembly source into a binary program:
//! - `lexer` - per-line tokens with byte spans
//! - `parser` - one line into a label definition or an instruction
//! - `labels` - label name to code offset table
//! - `assembler` - the two passes and header patching
//! - `diagnostics` - source-annotated error rendering

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assembler;
pub mod diagnostics;
pub mod error;
pub mod labels;
pub mod lexer;
pub mod parser;

pub use assembler::{Assembler, assemble};
pub use diagnostics::render;
pub use error::{AsmError, Pass, SyntaxError};
pub use labels::LabelTable;
