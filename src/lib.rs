//! Generate Rust foreign-function bindings from WebIDL definitions.
//!
//! Input is the JSON AST produced by the `webidl2.js` grammar parser; output
//! is Rust source text: an opaque handle type per interface or dictionary,
//! a capability trait per interface, `extern` foreign declarations, and the
//! glue bridging optionality, sequences, and defaults across the boundary.

pub mod webidl;

pub use webidl::{
    generate, generate_file, Diagnostic, DiagnosticKind, Error, GenOutcome, GeneratedFile,
};
