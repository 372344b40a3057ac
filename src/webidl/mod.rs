//! WebIDL AST consumption and Rust binding generation.
//!
//! - `ast`: serde model of the webidl2.js JSON AST
//! - `gen`: merging, type mapping, naming, and per-definition synthesis
//! - `generator`: pipeline entry points and the file boundary

pub mod ast;
pub mod gen;
mod generator;

pub use gen::{Diagnostic, DiagnosticKind, GenOutcome};
pub use generator::{generate, generate_file, Error, GeneratedFile};
