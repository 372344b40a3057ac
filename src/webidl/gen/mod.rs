//! Binding generation from merged WebIDL definitions.
//!
//! The pipeline inside this module:
//! 1. `merge`: fold `partial` definitions into their bases
//! 2. `interface` / `dictionary`: per-definition Rust text synthesis
//! 3. batch driver (this file): per-definition failure recovery and block
//!    sequencing
//!
//! Supporting leaves:
//! - `types`: semantic and foreign-safe type mapping
//! - `naming`: snake_case conversion and reserved-word escaping
//! - `defaults`: default-value literal materialization
//!
//! A failure while generating one definition becomes a [`Diagnostic`] and
//! the batch continues; the driver always returns whatever subset it could
//! synthesize.

mod defaults;
mod dictionary;
mod interface;
mod merge;
mod naming;
mod types;

pub use defaults::ABSENT_VALUE;
pub use merge::merge;
pub use naming::{escape_reserved, rust_ident, to_snake_case};
pub use types::{map_foreign, map_semantic, DYNAMIC_TYPE};

use thiserror::Error;
use tracing::debug;

use crate::webidl::ast::Definition;

/// An error raised while synthesizing a single definition. Caught by the
/// batch driver and converted into a [`Diagnostic`]; never escalated.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("unexpected {member} member `{name}`")]
    UnexpectedMember { member: &'static str, name: String },
}

/// Kind of a recoverable generation diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    OrphanPartial,
    GenerationFailure,
}

/// A recoverable problem encountered during merging or generation.
/// Surfaced to the caller for logging; never aborts the run.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn orphan_partial(name: &str) -> Self {
        Diagnostic {
            kind: DiagnosticKind::OrphanPartial,
            message: format!("partial definition `{name}` has no matching base; dropped"),
        }
    }

    pub(crate) fn generation_failure(kind: &str, name: &str, err: &GenError) -> Self {
        Diagnostic {
            kind: DiagnosticKind::GenerationFailure,
            message: format!("failed to generate {kind} `{name}`: {err}"),
        }
    }
}

/// Result of a generation run: the concatenated Rust source blocks plus all
/// diagnostics collected along the way.
#[derive(Debug, Clone)]
pub struct GenOutcome {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Merge and generate a batch of definitions.
///
/// Interfaces and dictionaries are synthesized; enums, callbacks, typedefs,
/// and namespaces are explicitly skipped. Blocks are emitted in merger
/// order, separated by blank lines.
pub fn generate_definitions(definitions: Vec<Definition>) -> GenOutcome {
    let (merged, mut diagnostics) = merge(definitions);

    let mut blocks = Vec::new();
    for definition in &merged {
        let generated = match definition {
            Definition::Interface(body) => interface::generate(body).map(Some),
            Definition::Dictionary(body) => dictionary::generate(body).map(Some),
            _ => {
                debug!(
                    kind = definition.kind_name(),
                    name = definition.name().unwrap_or("<unnamed>"),
                    "Skipping definition kind with no generated output."
                );
                Ok(None)
            }
        };
        match generated {
            Ok(Some(block)) => blocks.push(block),
            Ok(None) => {}
            Err(err) => {
                let name = definition.name().unwrap_or("<unnamed>");
                diagnostics.push(Diagnostic::generation_failure(
                    definition.kind_name(),
                    name,
                    &err,
                ));
            }
        }
    }

    GenOutcome {
        code: blocks.join("\n"),
        diagnostics,
    }
}
