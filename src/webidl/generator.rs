//! Pipeline entry points.
//!
//! The full pipeline is:
//! 1. Parse: webidl2.js AST JSON -> `Vec<Definition>`
//! 2. Merge: partials folded into their bases
//! 3. Generate: per-definition Rust text with per-definition recovery
//! 4. Emit: blocks concatenated into a single buffer
//!
//! The only fatal failure is undecodable input; everything downstream is
//! recovered per definition and reported through [`GenOutcome::diagnostics`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::webidl::ast;
use crate::webidl::gen::{self, Diagnostic, GenOutcome};

/// Errors from the generation pipeline and its file boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse WebIDL AST JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to {action} `{path}`: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Generate Rust binding source from a webidl2.js AST JSON string.
pub fn generate(ast_json: &str) -> Result<GenOutcome, Error> {
    let definitions = ast::parse_ast(ast_json)?;
    debug!(definitions = definitions.len(), "Parsed WebIDL AST.");
    Ok(gen::generate_definitions(definitions))
}

/// A written output artifact and the diagnostics produced while generating
/// it.
#[derive(Debug)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate bindings for one AST file and write them next to `out_dir`,
/// using the input's file stem with an `.rs` extension. One input artifact
/// produces one output buffer; no file-splitting policy is applied.
pub fn generate_file(input: &Path, out_dir: &Path) -> Result<GeneratedFile, Error> {
    let ast_json = fs::read_to_string(input).map_err(|source| Error::Io {
        action: "read",
        path: input.to_path_buf(),
        source,
    })?;

    let outcome = generate(&ast_json)?;

    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("bindings");
    let out_path = out_dir.join(format!("{stem}.rs"));

    fs::create_dir_all(out_dir).map_err(|source| Error::Io {
        action: "create",
        path: out_dir.to_path_buf(),
        source,
    })?;
    fs::write(&out_path, &outcome.code).map_err(|source| Error::Io {
        action: "write",
        path: out_path.clone(),
        source,
    })?;

    debug!(
        out_path = %out_path.display(),
        code_len = outcome.code.len(),
        diagnostics = outcome.diagnostics.len(),
        "Bindings written."
    );

    Ok(GeneratedFile {
        path: out_path,
        diagnostics: outcome.diagnostics,
    })
}
