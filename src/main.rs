//! Command-line driver: resolves input AST files, runs generation, writes
//! the resulting `.rs` artifacts, and surfaces diagnostics as log lines.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use webidl_bindgen::generate_file;

#[derive(Parser)]
#[command(
    name = "webidl-bindgen",
    version,
    about = "Generate Rust foreign-function bindings from webidl2.js WebIDL ASTs"
)]
struct Cli {
    /// A webidl2.js AST JSON file, or a directory of them.
    input: PathBuf,

    /// Directory for the generated .rs files. Defaults to the input's
    /// directory.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let inputs = collect_inputs(&cli.input)?;
    if inputs.is_empty() {
        return Err(format!(
            "No .json AST files found under {}",
            cli.input.display()
        ));
    }

    let out_dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None if cli.input.is_dir() => cli.input.clone(),
        None => cli
            .input
            .parent()
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    for input in &inputs {
        let generated = generate_file(input, &out_dir)
            .map_err(|err| format!("Generation failed for {}: {err}", input.display()))?;
        for diagnostic in &generated.diagnostics {
            warn!(input = %input.display(), "{}", diagnostic.message);
        }
        info!(
            input = %input.display(),
            output = %generated.path.display(),
            "Bindings generated."
        );
    }

    Ok(())
}

/// A single file, or every `.json` file below a directory in path order.
fn collect_inputs(input: &PathBuf) -> Result<Vec<PathBuf>, String> {
    if input.is_file() {
        return Ok(vec![input.clone()]);
    }
    if !input.is_dir() {
        return Err(format!("Input path does not exist: {}", input.display()));
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "json")
        })
        .collect();
    inputs.sort();
    Ok(inputs)
}
