//! jackvm-drv — the driver/session layer (spec §5–§7).
//!
//! `compile_path` is the single entry point: it resolves a file-vs-
//! directory path (§6), compiles each `.jack` file independently with a
//! fresh [`jackvm_lex::TokenStream`]/[`jackvm_sym::SymbolTable`]/
//! [`jackvm_engine::CompilationEngine`] per file (§5: "no state crosses
//! file boundaries"), writes the sibling `.vm` file, and aggregates
//! per-file diagnostics into a [`CompileReport`]. Mirrors `faxc-drv`'s
//! `Session`/`Config`/pipeline shape, collapsed to this compiler's
//! single-pass design — there is no separate lex/parse/emit phase split
//! to orchestrate here, just "tokenize, then compile, per file".

use jackvm_engine::CompilationEngine;
use jackvm_lex::TokenStream;
use jackvm_util::CompileError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors the driver layer can produce, wrapping the compiler core's
/// [`CompileError`] plus the I/O and path-shape failures that are the
/// driver's own responsibility (spec §6: "otherwise print an informative
/// message and exit with non-zero status").
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is neither a .jack file nor a directory")]
    NotCompilable { path: PathBuf },
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Internal driver configuration. Not user-facing: spec §6 restricts the
/// CLI surface to one positional argument with no flags, env vars, or
/// config files, so this struct exists purely to give `compile_path` a
/// typed home for the one thing it's configured with, the way
/// `faxc-drv::Config` holds the richer settings its own CLI exposes.
#[derive(Debug, Clone)]
struct Config {
    input_path: PathBuf,
}

/// The outcome of compiling a file or directory: which files compiled
/// successfully and which failed, in the order they were attempted (spec
/// §7: "compilation of other files may still proceed").
#[derive(Debug, Default)]
pub struct CompileReport {
    pub compiled: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, DriverError)>,
}

impl CompileReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Compiles `path`: a single `.jack` file, or every immediate `.jack`
/// child of a directory (spec §6), non-recursive and processed in sorted
/// order for determinism.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn compile_path(path: &Path) -> DriverResult<CompileReport> {
    let config = Config {
        input_path: path.to_path_buf(),
    };

    if config.input_path.is_dir() {
        compile_directory(&config.input_path)
    } else if is_jack_file(&config.input_path) {
        let mut report = CompileReport::default();
        match compile_file(&config.input_path) {
            Ok(()) => report.compiled.push(config.input_path),
            Err(e) => report.failed.push((config.input_path, e)),
        }
        Ok(report)
    } else {
        Err(DriverError::NotCompilable {
            path: config.input_path,
        })
    }
}

fn is_jack_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("jack")
}

fn compile_directory(dir: &Path) -> DriverResult<CompileReport> {
    let listing = fs::read_dir(dir)
        .map_err(|e| CompileError::UnreadableInput(format!("{}: {e}", dir.display())))?;
    let mut entries: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| is_jack_file(p))
        .collect();
    entries.sort();

    let mut report = CompileReport::default();
    for file in entries {
        debug!(file = %file.display(), "compiling");
        match compile_file(&file) {
            Ok(()) => report.compiled.push(file),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "compilation failed");
                report.failed.push((file, e));
            }
        }
    }
    Ok(report)
}

/// Compiles one `X.jack` file to a sibling `X.vm`, with a fresh tokenizer
/// and compilation engine owned for exactly this file's lifetime (spec
/// §5).
#[instrument(skip_all, fields(file = %path.display()))]
fn compile_file(path: &Path) -> DriverResult<()> {
    let source = fs::read_to_string(path)
        .map_err(|e| CompileError::UnreadableInput(format!("{}: {e}", path.display())))?;

    let tokens = TokenStream::new(jackvm_lex::tokenize(&source));

    let output_path = path.with_extension("vm");
    let output_file = fs::File::create(&output_path).map_err(|source| DriverError::Write {
        path: output_path.clone(),
        source,
    })?;
    let writer = io::BufWriter::new(output_file);

    let engine = CompilationEngine::new(tokens, writer);
    engine.compile()?;

    debug!(output = %output_path.display(), "wrote VM output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn compiles_a_single_file() {
        let dir = tempdir().unwrap();
        let source_path = dir.path().join("Main.jack");
        fs::write(
            &source_path,
            "class Main { function void main() { return; } }",
        )
        .unwrap();

        let report = compile_path(&source_path).unwrap();
        assert!(report.all_succeeded());
        assert_eq!(report.compiled, vec![source_path.clone()]);

        let vm_path = source_path.with_extension("vm");
        let vm_text = fs::read_to_string(vm_path).unwrap();
        assert!(vm_text.contains("function Main.main 0"));
    }

    #[test]
    fn compiles_every_jack_file_in_a_directory_sorted() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("B.jack"),
            "class B { function void f() { return; } }",
        )
        .unwrap();
        fs::write(
            dir.path().join("A.jack"),
            "class A { function void f() { return; } }",
        )
        .unwrap();
        fs::write(dir.path().join("readme.txt"), "not jack").unwrap();

        let report = compile_path(dir.path()).unwrap();
        assert!(report.all_succeeded());
        let names: Vec<_> = report
            .compiled
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["A.jack", "B.jack"]);
    }

    #[test]
    fn non_jack_non_directory_path_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "hello").unwrap();

        let result = compile_path(&path);
        assert!(matches!(result, Err(DriverError::NotCompilable { .. })));
    }

    #[test]
    fn a_missing_file_surfaces_as_unreadable_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Ghost.jack");

        let result = compile_file(&path);
        assert!(matches!(
            result,
            Err(DriverError::Compile(CompileError::UnreadableInput(_)))
        ));
    }

    #[test]
    fn an_unreadable_directory_surfaces_as_unreadable_input() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = compile_directory(&missing);
        assert!(matches!(
            result,
            Err(DriverError::Compile(CompileError::UnreadableInput(_)))
        ));
    }

    #[test]
    fn a_failing_file_does_not_stop_the_rest_of_the_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Bad.jack"), "class { oops").unwrap();
        fs::write(
            dir.path().join("Good.jack"),
            "class Good { function void f() { return; } }",
        )
        .unwrap();

        let report = compile_path(dir.path()).unwrap();
        assert_eq!(report.compiled.len(), 1);
        assert_eq!(report.failed.len(), 1);
    }
}
