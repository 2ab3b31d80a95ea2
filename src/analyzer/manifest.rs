use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::entrypoint::select_entrypoint;
use super::extract::exported_declarations;
use super::matcher::find_reference;
use super::walk::find_source_files;
use crate::config::AnalyzeOptions;
use crate::error::{AnalyzeError, Result};
use crate::parser::SourceFile;

/// The single output of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub package_name: String,
    pub function_name: String,
    pub watch: Vec<String>,
}

impl Manifest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Relative paths keyed by resolved file identity, so two spellings of the
/// same file collapse into one entry. The entrypoint is always present.
#[derive(Debug, Clone)]
pub struct WatchSet {
    entrypoint: PathBuf,
    files: BTreeMap<PathBuf, String>,
}

impl WatchSet {
    pub fn new(entrypoint_abs: PathBuf, entrypoint_rel: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(entrypoint_abs.clone(), entrypoint_rel);
        Self {
            entrypoint: entrypoint_abs,
            files,
        }
    }

    /// Returns `false` when the file was already present.
    pub fn insert(&mut self, abs: PathBuf, rel: String) -> bool {
        if self.files.contains_key(&abs) {
            return false;
        }
        self.files.insert(abs, rel);
        true
    }

    pub fn contains(&self, abs: &Path) -> bool {
        self.files.contains_key(abs)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Entrypoint first, then the related files in lexicographic order.
    pub fn into_paths(mut self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.files.len());
        if let Some(entry) = self.files.remove(&self.entrypoint) {
            out.push(entry);
        }
        let mut rest: Vec<String> = self.files.into_values().collect();
        rest.sort();
        out.extend(rest);
        out
    }
}

/// Canonicalize when possible so different spellings compare equal.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// `path` relative to `base`, rendered with `/` separators.
fn relative_display(base: &Path, path: &Path) -> String {
    let rel = pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf());
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Runs the whole pipeline for one entrypoint: parse it, walk its directory,
/// keep every candidate whose exported names occur in the entrypoint text,
/// and pair the result with the entrypoint's package and primary handler.
pub fn analyze(entry_path: &Path, opts: &AnalyzeOptions) -> Result<Manifest> {
    let entry = SourceFile::read(entry_path)?;
    let entry_ast = entry.parse()?;
    let selected = select_entrypoint(&entry_ast);

    let entry_dir = match entry_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let entry_abs = normalize_path(entry_path);
    let entry_rel = entry_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative_display(&entry_dir, entry_path));

    let mut watch = WatchSet::new(entry_abs.clone(), entry_rel);
    for candidate in find_source_files(&entry_dir, opts) {
        let candidate = candidate?;
        let abs = normalize_path(&candidate);
        if abs == entry_abs || watch.contains(&abs) {
            continue;
        }

        let file = SourceFile::read(&candidate)?;
        let exports = exported_declarations(&file.parse()?);
        match find_reference(&entry.text, &exports) {
            Some(decl) => {
                let rel = relative_display(&entry_dir, &candidate);
                tracing::debug!(
                    "watching {} (references `{}` declared on line {})",
                    rel,
                    decl.name,
                    decl.line
                );
                watch.insert(abs, rel);
            }
            None => {
                tracing::debug!(
                    "{} is unrelated ({} exported names)",
                    candidate.display(),
                    exports.len()
                );
            }
        }
    }

    let Some(function_name) = selected.function_name else {
        tracing::warn!(
            "{} declares no exported function; nothing to serve",
            entry_path.display()
        );
        return Err(AnalyzeError::NoHandlerFound {
            path: entry_path.to_path_buf(),
        });
    };

    tracing::info!(
        "{}.{} depends on {} file(s)",
        selected.package_name,
        function_name,
        watch.len()
    );
    Ok(Manifest {
        package_name: selected.package_name,
        function_name,
        watch: watch.into_paths(),
    })
}
