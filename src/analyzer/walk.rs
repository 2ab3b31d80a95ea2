use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::AnalyzeOptions;
use crate::error::AnalyzeError;

/// Lazily yields every candidate source file below `root`, recursing fully.
/// Directories, test files and files with another extension are skipped.
/// An unreadable entry is yielded as an error.
pub fn find_source_files<'a>(
    root: &Path,
    opts: &'a AnalyzeOptions,
) -> impl Iterator<Item = Result<PathBuf, AnalyzeError>> + 'a {
    let walk_root = root.to_path_buf();
    WalkDir::new(root)
        .follow_links(opts.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(AnalyzeError::Walk {
                        root: walk_root.clone(),
                        source,
                    }))
                }
            };
            let path = entry.path();
            if entry.file_type().is_dir() || (entry.path_is_symlink() && !path.is_file()) {
                return None;
            }
            let file_name = entry.file_name().to_string_lossy();
            if opts.is_test_file(&file_name) {
                tracing::debug!("skipping test file {}", path.display());
                return None;
            }
            if path.extension().map_or(true, |ext| ext != opts.extension.as_str()) {
                return None;
            }
            Some(Ok(entry.into_path()))
        })
}
