use crate::analysis::PROJECT_MARKERS;
use std::fs;
use std::path::{Path, PathBuf};

/// Archive tool droppings that never hold the project.
const JUNK_DIRS: &[&str] = &["__MACOSX", "_MACOS"];

fn has_marker(dir: &Path) -> bool {
    PROJECT_MARKERS
        .iter()
        .any(|(marker, _)| dir.join(marker).is_file())
}

/// Finds the real project root in an extracted tree: `dir` itself when it
/// holds a marker file, else the first immediate subdirectory (by name) that
/// does, else `dir`.
pub fn discover_project_root(dir: &Path) -> PathBuf {
    if has_marker(dir) {
        return dir.to_path_buf();
    }

    let mut subdirs: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| !JUNK_DIRS.contains(&name))
                    .unwrap_or(true)
            })
            .map(|e| e.path())
            .collect(),
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "cannot list directory");
            return dir.to_path_buf();
        }
    };
    subdirs.sort();

    subdirs
        .into_iter()
        .find(|sub| has_marker(sub))
        .unwrap_or_else(|| dir.to_path_buf())
}
