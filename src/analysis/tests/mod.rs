use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod analyzer_tests;

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub(crate) fn project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (relative, content) in files {
        write(temp_dir.path(), relative, content);
    }
    temp_dir
}
