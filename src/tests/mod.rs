use std::fs;
use std::path::Path;
use tempfile::TempDir;


// Test utilities and helpers
pub(crate) struct TestUtils;

impl TestUtils {
    pub fn create_project(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (relative, content) in files {
            Self::write(temp_dir.path(), relative, content);
        }
        temp_dir
    }

    pub fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
