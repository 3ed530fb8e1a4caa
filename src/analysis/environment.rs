use std::collections::BTreeMap;
use std::path::Path;

use super::content;

/// Looked up at the project root only; later files override earlier keys.
pub const ENV_FILES: &[&str] = &[".env", ".env.example", "config.env"];

pub fn collect_environment(root: &Path) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    for name in ENV_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        match content::read_file(&path) {
            Ok(file) => parse_env(&file.text, &mut env),
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "skipping env file"),
        }
    }

    env
}

pub fn parse_env(text: &str, env: &mut BTreeMap<String, String>) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                env.insert(key.to_string(), value.to_string());
            }
        }
    }
}
