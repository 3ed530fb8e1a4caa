use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

use super::language::LANGUAGE_EXTENSIONS;

pub const PORT_PATTERNS: &[&str] = &[
    r"port\s*=\s*(\d+)",
    r"PORT\s*=\s*(\d+)",
    r":(\d+)",
    r"port:\s*(\d+)",
];

/// Config-ish extensions scanned in addition to source files.
pub const PORT_SCAN_EXTENSIONS: &[&str] = &["yml", "yaml", "json", "conf"];

static COMPILED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    PORT_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid port pattern"))
        .collect()
});

pub fn should_scan(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    PORT_SCAN_EXTENSIONS.contains(&ext) || LANGUAGE_EXTENSIONS.iter().any(|(known, _)| *known == ext)
}

/// Every numeric capture of every pattern. False positives such as
/// `version:2` are kept.
pub fn scan_ports(content: &str, ports: &mut BTreeSet<u32>) {
    for pattern in COMPILED_PATTERNS.iter() {
        for cap in pattern.captures_iter(content) {
            if let Some(port) = cap.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                ports.insert(port);
            }
        }
    }
}
