use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Ruby,
    Php,
    Go,
    Rust,
    Unknown,
}

/// Extension → language. Also the set of source extensions used for entry points.
pub const LANGUAGE_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("js", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("java", Language::Java),
    ("php", Language::Php),
    ("rb", Language::Ruby),
    ("go", Language::Go),
    ("rs", Language::Rust),
];

/// Content fallback for files without a known extension, checked top to bottom.
pub const CONTENT_SIGNATURES: &[(&str, Language)] = &[
    ("import ", Language::Python),
    ("def ", Language::Python),
    ("function ", Language::JavaScript),
    ("const ", Language::JavaScript),
    ("public class", Language::Java),
    ("<?php", Language::Php),
    ("package ", Language::Go),
    ("fn ", Language::Rust),
    ("interface ", Language::TypeScript),
];

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        LANGUAGE_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_content(content: &str) -> Self {
        CONTENT_SIGNATURES
            .iter()
            .find(|(needle, _)| content.contains(needle))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != Language::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Extension first; content only when the extension says nothing.
    /// Binary files reach here with empty content and so stay unknown.
    pub fn detect(&self, path: &Path, content: &str) -> Language {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Language::from_extension)
            .unwrap_or(Language::Unknown);

        if by_extension.is_known() {
            return by_extension;
        }
        Language::from_content(content)
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| Language::from_extension(ext).is_known())
            .unwrap_or(false)
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}
