use crate::config::AnalysisConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

pub mod content;
mod dependencies;
mod environment;
mod language;
mod ports;
mod project_type;

#[cfg(test)]
mod tests;

pub use dependencies::DependencyAnalyzer;
pub use environment::{collect_environment, ENV_FILES};
pub use language::{Language, LanguageDetector, CONTENT_SIGNATURES, LANGUAGE_EXTENSIONS};
pub use ports::{PORT_PATTERNS, PORT_SCAN_EXTENSIONS};
pub use project_type::{BuildRequirements, ProjectType, BUILD_REQUIREMENTS, PROJECT_MARKERS};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot read project root {path}: {source}")]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("project root {0} is not a directory")]
    NotADirectory(PathBuf),
}

/// One scanned file, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub language: Language,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectProfile {
    pub primary_language: Language,
    pub project_type: ProjectType,
    pub dependencies: BTreeSet<String>,
    pub entry_points: Vec<PathBuf>,
    pub ports: BTreeSet<u32>,
    pub environment: BTreeMap<String, String>,
    pub build_requirements: BuildRequirements,
    pub files: Vec<FileRecord>,
}

impl ProjectProfile {
    /// Whether `name` was scanned directly under the project root.
    pub fn has_root_file(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.path == Path::new(name))
    }
}

pub struct ProjectAnalyzer {
    root_path: PathBuf,
    options: AnalysisConfig,
    language_detector: LanguageDetector,
    dependency_analyzer: DependencyAnalyzer,
}

impl ProjectAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_options(path, AnalysisConfig::default())
    }

    pub fn with_options<P: AsRef<Path>>(path: P, options: AnalysisConfig) -> Self {
        Self {
            root_path: path.as_ref().to_path_buf(),
            options,
            language_detector: LanguageDetector::new(),
            dependency_analyzer: DependencyAnalyzer::new(),
        }
    }

    /// Walks the tree once. Only an unreadable root is an error; every
    /// per-file failure just means that file gives no signal.
    pub fn analyze(&self) -> Result<ProjectProfile, AnalysisError> {
        self.check_root()?;

        let project_type = ProjectType::detect(&self.root_path);
        let exclude = self.exclude_patterns();

        let mut primary_language = Language::Unknown;
        let mut dependencies = BTreeSet::new();
        let mut entry_points = Vec::new();
        let mut ports = BTreeSet::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root_path)
                .unwrap_or(entry.path())
                .to_path_buf();
            if exclude.iter().any(|pattern| pattern.matches_path(&relative)) {
                tracing::trace!(path = %relative.display(), "excluded");
                continue;
            }

            let text = self.read_text(&entry);
            let language = self.language_detector.detect(&relative, &text);
            if !primary_language.is_known() && language.is_known() {
                primary_language = language;
            }

            let file_deps = self.dependency_analyzer.analyze_file(&relative, &text);
            dependencies.extend(file_deps.iter().cloned());

            if self.language_detector.is_source_file(&relative) {
                entry_points.push(relative.clone());
            }
            if ports::should_scan(&relative) {
                ports::scan_ports(&text, &mut ports);
            }

            files.push(FileRecord {
                path: relative,
                language,
                dependencies: file_deps,
            });
        }

        tracing::debug!(
            root = %self.root_path.display(),
            files = files.len(),
            %project_type,
            %primary_language,
            "analysis complete"
        );

        Ok(ProjectProfile {
            primary_language,
            project_type,
            dependencies,
            entry_points,
            ports,
            environment: collect_environment(&self.root_path),
            build_requirements: project_type.build_requirements(),
            files,
        })
    }

    fn check_root(&self) -> Result<(), AnalysisError> {
        let unreadable = |source: std::io::Error| AnalysisError::UnreadableRoot {
            path: self.root_path.clone(),
            source,
        };

        let metadata = fs::metadata(&self.root_path).map_err(unreadable)?;
        if !metadata.is_dir() {
            return Err(AnalysisError::NotADirectory(self.root_path.clone()));
        }
        fs::read_dir(&self.root_path).map_err(unreadable)?;
        Ok(())
    }

    fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.options
            .exclude
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(glob) => Some(glob),
                Err(e) => {
                    tracing::warn!(%pattern, error = %e, "ignoring invalid exclude pattern");
                    None
                }
            })
            .collect()
    }

    fn read_text(&self, entry: &DirEntry) -> String {
        let path = entry.path();
        match entry.metadata() {
            Ok(metadata) if metadata.len() > self.options.max_file_bytes => {
                tracing::debug!(path = %path.display(), size = metadata.len(), "file too large, not reading");
                return String::new();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot stat file");
                return String::new();
            }
        }

        match content::read_file(path) {
            Ok(file) => file.text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot read file");
                String::new()
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
