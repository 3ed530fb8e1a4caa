use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::path::Path;

static POM_DEPENDENCY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<dependency>(.*?)</dependency>").expect("valid regex"));
static POM_ARTIFACT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<artifactId>(.*?)</artifactId>").expect("valid regex"));
static QUOTED_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("valid regex"));

/// Extracts declared dependency names from one manifest file.
trait DependencyParser: Send + Sync {
    fn file_name(&self) -> &str;
    fn parse_dependencies(&self, content: &str) -> Result<Vec<String>>;
}

struct RequirementsParser;
struct PackageJsonParser;
struct PomParser;
struct SetupPyParser;

impl DependencyParser for RequirementsParser {
    fn file_name(&self) -> &str {
        "requirements.txt"
    }

    fn parse_dependencies(&self, content: &str) -> Result<Vec<String>> {
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect())
    }
}

impl DependencyParser for PackageJsonParser {
    fn file_name(&self) -> &str {
        "package.json"
    }

    fn parse_dependencies(&self, content: &str) -> Result<Vec<String>> {
        let package_json: JsonValue = serde_json::from_str(content)?;

        let mut deps = Vec::new();
        for section in ["dependencies", "devDependencies"] {
            if let Some(table) = package_json.get(section).and_then(|d| d.as_object()) {
                deps.extend(table.keys().cloned());
            }
        }
        Ok(deps)
    }
}

impl DependencyParser for PomParser {
    fn file_name(&self) -> &str {
        "pom.xml"
    }

    fn parse_dependencies(&self, content: &str) -> Result<Vec<String>> {
        Ok(POM_DEPENDENCY_BLOCK
            .captures_iter(content)
            .filter_map(|block| {
                let body = block.get(1)?.as_str();
                let artifact = POM_ARTIFACT_ID.captures(body)?.get(1)?;
                Some(artifact.as_str().trim().to_string())
            })
            .filter(|artifact| !artifact.is_empty())
            .collect())
    }
}

impl DependencyParser for SetupPyParser {
    fn file_name(&self) -> &str {
        "setup.py"
    }

    fn parse_dependencies(&self, content: &str) -> Result<Vec<String>> {
        Ok(content
            .lines()
            .filter(|line| line.contains("install_requires="))
            .flat_map(|line| QUOTED_STRING.captures_iter(line))
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|m| m.as_str().to_string())
            .filter(|dep| !dep.is_empty())
            .collect())
    }
}

pub struct DependencyAnalyzer {
    dependency_parsers: Vec<Box<dyn DependencyParser>>,
}

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self {
            dependency_parsers: vec![
                Box::new(RequirementsParser),
                Box::new(PackageJsonParser),
                Box::new(PomParser),
                Box::new(SetupPyParser),
            ],
        }
    }

    pub fn is_manifest(&self, path: &Path) -> bool {
        self.parser_for(path).is_some()
    }

    /// Dependencies declared in `path`. A manifest that fails to parse
    /// contributes nothing.
    pub fn analyze_file(&self, path: &Path, content: &str) -> Vec<String> {
        let Some(parser) = self.parser_for(path) else {
            return Vec::new();
        };

        match parser.parse_dependencies(content) {
            Ok(deps) => deps,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring malformed manifest");
                Vec::new()
            }
        }
    }

    fn parser_for(&self, path: &Path) -> Option<&dyn DependencyParser> {
        let name = path.file_name()?.to_str()?;
        self.dependency_parsers
            .iter()
            .find(|parser| parser.file_name() == name)
            .map(|parser| parser.as_ref())
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
