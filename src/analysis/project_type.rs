use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Nodejs,
    Python,
    Java,
    Ruby,
    Php,
    Go,
    Rust,
    Unknown,
}

/// Root marker files in priority order; the first present one decides.
pub const PROJECT_MARKERS: &[(&str, ProjectType)] = &[
    ("package.json", ProjectType::Nodejs),
    ("requirements.txt", ProjectType::Python),
    ("pom.xml", ProjectType::Java),
    ("Gemfile", ProjectType::Ruby),
    ("composer.json", ProjectType::Php),
    ("go.mod", ProjectType::Go),
    ("Cargo.toml", ProjectType::Rust),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildRequirements {
    pub tools: Vec<String>,
    pub commands: Vec<String>,
}

pub struct BuildRecipe {
    pub project_type: ProjectType,
    pub tools: &'static [&'static str],
    pub commands: &'static [&'static str],
}

pub const BUILD_REQUIREMENTS: &[BuildRecipe] = &[
    BuildRecipe {
        project_type: ProjectType::Nodejs,
        tools: &["node", "npm"],
        commands: &["npm install"],
    },
    BuildRecipe {
        project_type: ProjectType::Python,
        tools: &["python", "pip"],
        commands: &["pip install -r requirements.txt"],
    },
    BuildRecipe {
        project_type: ProjectType::Java,
        tools: &["java", "maven"],
        commands: &["mvn clean install"],
    },
];

impl ProjectType {
    pub fn detect(root: &Path) -> Self {
        PROJECT_MARKERS
            .iter()
            .find(|(marker, _)| root.join(marker).is_file())
            .map(|(_, project_type)| *project_type)
            .unwrap_or(ProjectType::Unknown)
    }

    pub fn build_requirements(&self) -> BuildRequirements {
        BUILD_REQUIREMENTS
            .iter()
            .find(|recipe| recipe.project_type == *self)
            .map(|recipe| BuildRequirements {
                tools: recipe.tools.iter().map(|t| t.to_string()).collect(),
                commands: recipe.commands.iter().map(|c| c.to_string()).collect(),
            })
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Nodejs => "nodejs",
            ProjectType::Python => "python",
            ProjectType::Java => "java",
            ProjectType::Ruby => "ruby",
            ProjectType::Php => "php",
            ProjectType::Go => "go",
            ProjectType::Rust => "rust",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
