use crate::analysis::ProjectProfile;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Django,
    Flask,
    FastApi,
    NextJs,
    React,
    Vue,
    Express,
    Unknown,
}

pub struct FrameworkRule {
    pub marker: &'static str,
    pub dependency: &'static str,
    pub framework: Framework,
}

/// Checked top to bottom; the first rule whose marker file sits at the root
/// and whose substring appears in some dependency wins.
pub const FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule { marker: "requirements.txt", dependency: "django", framework: Framework::Django },
    FrameworkRule { marker: "requirements.txt", dependency: "flask", framework: Framework::Flask },
    FrameworkRule { marker: "requirements.txt", dependency: "fastapi", framework: Framework::FastApi },
    FrameworkRule { marker: "package.json", dependency: "next", framework: Framework::NextJs },
    FrameworkRule { marker: "package.json", dependency: "react", framework: Framework::React },
    FrameworkRule { marker: "package.json", dependency: "vue", framework: Framework::Vue },
    FrameworkRule { marker: "package.json", dependency: "express", framework: Framework::Express },
];

impl Framework {
    pub fn detect(profile: &ProjectProfile) -> Self {
        let lowered: Vec<String> = profile
            .dependencies
            .iter()
            .map(|dep| dep.to_lowercase())
            .collect();

        FRAMEWORK_RULES
            .iter()
            .filter(|rule| profile.has_root_file(rule.marker))
            .find(|rule| lowered.iter().any(|dep| dep.contains(rule.dependency)))
            .map(|rule| rule.framework)
            .unwrap_or(Framework::Unknown)
    }

    /// Frameworks that get the postgres sidecar in the compose manifest.
    pub fn wants_database(&self) -> bool {
        matches!(self, Framework::Django | Framework::Flask | Framework::FastApi)
    }

    pub fn is_frontend(&self) -> bool {
        matches!(self, Framework::React | Framework::NextJs | Framework::Vue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Django => "django",
            Framework::Flask => "flask",
            Framework::FastApi => "fastapi",
            Framework::NextJs => "nextjs",
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Express => "express",
            Framework::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
