//! Maps a [`ProjectProfile`] to container artifacts.
//!
//! Generation is a pure function of the profile and the [`GenerationConfig`]:
//! the same inputs always render byte-identical output. Detected ports are
//! informational only; the Dockerfile and compose manifest always use the
//! configured host and port.

use crate::analysis::ProjectProfile;
use crate::config::GenerationConfig;
use serde::Serialize;
use std::fmt;

mod compose;
mod dockerfile;
mod framework;
mod ignore;

#[cfg(test)]
mod tests;

pub use compose::{DATABASE_IMAGE, DATABASE_URL};
pub use dockerfile::{select_base, Template, BASE_IMAGES, GENERIC_IMAGE};
pub use framework::{Framework, FrameworkRule, FRAMEWORK_RULES};
pub use ignore::{BASELINE_IGNORE, DJANGO_IGNORE, FRONTEND_IGNORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    Dockerfile,
    Compose,
    DockerIgnore,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Dockerfile => "Dockerfile",
            ArtifactKind::Compose => "docker-compose.yml",
            ArtifactKind::DockerIgnore => ".dockerignore",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content: String,
}

impl Artifact {
    pub fn name(&self) -> &'static str {
        self.kind.file_name()
    }

    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

pub struct ArtifactGenerator;

impl ArtifactGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Always Dockerfile, compose manifest, ignore file, in that order.
    pub fn generate(&self, profile: &ProjectProfile, config: &GenerationConfig) -> Vec<Artifact> {
        let framework = Framework::detect(profile);
        tracing::debug!(
            project_type = %profile.project_type,
            %framework,
            database = framework.wants_database(),
            "generating artifacts"
        );

        vec![
            Artifact {
                kind: ArtifactKind::Dockerfile,
                content: dockerfile::render(profile, framework, config),
            },
            Artifact {
                kind: ArtifactKind::Compose,
                content: compose::render(framework, config),
            },
            Artifact {
                kind: ArtifactKind::DockerIgnore,
                content: ignore::render(framework),
            },
        ]
    }
}

impl Default for ArtifactGenerator {
    fn default() -> Self {
        Self::new()
    }
}
