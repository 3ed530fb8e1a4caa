pub mod analysis;
pub mod config;
pub mod generator;
pub mod package;
pub mod workspace;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analysis::{AnalysisError, FileRecord, Language, ProjectAnalyzer, ProjectProfile, ProjectType};
pub use config::{ArchiveFormat, Config, GenerationConfig};
pub use generator::{Artifact, ArtifactGenerator, ArtifactKind, Framework};

/// Analyze `root` and render its artifacts.
pub fn dockerize(
    root: &std::path::Path,
    config: &GenerationConfig,
) -> Result<(ProjectProfile, Vec<Artifact>), AnalysisError> {
    let profile = ProjectAnalyzer::new(root).analyze()?;
    let artifacts = ArtifactGenerator::new().generate(&profile, config);
    Ok((profile, artifacts))
}
