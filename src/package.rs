use crate::config::ArchiveFormat;
use crate::generator::Artifact;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(artifact.name());
        fs::write(&path, artifact.bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Packages the project tree plus the artifacts at the archive root.
/// Project files that collide with an artifact name are replaced, and
/// `dest` itself is never packed even when it lies inside the project.
pub fn write_archive(
    project_root: &Path,
    artifacts: &[Artifact],
    dest: &Path,
    format: ArchiveFormat,
) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let out = File::create(dest)
        .with_context(|| format!("Failed to create archive {}", dest.display()))?;
    let dest_path = fs::canonicalize(dest)
        .with_context(|| format!("Failed to resolve archive path {}", dest.display()))?;
    let files = project_files(project_root, artifacts, &dest_path)?;

    let written = match format {
        ArchiveFormat::Zip => write_zip(out, &files, artifacts),
        ArchiveFormat::TarGz => write_tar_gz(out, &files, artifacts),
    };
    written.with_context(|| format!("Failed to write {} archive {}", format, dest.display()))?;

    tracing::info!(dest = %dest.display(), files = files.len(), %format, "archive written");
    Ok(())
}

/// (absolute, archive name) pairs in a stable order. `dest` is canonical.
fn project_files(
    root: &Path,
    artifacts: &[Artifact],
    dest: &Path,
) -> Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name() == dest.file_name().unwrap_or_default()
            && fs::canonicalize(entry.path()).map_or(false, |path| path == dest)
        {
            continue;
        }
        let relative = entry.path().strip_prefix(root)?;
        let name = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");
        if artifacts.iter().any(|a| a.name() == name) {
            continue;
        }
        files.push((entry.path().to_path_buf(), name));
    }
    Ok(files)
}

fn write_zip(out: File, files: &[(PathBuf, String)], artifacts: &[Artifact]) -> Result<()> {
    let mut zip = zip::ZipWriter::new(out);
    let options = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (path, name) in files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&fs::read(path)?)?;
    }
    for artifact in artifacts {
        zip.start_file(artifact.name(), options)?;
        zip.write_all(artifact.bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn write_tar_gz(out: File, files: &[(PathBuf, String)], artifacts: &[Artifact]) -> Result<()> {
    let mut builder = tar::Builder::new(GzEncoder::new(out, Compression::default()));

    for (path, name) in files {
        builder.append_path_with_name(path, name)?;
    }
    for artifact in artifacts {
        let mut header = tar::Header::new_gnu();
        header.set_size(artifact.bytes().len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_cksum();
        builder.append_data(&mut header, artifact.name(), artifact.bytes())?;
    }

    builder.into_inner()?.finish()?;
    Ok(())
}
