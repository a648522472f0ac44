//! Stub and configuration publishing
//!
//! Copies every bundled stub into the project's published stubs directory and
//! writes a default `modforge.toml`, so a project can customize templates and
//! paths. Existing files go through the same [`OverwritePolicy`] as generated
//! artifacts.

use std::path::{Path, PathBuf};

use crate::config::{ModforgeConfig, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::fs::Filesystem;
use crate::generator::{write_file, GeneratedArtifact, GenerationReport, Outcome};
use crate::policy::{Confirm, OverwritePolicy};
use crate::stubs::{published_path, StubCatalog};

/// Key reported for the configuration file
pub const CONFIG_KEY: &str = "config";

/// Publish `catalog` and a default configuration under `project_root`
///
/// Stubs go to `config.stubs.published_dir`; the configuration file is
/// written as [`CONFIG_FILE_NAME`].
///
/// # Errors
///
/// Returns an error only if the default configuration cannot be rendered.
/// Per-file failures are recorded in the report.
pub fn publish(
    fs: &dyn Filesystem,
    config: &ModforgeConfig,
    project_root: &Path,
    catalog: &StubCatalog,
    force: bool,
    confirm: &mut dyn Confirm,
) -> Result<GenerationReport> {
    let default_config = ModforgeConfig::default().to_toml()?;
    let mut policy = OverwritePolicy::new(force, confirm);
    let mut report = GenerationReport::default();

    let stubs_dir = Path::new(&config.stubs.published_dir);
    for (id, body) in catalog.iter() {
        let relative = published_path(stubs_dir, id);
        report.push(publish_file(fs, project_root, relative, id, body, &mut policy));
    }

    report.push(publish_file(
        fs,
        project_root,
        PathBuf::from(CONFIG_FILE_NAME),
        CONFIG_KEY,
        &default_config,
        &mut policy,
    ));

    Ok(report)
}

fn publish_file(
    fs: &dyn Filesystem,
    project_root: &Path,
    relative: PathBuf,
    key: &str,
    contents: &str,
    policy: &mut OverwritePolicy<'_>,
) -> GeneratedArtifact {
    let file_name = relative
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let absolute = project_root.join(&relative);

    let outcome = match write_guarded(fs, &absolute, &file_name, contents, policy) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(file = %relative.display(), error = %e, "publish failed");
            Outcome::Failed(e.to_string())
        }
    };
    tracing::info!(file = %relative.display(), %outcome, "published");

    GeneratedArtifact {
        key: key.to_string(),
        kind: None,
        path: relative,
        class_name: file_name,
        outcome,
    }
}

fn write_guarded(
    fs: &dyn Filesystem,
    path: &Path,
    description: &str,
    contents: &str,
    policy: &mut OverwritePolicy<'_>,
) -> Result<Outcome> {
    let existing = fs.file_exists(path);
    if existing && !policy.should_overwrite(description)? {
        return Ok(Outcome::SkippedExisting);
    }
    write_file(fs, path, contents)?;
    Ok(if existing { Outcome::Replaced } else { Outcome::Created })
}
