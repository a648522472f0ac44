//! Component generator
//!
//! Walks the [`Manifest`] in order and, for each enabled component, resolves
//! its path and class name, settles any conflict with an existing artifact
//! through the [`OverwritePolicy`], then instantiates and writes the template.
//!
//! Failures are artifact-local: a missing template or a filesystem error is
//! recorded as [`Outcome::Failed`] and the run moves on to the next component.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ModforgeConfig;
use crate::error::{ModforgeError, Result};
use crate::fs::Filesystem;
use crate::instantiate::instantiate;
use crate::manifest::{ArtifactKind, ComponentSpec, Manifest, SkipFlag};
use crate::naming::NamingTable;
use crate::policy::{Confirm, OverwritePolicy};
use crate::stubs::StubCatalog;

/// Per-run options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Replace existing artifacts without asking
    pub force: bool,
    /// Use API-mode template variants
    pub api: bool,
    /// Disabled components
    pub skip: BTreeSet<SkipFlag>,
}

impl GenerateOptions {
    /// Whether `component` is disabled by these options
    #[must_use]
    pub fn skips(&self, component: &ComponentSpec) -> bool {
        component
            .skip_flag
            .is_some_and(|flag| self.skip.contains(&flag))
    }
}

/// What happened to one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Written where nothing existed
    Created,
    /// Written over (or after deleting) an existing artifact
    Replaced,
    /// An existing artifact was kept
    SkippedExisting,
    /// Not written; carries the cause
    Failed(String),
}

impl Outcome {
    /// Whether this outcome makes the run fail
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Whether a file was written
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Created | Self::Replaced)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Replaced => f.write_str("replaced"),
            Self::SkippedExisting => f.write_str("skipped"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One entry of a run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Component key, stub id, or `config`
    pub key: String,
    /// Artifact kind; `None` for published stubs and configuration
    pub kind: Option<ArtifactKind>,
    /// Path relative to the project root
    pub path: PathBuf,
    /// Resolved class name (file stem)
    pub class_name: String,
    /// Result
    pub outcome: Outcome,
}

/// Ordered outcomes of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    artifacts: Vec<GeneratedArtifact>,
}

impl GenerationReport {
    /// Entries in processing order
    #[must_use]
    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        &self.artifacts
    }

    /// True when no artifact failed
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.artifacts.iter().any(|a| a.outcome.is_failure())
    }

    /// Entries that failed
    pub fn failures(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter().filter(|a| a.outcome.is_failure())
    }

    /// Number of entries with exactly `outcome`
    ///
    /// Every [`Outcome::Failed`] counts as equal to any other.
    #[must_use]
    pub fn count(&self, outcome: &Outcome) -> usize {
        self.artifacts
            .iter()
            .filter(|a| std::mem::discriminant(&a.outcome) == std::mem::discriminant(outcome))
            .count()
    }

    /// Entry for `key`, if it was processed
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.key == key)
    }

    pub(crate) fn push(&mut self, artifact: GeneratedArtifact) {
        self.artifacts.push(artifact);
    }
}

/// Generator bound to one filesystem and project root
pub struct Generator<'fs> {
    fs: &'fs dyn Filesystem,
    manifest: Manifest,
    stubs: StubCatalog,
    project_root: PathBuf,
    published_dir: PathBuf,
    extension: String,
}

impl fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("project_root", &self.project_root)
            .field("published_dir", &self.published_dir)
            .field("extension", &self.extension)
            .field("components", &self.manifest.len())
            .finish_non_exhaustive()
    }
}

impl<'fs> Generator<'fs> {
    /// Generator using the standard manifest and bundled stubs
    ///
    /// Paths are resolved under `project_root`; an empty path resolves
    /// relative to the current directory.
    #[must_use]
    pub fn new(fs: &'fs dyn Filesystem, config: &ModforgeConfig, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            fs,
            manifest: Manifest::standard(&config.paths),
            stubs: StubCatalog::bundled(),
            published_dir: config.published_stubs_dir(&project_root),
            extension: config.output.extension.clone(),
            project_root,
        }
    }

    /// Replace the bundled stub catalog
    #[must_use]
    pub fn with_stubs(mut self, stubs: StubCatalog) -> Self {
        self.stubs = stubs;
        self
    }

    /// The manifest this generator walks
    #[must_use]
    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Generate every enabled component for `naming`
    pub fn generate(
        &self,
        naming: &NamingTable,
        options: &GenerateOptions,
        confirm: &mut dyn Confirm,
    ) -> GenerationReport {
        self.generate_with(naming, options, confirm, |_, _| {})
    }

    /// Like [`Generator::generate`], calling `on_progress` once per manifest entry
    ///
    /// The artifact is `None` for components disabled by `options`.
    pub fn generate_with<F>(
        &self,
        naming: &NamingTable,
        options: &GenerateOptions,
        confirm: &mut dyn Confirm,
        mut on_progress: F,
    ) -> GenerationReport
    where
        F: FnMut(&ComponentSpec, Option<&GeneratedArtifact>),
    {
        let mut policy = OverwritePolicy::new(options.force, confirm);
        let mut report = GenerationReport::default();

        for component in self.manifest.components() {
            if options.skips(component) {
                tracing::debug!(component = component.key, "component disabled");
                on_progress(component, None);
                continue;
            }

            let artifact = self.generate_component(component, naming, options.api, &mut policy);
            on_progress(component, Some(&artifact));
            report.push(artifact);
        }

        report
    }

    fn generate_component(
        &self,
        component: &ComponentSpec,
        naming: &NamingTable,
        api: bool,
        policy: &mut OverwritePolicy<'_>,
    ) -> GeneratedArtifact {
        let dir = component.resolve_dir(naming);
        let class_name = component.resolve_class_name(naming);
        let path = dir.join(format!("{class_name}.{}", self.extension));

        let (path, outcome) = match self.try_generate(component, naming, api, policy, &dir, &class_name, &path) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(component = component.key, path = %path.display(), error = %e, "artifact failed");
                (path, Outcome::Failed(e.to_string()))
            }
        };

        tracing::info!(component = component.key, path = %path.display(), %outcome, "artifact processed");

        GeneratedArtifact {
            key: component.key.to_string(),
            kind: Some(component.kind),
            path,
            class_name,
            outcome,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_generate(
        &self,
        component: &ComponentSpec,
        naming: &NamingTable,
        api: bool,
        policy: &mut OverwritePolicy<'_>,
        dir: &Path,
        class_name: &str,
        path: &Path,
    ) -> Result<(PathBuf, Outcome)> {
        let stub = self
            .stubs
            .resolve(self.fs, &self.published_dir, component.template_for(api))?;
        let contents = instantiate(&stub.body, naming);

        let replacing = match component.conflict_pattern(naming) {
            None => {
                let existing = self.fs.file_exists(&self.absolute(path));
                if existing && !policy.should_overwrite(class_name)? {
                    return Ok((path.to_path_buf(), Outcome::SkippedExisting));
                }
                existing
            }
            Some(pattern) => {
                let abs_dir = self.absolute(dir);
                let matches = self.fs.glob(&abs_dir, &pattern).map_err(|e| {
                    ModforgeError::filesystem(format!("searching {} for {pattern}", abs_dir.display()), e)
                })?;
                tracing::debug!(pattern = %pattern, matches = matches.len(), "earlier migrations");

                match matches.first() {
                    None => false,
                    Some(first) => {
                        let existing_name = first
                            .file_name()
                            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
                        let description = format!(
                            "migration {existing_name} for the {} table",
                            naming.module_name_plural_lower
                        );
                        if !policy.should_overwrite(&description)? {
                            return Ok((dir.join(existing_name), Outcome::SkippedExisting));
                        }
                        for old in &matches {
                            self.fs.remove_file(old).map_err(|e| {
                                ModforgeError::filesystem(format!("deleting {}", old.display()), e)
                            })?;
                        }
                        true
                    }
                }
            }
        };

        write_file(self.fs, &self.absolute(path), &contents)?;

        let outcome = if replacing { Outcome::Replaced } else { Outcome::Created };
        Ok((path.to_path_buf(), outcome))
    }

    fn absolute(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }
}

/// Create the parent directory of `path` and write `contents`
pub(crate) fn write_file(fs: &dyn Filesystem, path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)
            .map_err(|e| ModforgeError::filesystem(format!("creating {}", parent.display()), e))?;
    }
    fs.write(path, contents)
        .map_err(|e| ModforgeError::filesystem(format!("writing {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFilesystem;
    use crate::testing::{MemoryFs, ScriptedConfirm};
    use chrono::NaiveDate;
    use std::io;

    fn naming(raw: &str) -> NamingTable {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        NamingTable::derive_at(raw, at).unwrap()
    }

    fn generator(fs: &MemoryFs) -> Generator<'_> {
        Generator::new(fs, &ModforgeConfig::default(), PathBuf::new())
    }

    #[test]
    fn test_fresh_run_creates_everything() {
        let fs = MemoryFs::new();
        let mut confirm = ScriptedConfirm::new([]);

        let report = generator(&fs).generate(&naming("Order"), &GenerateOptions::default(), &mut confirm);

        assert!(report.is_success());
        assert_eq!(report.artifacts().len(), 13);
        assert_eq!(report.count(&Outcome::Created), 13);
        assert!(confirm.prompts().is_empty());
        assert_eq!(
            report.get("migration").unwrap().path,
            PathBuf::from("database/migrations/2026_10_18_090503_create_orders_table.php")
        );
        let controller = fs.contents("app/Http/Controllers/OrderController.php").unwrap();
        assert!(controller.contains("class OrderController extends Controller"));
    }

    #[test]
    fn test_skip_flag_reports_progress_without_artifact() {
        let fs = MemoryFs::new();
        let mut confirm = ScriptedConfirm::new([]);
        let options = GenerateOptions {
            skip: BTreeSet::from([SkipFlag::NoMigration]),
            ..GenerateOptions::default()
        };
        let mut ticks = Vec::new();

        let report = generator(&fs).generate_with(&naming("Order"), &options, &mut confirm, |c, a| {
            ticks.push((c.key, a.is_some()));
        });

        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks.last(), Some(&("migration", false)));
        assert_eq!(report.artifacts().len(), 12);
        assert!(report.get("migration").is_none());
    }

    #[test]
    fn test_api_mode_uses_api_controller() {
        let fs = MemoryFs::new();
        let options = GenerateOptions {
            api: true,
            ..GenerateOptions::default()
        };

        generator(&fs).generate(&naming("Order"), &options, &mut ScriptedConfirm::new([]));

        let controller = fs.contents("app/Http/Controllers/OrderController.php").unwrap();
        assert!(controller.contains("OrderResource::collection"));
    }

    #[test]
    fn test_missing_template_fails_before_prompting() {
        let fs = MemoryFs::new();
        fs.add_file("app/Models/Order.php", "original");
        let stubs = StubCatalog::empty().with_stub("controller", "class {{ moduleName }}Controller");
        let mut confirm = ScriptedConfirm::new([]);

        let report = generator(&fs)
            .with_stubs(stubs)
            .generate(&naming("Order"), &GenerateOptions::default(), &mut confirm);

        assert!(!report.is_success());
        assert_eq!(report.get("controller").unwrap().outcome, Outcome::Created);
        assert!(report.get("model").unwrap().outcome.is_failure());
        assert!(confirm.prompts().is_empty());
        assert_eq!(fs.contents("app/Models/Order.php").as_deref(), Some("original"));
    }

    #[test]
    fn test_create_dir_failure_is_artifact_local() {
        let mut fs = MockFilesystem::new();
        fs.expect_file_exists().return_const(false);
        fs.expect_glob().returning(|_, _| Ok(Vec::new()));
        fs.expect_create_dir_all().returning(|path| {
            if path.starts_with("app/Services") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
            } else {
                Ok(())
            }
        });
        fs.expect_write().returning(|_, _| Ok(()));

        let generator = Generator::new(&fs, &ModforgeConfig::default(), PathBuf::new());
        let report = generator.generate(&naming("Order"), &GenerateOptions::default(), &mut ScriptedConfirm::new([]));

        let service = report.get("service").unwrap();
        assert_eq!(
            service.outcome,
            Outcome::Failed("creating app/Services: read-only".to_string())
        );
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.count(&Outcome::Created), 12);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::SkippedExisting.to_string(), "skipped");
        assert_eq!(Outcome::Failed("boom".into()).to_string(), "failed: boom");
    }
}
