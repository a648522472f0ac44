//! Configuration management for modforge
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MODFORGE_` prefix, `__` for nesting)
//! 2. `./modforge.toml` in the project root, or an explicit file
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # modforge.toml
//! [paths]
//! app = "app"
//! controllers = "Http/Controllers"
//! migrations = "database/migrations"
//!
//! [stubs]
//! published_dir = "stubs/modforge"
//!
//! [output]
//! extension = "php"
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the project-level configuration file
pub const CONFIG_FILE_NAME: &str = "modforge.toml";

/// Output directories, one per artifact kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Application root, relative to the project root
    pub app: String,

    /// Controllers, relative to `app`
    pub controllers: String,

    /// Response resources, relative to `app`
    pub resources: String,

    /// Services, relative to `app`
    pub services: String,

    /// Data-transfer objects, relative to `app`
    pub dtos: String,

    /// Action handlers, relative to `app`
    pub actions: String,

    /// Validation requests, relative to `app`
    pub requests: String,

    /// Persistence models, relative to `app`
    pub models: String,

    /// Schema migrations, relative to the project root
    pub migrations: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            app: "app".to_string(),
            controllers: "Http/Controllers".to_string(),
            resources: "Http/Resources".to_string(),
            services: "Services".to_string(),
            dtos: "Dtos".to_string(),
            actions: "Actions".to_string(),
            requests: "Http/Requests".to_string(),
            models: "Models".to_string(),
            migrations: "database/migrations".to_string(),
        }
    }
}

/// Template override settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubSettings {
    /// Where user-customized stubs are published, relative to the project root
    pub published_dir: String,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self {
            published_dir: "stubs/modforge".to_string(),
        }
    }
}

/// Generated file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Extension of every generated file, without the dot
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            extension: "php".to_string(),
        }
    }
}

/// Complete modforge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModforgeConfig {
    /// Output directories
    #[serde(default)]
    pub paths: PathSettings,

    /// Template override settings
    #[serde(default)]
    pub stubs: StubSettings,

    /// Generated file settings
    #[serde(default)]
    pub output: OutputSettings,
}

impl ModforgeConfig {
    /// Load configuration for the project at `project_root`
    ///
    /// Reads `{project_root}/modforge.toml` when present, then applies
    /// `MODFORGE_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The configuration file contains invalid TOML or mistyped values
    pub fn load_for_project(project_root: &Path) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let local_config = project_root.join(CONFIG_FILE_NAME);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        let config = figment.merge(Self::env()).extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Same as [`ModforgeConfig::load_for_project`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Self::env())
            .extract()?;
        Ok(config)
    }

    /// Render this configuration as a `modforge.toml` document
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Directory holding published stub overrides
    #[must_use]
    pub fn published_stubs_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.stubs.published_dir)
    }

    fn defaults() -> Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn env() -> Env {
        Env::prefixed("MODFORGE_").split("__").lowercase(true)
    }
}
