//! Stub catalog and resolution
//!
//! Every template id has a bundled default compiled into the binary. A project
//! can override any of them by placing `{id}.stub` in its published stubs
//! directory (see [`StubSettings`](crate::config::StubSettings)); the
//! published copy always wins.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ModforgeError, Result};
use crate::fs::Filesystem;

/// File extension of stub files
pub const STUB_EXTENSION: &str = "stub";

const BUNDLED: &[(&str, &str)] = &[
    ("controller", include_str!("../stubs/controller.stub")),
    ("api-controller", include_str!("../stubs/api-controller.stub")),
    ("resource", include_str!("../stubs/resource.stub")),
    ("service", include_str!("../stubs/service.stub")),
    ("dto", include_str!("../stubs/dto.stub")),
    ("index-action", include_str!("../stubs/index-action.stub")),
    ("store-action", include_str!("../stubs/store-action.stub")),
    ("update-action", include_str!("../stubs/update-action.stub")),
    ("delete-action", include_str!("../stubs/delete-action.stub")),
    ("index-request", include_str!("../stubs/index-request.stub")),
    ("store-request", include_str!("../stubs/store-request.stub")),
    ("update-request", include_str!("../stubs/update-request.stub")),
    ("model", include_str!("../stubs/model.stub")),
    ("migration", include_str!("../stubs/migration.stub")),
];

/// Where a resolved template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    /// A user override in the published stubs directory
    Published(PathBuf),
    /// The default shipped with modforge
    Bundled,
}

/// A template body ready for instantiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStub<'a> {
    /// Template id
    pub id: &'a str,
    /// Template body
    pub body: Cow<'a, str>,
    /// Origin of the body
    pub source: StubSource,
}

/// Set of bundled templates keyed by id
#[derive(Debug, Clone, Default)]
pub struct StubCatalog {
    stubs: BTreeMap<String, Cow<'static, str>>,
}

impl StubCatalog {
    /// Catalog holding every template shipped with modforge
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            stubs: BUNDLED
                .iter()
                .map(|(id, body)| ((*id).to_string(), Cow::Borrowed(*body)))
                .collect(),
        }
    }

    /// Catalog with no templates
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a template
    #[must_use]
    pub fn with_stub(mut self, id: impl Into<String>, body: impl Into<Cow<'static, str>>) -> Self {
        self.stubs.insert(id.into(), body.into());
        self
    }

    /// Bundled body for `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.stubs.get(id).map(|body| &**body)
    }

    /// All `(id, body)` pairs, sorted by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stubs.iter().map(|(id, body)| (id.as_str(), &**body))
    }

    /// Number of templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Resolve `id`, preferring `{published_dir}/{id}.stub` over the bundled body
    ///
    /// # Errors
    ///
    /// - [`ModforgeError::Filesystem`] if a published override exists but cannot be read
    /// - [`ModforgeError::TemplateNotFound`] if neither source has the template
    pub fn resolve<'a>(
        &'a self,
        fs: &dyn Filesystem,
        published_dir: &Path,
        id: &'a str,
    ) -> Result<ResolvedStub<'a>> {
        let published = published_path(published_dir, id);

        if fs.file_exists(&published) {
            let body = fs.read_to_string(&published).map_err(|e| {
                ModforgeError::filesystem(format!("reading stub {}", published.display()), e)
            })?;
            tracing::debug!(template = id, path = %published.display(), "using published stub");
            return Ok(ResolvedStub {
                id,
                body: Cow::Owned(body),
                source: StubSource::Published(published),
            });
        }

        match self.get(id) {
            Some(body) => {
                tracing::debug!(template = id, "using bundled stub");
                Ok(ResolvedStub {
                    id,
                    body: Cow::Borrowed(body),
                    source: StubSource::Bundled,
                })
            }
            None => Err(ModforgeError::TemplateNotFound {
                template: id.to_string(),
                searched: vec![published],
            }),
        }
    }
}

/// Location of the published override for `id`
#[must_use]
pub fn published_path(published_dir: &Path, id: &str) -> PathBuf {
    published_dir.join(format!("{id}.{STUB_EXTENSION}"))
}
