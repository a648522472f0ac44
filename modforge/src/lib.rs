//! modforge: CRUD module scaffolding from a single module name
//!
//! One raw name such as `Billing/Invoice` is turned into a [`NamingTable`]
//! (singular and plural forms, case variants, namespace fragments). The
//! [`Generator`] then walks a fixed [`Manifest`] of artifacts (controller,
//! resource, service, DTO, actions, requests, model, migration), resolving
//! each path and class name from the table and writing the instantiated
//! template.
//!
//! # Design Principles
//!
//! 1. **Injected capabilities**: disk access goes through [`fs::Filesystem`],
//!    confirmation through [`policy::Confirm`]
//! 2. **Artifact-local failures**: only an invalid module name aborts a run
//! 3. **Nothing destructive without consent**: existing files are replaced
//!    only with `force` or an affirmative answer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modforge::prelude::*;
//!
//! # fn main() -> modforge::Result<()> {
//! let config = ModforgeConfig::load_for_project(".".as_ref())?;
//! let naming = NamingTable::derive("Billing/Invoice")?;
//!
//! let generator = Generator::new(&LocalFs, &config, ".");
//! let report = generator.generate(&naming, &GenerateOptions::default(), &mut DeclineAll);
//!
//! for artifact in report.artifacts() {
//!     println!("{} {}", artifact.outcome, artifact.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod generator;
pub mod instantiate;
pub mod manifest;
pub mod naming;
pub mod observability;
pub mod policy;
pub mod publish;
pub mod stubs;
pub mod testing;

pub use config::ModforgeConfig;
pub use error::{ModforgeError, Result};
pub use generator::{GenerateOptions, GeneratedArtifact, GenerationReport, Generator, Outcome};
pub use manifest::{ArtifactKind, ComponentSpec, Manifest, SkipFlag};
pub use naming::NamingTable;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use modforge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ModforgeConfig;
    pub use crate::error::{ModforgeError, Result};
    pub use crate::fs::{Filesystem, LocalFs};
    pub use crate::generator::{
        GenerateOptions, GeneratedArtifact, GenerationReport, Generator, Outcome,
    };
    pub use crate::instantiate::instantiate;
    pub use crate::manifest::{ArtifactKind, Manifest, SkipFlag};
    pub use crate::naming::NamingTable;
    pub use crate::policy::{Confirm, DeclineAll, OverwritePolicy};
    pub use crate::publish::publish;
    pub use crate::stubs::StubCatalog;
}
