//! Component manifest
//!
//! The fixed, ordered list of artifacts one generation run produces. Each
//! entry is an immutable [`ComponentSpec`]; path and class-name templates use
//! single-brace placeholders (`{moduleName}`, `{moduleNamespaceDir}`,
//! `{moduleNamePluralLower}`, `{timestamp}`) resolved against a
//! [`NamingTable`].

use std::path::PathBuf;

use crate::config::PathSettings;
use crate::naming::NamingTable;

/// Artifact kind
///
/// Matching on this enum is exhaustive, so adding a kind forces every
/// consumer to decide how to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// HTTP controller
    Controller,
    /// Response resource
    Resource,
    /// Business logic service
    Service,
    /// Data-transfer object
    Dto,
    /// Single-purpose action handler
    Action,
    /// Validation request object
    Request,
    /// Persistence model
    Model,
    /// Schema migration
    Migration,
}

/// How an artifact's file name behaves across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRegime {
    /// The path is identical on every run; conflicts are found by exact path
    Stable,
    /// The file name embeds the generation timestamp; conflicts are found by pattern
    Timestamped,
}

impl ArtifactKind {
    /// Conflict-detection regime for this kind
    #[must_use]
    pub const fn regime(self) -> NamingRegime {
        match self {
            Self::Controller
            | Self::Resource
            | Self::Service
            | Self::Dto
            | Self::Action
            | Self::Request
            | Self::Model => NamingRegime::Stable,
            Self::Migration => NamingRegime::Timestamped,
        }
    }

    /// Lowercase label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Resource => "resource",
            Self::Service => "service",
            Self::Dto => "dto",
            Self::Action => "action",
            Self::Request => "request",
            Self::Model => "model",
            Self::Migration => "migration",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Option that disables a manifest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipFlag {
    /// `--no-migration`
    NoMigration,
}

/// One manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Stable key, e.g. `store-action`
    pub key: &'static str,
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Output directory relative to the project root, with placeholders
    pub path_template: String,
    /// File stem, with placeholders
    pub class_template: &'static str,
    /// Template id used in the default mode
    pub template_id: &'static str,
    /// Template id used in API mode, when it differs
    pub api_template_id: Option<&'static str>,
    /// Human-readable description
    pub description: &'static str,
    /// Option that disables this entry
    pub skip_flag: Option<SkipFlag>,
}

impl ComponentSpec {
    /// Template id for the selected mode
    #[must_use]
    pub fn template_for(&self, api: bool) -> &'static str {
        match self.api_template_id {
            Some(id) if api => id,
            _ => self.template_id,
        }
    }

    /// Output directory with `{moduleName}` and `{moduleNamespaceDir}` substituted
    #[must_use]
    pub fn resolve_dir(&self, naming: &NamingTable) -> PathBuf {
        PathBuf::from(
            self.path_template
                .replace("{moduleName}", &naming.module_name)
                .replace("{moduleNamespaceDir}", &naming.module_namespace_dir),
        )
    }

    /// Class name with `{moduleName}`, `{moduleNamePluralLower}` and `{timestamp}` substituted
    #[must_use]
    pub fn resolve_class_name(&self, naming: &NamingTable) -> String {
        self.class_template
            .replace("{moduleName}", &naming.module_name)
            .replace("{moduleNamePluralLower}", &naming.module_name_plural_lower)
            .replace("{timestamp}", &naming.timestamp)
    }

    /// Glob pattern matching any earlier migration for the same table
    ///
    /// Returns `None` for stable-named artifacts.
    #[must_use]
    pub fn conflict_pattern(&self, naming: &NamingTable) -> Option<String> {
        match self.kind.regime() {
            NamingRegime::Stable => None,
            NamingRegime::Timestamped => Some(format!(
                "*_create_{}_table.*",
                naming.module_name_plural_lower
            )),
        }
    }
}

/// Ordered list of components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    components: Vec<ComponentSpec>,
}

impl Manifest {
    /// The standard CRUD module layout
    ///
    /// Order: controller, resource, service, dto, the four actions, the three
    /// requests, model, migration.
    #[must_use]
    pub fn standard(paths: &PathSettings) -> Self {
        let under_app = |dir: &str, suffix: &str| {
            format!("{}/{}{{moduleNamespaceDir}}{suffix}", paths.app, dir)
        };
        let actions = under_app(&paths.actions, "/{moduleName}");
        let requests = under_app(&paths.requests, "/{moduleName}");

        let entry = |key: &'static str,
                     kind: ArtifactKind,
                     path_template: String,
                     class_template: &'static str,
                     description: &'static str| ComponentSpec {
            key,
            kind,
            path_template,
            class_template,
            template_id: key,
            api_template_id: None,
            description,
            skip_flag: None,
        };

        let components = vec![
            ComponentSpec {
                api_template_id: Some("api-controller"),
                ..entry(
                    "controller",
                    ArtifactKind::Controller,
                    under_app(&paths.controllers, ""),
                    "{moduleName}Controller",
                    "API Controller",
                )
            },
            entry(
                "resource",
                ArtifactKind::Resource,
                under_app(&paths.resources, ""),
                "{moduleName}Resource",
                "API Resource",
            ),
            entry(
                "service",
                ArtifactKind::Service,
                under_app(&paths.services, ""),
                "{moduleName}Service",
                "Business Logic Service",
            ),
            entry(
                "dto",
                ArtifactKind::Dto,
                under_app(&paths.dtos, ""),
                "{moduleName}Dto",
                "Data Transfer Object",
            ),
            entry("index-action", ArtifactKind::Action, actions.clone(), "IndexAction", "List Action"),
            entry("store-action", ArtifactKind::Action, actions.clone(), "StoreAction", "Create Action"),
            entry("update-action", ArtifactKind::Action, actions.clone(), "UpdateAction", "Update Action"),
            entry("delete-action", ArtifactKind::Action, actions, "DeleteAction", "Delete Action"),
            entry(
                "store-request",
                ArtifactKind::Request,
                requests.clone(),
                "StoreRequest",
                "Store Form Request",
            ),
            entry(
                "update-request",
                ArtifactKind::Request,
                requests.clone(),
                "UpdateRequest",
                "Update Form Request",
            ),
            entry(
                "index-request",
                ArtifactKind::Request,
                requests,
                "IndexRequest",
                "Index Form Request",
            ),
            entry(
                "model",
                ArtifactKind::Model,
                under_app(&paths.models, ""),
                "{moduleName}",
                "Eloquent Model",
            ),
            ComponentSpec {
                skip_flag: Some(SkipFlag::NoMigration),
                ..entry(
                    "migration",
                    ArtifactKind::Migration,
                    paths.migrations.clone(),
                    "{timestamp}_create_{moduleNamePluralLower}_table",
                    "Database Migration",
                )
            },
        ];

        Self { components }
    }

    /// Components in generation order
    #[must_use]
    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the manifest has no components
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Look up a component by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.key == key)
    }

    /// Every template id any component may use
    pub fn template_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components
            .iter()
            .flat_map(|c| std::iter::once(c.template_id).chain(c.api_template_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naming(raw: &str) -> NamingTable {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        NamingTable::derive_at(raw, at).unwrap()
    }

    fn manifest() -> Manifest {
        Manifest::standard(&PathSettings::default())
    }

    #[test]
    fn test_standard_order() {
        let keys: Vec<_> = manifest().components().iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            [
                "controller",
                "resource",
                "service",
                "dto",
                "index-action",
                "store-action",
                "update-action",
                "delete-action",
                "store-request",
                "update-request",
                "index-request",
                "model",
                "migration",
            ]
        );
    }

    #[test]
    fn test_only_migration_is_timestamped() {
        for component in manifest().components() {
            let expected = if component.key == "migration" {
                NamingRegime::Timestamped
            } else {
                NamingRegime::Stable
            };
            assert_eq!(component.kind.regime(), expected, "{}", component.key);
        }
    }

    #[test]
    fn test_resolves_controller_without_namespace() {
        let manifest = manifest();
        let controller = manifest.get("controller").unwrap();
        let naming = naming("Order");

        assert_eq!(controller.resolve_dir(&naming), PathBuf::from("app/Http/Controllers"));
        assert_eq!(controller.resolve_class_name(&naming), "OrderController");
    }

    #[test]
    fn test_resolves_action_under_namespace_and_module() {
        let manifest = manifest();
        let action = manifest.get("store-action").unwrap();
        let naming = naming("Billing/Invoice");

        assert_eq!(
            action.resolve_dir(&naming),
            PathBuf::from("app/Actions/Billing/Invoice")
        );
        assert_eq!(action.resolve_class_name(&naming), "StoreAction");
    }

    #[test]
    fn test_migration_ignores_namespace() {
        let manifest = manifest();
        let migration = manifest.get("migration").unwrap();
        let naming = naming("Billing/Invoice");

        assert_eq!(migration.resolve_dir(&naming), PathBuf::from("database/migrations"));
        assert_eq!(
            migration.resolve_class_name(&naming),
            "2026_10_18_090503_create_invoices_table"
        );
        assert_eq!(
            migration.conflict_pattern(&naming).as_deref(),
            Some("*_create_invoices_table.*")
        );
        assert_eq!(migration.skip_flag, Some(SkipFlag::NoMigration));
    }

    #[test]
    fn test_stable_components_have_no_conflict_pattern() {
        let naming = naming("Order");
        assert!(manifest().get("model").unwrap().conflict_pattern(&naming).is_none());
    }

    #[test]
    fn test_api_mode_only_changes_controller() {
        for component in manifest().components() {
            if component.key == "controller" {
                assert_eq!(component.template_for(true), "api-controller");
                assert_eq!(component.template_for(false), "controller");
            } else {
                assert_eq!(component.template_for(true), component.template_for(false));
            }
        }
    }

    #[test]
    fn test_paths_follow_configuration() {
        let paths = PathSettings {
            app: "src".to_string(),
            services: "Domain/Services".to_string(),
            migrations: "db/migrate".to_string(),
            ..PathSettings::default()
        };
        let manifest = Manifest::standard(&paths);
        let naming = naming("Order");

        assert_eq!(
            manifest.get("service").unwrap().resolve_dir(&naming),
            PathBuf::from("src/Domain/Services")
        );
        assert_eq!(
            manifest.get("migration").unwrap().resolve_dir(&naming),
            PathBuf::from("db/migrate")
        );
    }

    #[test]
    fn test_template_ids_cover_api_variant() {
        let ids: Vec<_> = manifest().template_ids().collect();
        assert_eq!(ids.len(), 14);
        assert!(ids.contains(&"api-controller"));
        assert!(ids.contains(&"migration"));
    }
}
