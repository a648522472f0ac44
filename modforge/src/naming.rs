//! Naming derivation
//!
//! Turns one raw module identifier such as `Billing/Invoice` into the fixed
//! table of naming variants every template and path is resolved from.
//!
//! # Example
//!
//! ```
//! use modforge::naming::NamingTable;
//!
//! let naming = NamingTable::derive("Billing/Invoice")?;
//! assert_eq!(naming.module_name, "Invoice");
//! assert_eq!(naming.module_name_plural_lower, "invoices");
//! assert_eq!(naming.module_namespace, "Billing");
//! assert_eq!(naming.module_namespace_dir, "/Billing");
//! # Ok::<(), modforge::ModforgeError>(())
//! ```

use chrono::{Local, NaiveDateTime};
use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ModforgeError, Result};

/// Separator used in generated namespace declarations
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Format of the generation timestamp (`YYYY_MM_DD_HHMMSS`)
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Naming variants derived once per generation run
///
/// Every field except `timestamp` is a pure function of the raw module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTable {
    /// Singular `PascalCase` form of the trailing segment (e.g. `Order`)
    pub module_name: String,
    /// Singular camelCase form (e.g. `order`)
    pub module_name_lower: String,
    /// Plural `PascalCase` form (e.g. `Orders`)
    pub module_name_plural: String,
    /// Plural `snake_case` form, used for table and migration names (e.g. `orders`)
    pub module_name_plural_lower: String,
    /// Leading segments joined with [`NAMESPACE_SEPARATOR`], empty without a namespace
    pub module_namespace: String,
    /// `\` + namespace, empty without a namespace
    pub module_namespace_segment: String,
    /// `/` + namespace as a path fragment, empty without a namespace
    pub module_namespace_dir: String,
    /// Generation time formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

impl NamingTable {
    /// Derive the naming table for `raw_name`, stamped with the current local time
    ///
    /// # Errors
    ///
    /// Returns [`ModforgeError::InvalidModuleName`] if the name is empty or a
    /// segment is not an identifier (`^[A-Za-z][A-Za-z0-9_]*$`).
    pub fn derive(raw_name: &str) -> Result<Self> {
        Self::derive_at(raw_name, Local::now().naive_local())
    }

    /// Derive the naming table with an explicit generation time
    ///
    /// # Errors
    ///
    /// Same as [`NamingTable::derive`].
    pub fn derive_at(raw_name: &str, generated_at: NaiveDateTime) -> Result<Self> {
        if raw_name.is_empty() {
            return Err(ModforgeError::invalid_name(
                raw_name,
                "module name cannot be empty",
            ));
        }

        let mut segments: Vec<&str> = raw_name.split('/').collect();
        let local = segments.pop().unwrap_or_default();

        if !IDENTIFIER.is_match(local) {
            return Err(ModforgeError::invalid_name(
                raw_name,
                "module name must start with a letter and contain only letters, digits and underscores",
            ));
        }
        if let Some(bad) = segments.iter().find(|s| !IDENTIFIER.is_match(s)) {
            return Err(ModforgeError::invalid_name(
                raw_name,
                format!("namespace segment '{bad}' is not a valid identifier"),
            ));
        }

        let word = local.to_snake_case();
        let singular = singularize(&word);
        let plural = pluralize(&word);

        let module_namespace = segments.join(NAMESPACE_SEPARATOR);
        let (module_namespace_segment, module_namespace_dir) = if segments.is_empty() {
            (String::new(), String::new())
        } else {
            (
                format!("{NAMESPACE_SEPARATOR}{module_namespace}"),
                format!("/{}", segments.join("/")),
            )
        };

        tracing::debug!(raw_name, module = %singular, table = %plural, "derived naming table");

        Ok(Self {
            module_name: singular.to_pascal_case(),
            module_name_lower: singular.to_camel_case(),
            module_name_plural: plural.to_pascal_case(),
            module_name_plural_lower: plural,
            module_namespace,
            module_namespace_segment,
            module_namespace_dir,
            timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Placeholder keys paired with their values, in declaration order
    ///
    /// The keys are the names templates refer to as `{{ key }}`.
    #[must_use]
    pub fn placeholders(&self) -> [(&'static str, &str); 8] {
        [
            ("moduleName", &self.module_name),
            ("moduleNameLower", &self.module_name_lower),
            ("moduleNamePlural", &self.module_name_plural),
            ("moduleNamePluralLower", &self.module_name_plural_lower),
            ("moduleNamespace", &self.module_namespace),
            ("moduleNamespaceSegment", &self.module_namespace_segment),
            ("moduleNamespaceDir", &self.module_namespace_dir),
            ("timestamp", &self.timestamp),
        ]
    }

    /// Route segment for the module (kebab-case plural, e.g. `order-items`)
    #[must_use]
    pub fn route_name(&self) -> String {
        self.module_name_plural.to_kebab_case()
    }
}

/// Words the inflection rules get wrong, as `(singular, plural)`
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("calf", "calves"),
    ("thief", "thieves"),
    ("campus", "campuses"),
    ("bonus", "bonuses"),
    ("census", "censuses"),
    ("nexus", "nexuses"),
    ("cactus", "cacti"),
    ("focus", "foci"),
    ("nucleus", "nuclei"),
    ("radius", "radii"),
    ("stimulus", "stimuli"),
];

/// Words with no distinct plural
const UNCOUNTABLE: &[&str] = &[
    "data",
    "media",
    "metadata",
    "feedback",
    "information",
    "equipment",
    "news",
    "series",
    "species",
    "sheep",
    "fish",
    "software",
];

/// Singularize a `snake_case` word; singular input is returned unchanged
///
/// Only the last `_` segment is inflected (`sales_people` → `sales_person`).
/// A word is treated as plural only when pluralizing the candidate singular
/// gives the word back, so `singularize(singularize(w)) == singularize(w)`.
#[must_use]
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_segment(word);
    format!("{head}{}", singular_segment(last))
}

/// Pluralize a `snake_case` word; plural input is returned unchanged
///
/// The word is singularized first so that an already plural input is not
/// pluralized a second time. The result always singularizes back, so
/// `pluralize(singularize(pluralize(w))) == pluralize(w)`. A singular with
/// no plural that round-trips is treated as uncountable.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let (head, last) = split_last_segment(word);
    format!("{head}{}", plural_segment(last))
}

fn split_last_segment(word: &str) -> (&str, &str) {
    word.rfind('_').map_or(("", word), |at| word.split_at(at + 1))
}

fn known_singular(word: &str) -> Option<&str> {
    if UNCOUNTABLE.contains(&word) {
        return Some(word);
    }
    IRREGULAR
        .iter()
        .find(|(singular, plural)| *singular == word || *plural == word)
        .map(|(singular, _)| *singular)
}

fn known_plural(singular: &str) -> Option<&str> {
    if UNCOUNTABLE.contains(&singular) {
        return Some(singular);
    }
    IRREGULAR
        .iter()
        .find(|(known, _)| *known == singular)
        .map(|(_, plural)| *plural)
}

fn singular_segment(word: &str) -> String {
    if let Some(known) = known_singular(word) {
        return known.to_owned();
    }

    let inflected = word.to_singular();
    if inflected == word {
        return word.to_owned();
    }

    let stripped = [word.strip_suffix("es"), word.strip_suffix('s')];
    let singular = std::iter::once(inflected.as_str())
        .chain(stripped.into_iter().flatten())
        .find(|candidate| is_singular_of(candidate, word))
        .unwrap_or(word)
        .to_owned();
    singular
}

/// `candidate` is a stable singular that pluralizes to `plural`
fn is_singular_of(candidate: &str, plural: &str) -> bool {
    !candidate.is_empty()
        && candidate.to_singular() == candidate
        && candidate.to_plural() == plural
        && known_singular(candidate).is_none_or(|known| known == candidate)
}

fn plural_segment(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let singular = singular_segment(word);
    if let Some(known) = known_plural(&singular) {
        return known.to_owned();
    }

    let candidates = [
        singular.to_plural(),
        format!("{singular}s"),
        format!("{singular}es"),
    ];
    candidates
        .into_iter()
        .find(|candidate| singular_segment(candidate) == singular)
        .unwrap_or(singular)
}
