//! Template instantiation
//!
//! Placeholders have the exact form `{{ key }}`: double braces, one space on
//! each side, and a key from [`NamingTable::placeholders`]. Substitution is a
//! literal string replacement. Anything else shaped like `{{ ... }}` is left
//! untouched.

use crate::naming::NamingTable;

/// Substitute every known `{{ key }}` placeholder in `template` with its naming-table value
#[must_use]
pub fn instantiate(template: &str, naming: &NamingTable) -> String {
    naming
        .placeholders()
        .iter()
        .fold(template.to_string(), |content, (key, value)| {
            content.replace(&format!("{{{{ {key} }}}}"), value)
        })
}
