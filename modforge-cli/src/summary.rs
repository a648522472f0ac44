//! Run report rendering

use console::style;
use modforge::{GeneratedArtifact, GenerationReport, NamingTable, Outcome};

/// One report line: marker, outcome, path, and the failure cause if any
#[must_use]
pub fn artifact_line(artifact: &GeneratedArtifact) -> String {
    let path = artifact.path.display();
    match &artifact.outcome {
        Outcome::Created => format!("  {} {:<9} {}", style("✓").green(), "created", style(path).dim()),
        Outcome::Replaced => format!("  {} {:<9} {}", style("↻").yellow(), "replaced", style(path).dim()),
        Outcome::SkippedExisting => {
            format!("  {} {:<9} {}", style("-").dim(), "skipped", style(path).dim())
        }
        Outcome::Failed(reason) => format!(
            "  {} {:<9} {} ({})",
            style("✗").red(),
            "failed",
            path,
            style(reason).red()
        ),
    }
}

/// Follow-up instructions after a successful run
#[must_use]
pub fn next_steps(migration_skipped: bool) -> Vec<&'static str> {
    let mut steps = Vec::with_capacity(4);
    if !migration_skipped {
        steps.push("Run: php artisan migrate");
    }
    steps.extend([
        "Add routes to routes/api.php or routes/web.php",
        "Update the DTO and Form Requests with your fields",
        "Customize the generated actions as needed",
    ]);
    steps
}

/// Example resource route for the module
#[must_use]
pub fn route_example(naming: &NamingTable) -> String {
    format!(
        "Route::apiResource('{}', {}Controller::class);",
        naming.route_name(),
        naming.module_name
    )
}

/// Print the per-artifact lines of `report`
pub fn print_artifacts(report: &GenerationReport) {
    for artifact in report.artifacts() {
        println!("{}", artifact_line(artifact));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modforge::ArtifactKind;
    use std::path::PathBuf;

    fn artifact(outcome: Outcome) -> GeneratedArtifact {
        GeneratedArtifact {
            key: "model".to_string(),
            kind: Some(ArtifactKind::Model),
            path: PathBuf::from("app/Models/Order.php"),
            class_name: "Order".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_route_example() {
        let naming = NamingTable::derive("OrderItem").unwrap();
        assert_eq!(
            route_example(&naming),
            "Route::apiResource('order-items', OrderItemController::class);"
        );
    }

    #[test]
    fn test_next_steps_mention_migrate_unless_skipped() {
        assert!(next_steps(false).iter().any(|s| s.contains("php artisan migrate")));
        assert!(!next_steps(true).iter().any(|s| s.contains("php artisan migrate")));
    }

    #[test]
    fn test_artifact_line_shows_outcome_and_path() {
        let line = console::strip_ansi_codes(&artifact_line(&artifact(Outcome::Created))).into_owned();
        assert!(line.contains("created"));
        assert!(line.ends_with("app/Models/Order.php"));

        let failed = artifact_line(&artifact(Outcome::Failed("denied".to_string())));
        let failed = console::strip_ansi_codes(&failed);
        assert!(failed.contains("failed"));
        assert!(failed.ends_with("(denied)"));
    }
}
