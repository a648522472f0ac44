//! Integration tests against the real filesystem

use std::fs;

use modforge::fs::LocalFs;
use modforge::policy::DeclineAll;
use modforge::publish::publish;
use modforge::stubs::StubCatalog;
use modforge::testing::ScriptedConfirm;
use modforge::{GenerateOptions, Generator, ModforgeConfig, NamingTable, Outcome, SkipFlag};
use tempfile::TempDir;

/// Generating into an empty project creates the full tree
#[test]
fn test_generate_into_empty_project() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = ModforgeConfig::load_for_project(root).unwrap();

    let generator = Generator::new(&LocalFs, &config, root);
    let report = generator.generate(
        &NamingTable::derive("OrderItem").unwrap(),
        &GenerateOptions::default(),
        &mut DeclineAll,
    );

    assert!(report.is_success());
    assert_eq!(report.count(&Outcome::Created), 13);
    for artifact in report.artifacts() {
        let path = root.join(&artifact.path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    let controller =
        fs::read_to_string(root.join("app/Http/Controllers/OrderItemController.php")).unwrap();
    assert!(controller.contains("class OrderItemController"));

    let migrations: Vec<_> = fs::read_dir(root.join("database/migrations"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(migrations.len(), 1);
    assert!(migrations[0].ends_with("_create_order_items_table.php"));
}

/// Project configuration moves the output tree
#[test]
fn test_project_config_is_honored() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(
        root.join("modforge.toml"),
        "[paths]\napp = \"src\"\nmigrations = \"db/migrate\"\n",
    )
    .unwrap();
    let config = ModforgeConfig::load_for_project(root).unwrap();

    let options = GenerateOptions {
        skip: [SkipFlag::NoMigration].into(),
        ..GenerateOptions::default()
    };
    let report = Generator::new(&LocalFs, &config, root).generate(
        &NamingTable::derive("Product").unwrap(),
        &options,
        &mut DeclineAll,
    );

    assert!(report.is_success());
    assert!(root.join("src/Models/Product.php").is_file());
    assert!(!root.join("db/migrate").exists());
    assert!(!root.join("app").exists());
}

/// Published stubs on disk are picked up by later runs
#[test]
fn test_publish_then_customize() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = ModforgeConfig::default();

    let published = publish(
        &LocalFs,
        &config,
        root,
        &StubCatalog::bundled(),
        false,
        &mut ScriptedConfirm::new([]),
    )
    .unwrap();
    assert!(published.is_success());
    assert!(root.join("modforge.toml").is_file());

    fs::write(
        root.join("stubs/modforge/dto.stub"),
        "<?php\n\nfinal class {{ moduleName }}Dto {}\n",
    )
    .unwrap();

    let report = Generator::new(&LocalFs, &config, root).generate(
        &NamingTable::derive("Customer").unwrap(),
        &GenerateOptions::default(),
        &mut DeclineAll,
    );

    assert!(report.is_success());
    assert_eq!(
        fs::read_to_string(root.join("app/Dtos/CustomerDto.php")).unwrap(),
        "<?php\n\nfinal class CustomerDto {}\n"
    );
}

/// Without force or consent, existing files survive a rerun
#[test]
fn test_rerun_without_consent_keeps_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = ModforgeConfig::default();
    let generator = Generator::new(&LocalFs, &config, root);
    let naming = NamingTable::derive("Payment").unwrap();

    generator.generate(&naming, &GenerateOptions::default(), &mut DeclineAll);
    let model = root.join("app/Models/Payment.php");
    fs::write(&model, "edited").unwrap();

    let report = generator.generate(&naming, &GenerateOptions::default(), &mut DeclineAll);

    assert_eq!(report.count(&Outcome::SkippedExisting), 13);
    assert_eq!(fs::read_to_string(&model).unwrap(), "edited");
}
