//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use tally_core::import::load_semantics;
use tally_core::{
    EnergyDistribution, EnergyType, OutputFormat, SemanticFlags, SemanticsEdit, TallyConfig,
    ValidationStatus,
};
use tempfile::TempDir;

use crate::commands::{self, short_weights, truncate};

const CATEGORIES: &str = "id,name,kind
salary,Salário,income
rent,Aluguel,expense
market,Supermercado,expense
mystery,xyz123 categoria inventada,expense
";

const TRANSACTIONS: &str = "id,date,category_id,kind,amount
t1,2026-05-01,salary,income,4000
t2,2026-05-02,rent,expense,-1200
t3,2026-05-04,market,expense,-500
t4,2026-06-01,mystery,expense,-90
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Batch-classify the sample categories into a semantics file
fn setup_semantics(dir: &TempDir) -> PathBuf {
    let categories = write_file(dir, "categories.csv", CATEGORIES);
    let semantics = dir.path().join("semantics.json");
    commands::cmd_batch(&categories, Some(&semantics), false).unwrap();
    semantics
}

fn status_of(path: &Path, id: &str) -> ValidationStatus {
    load_semantics(path).unwrap()[id].validation_status
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer category name", 10), "a longe...");
    // Multi-byte names are cut on character boundaries
    assert_eq!(truncate("manutenção veículo", 8), "manut...");
}

#[test]
fn test_short_weights() {
    assert_eq!(short_weights(&EnergyDistribution::new(0.7, 0.3, 0.0, 0.0)), "S70 C30");
    assert_eq!(short_weights(&EnergyDistribution::pure(EnergyType::Loss)), "L100");
    assert_eq!(short_weights(&EnergyDistribution::UNCLASSIFIED), "-");
}

#[test]
fn test_use_json() {
    let table = TallyConfig::default();
    assert!(!commands::use_json(false, &table));
    assert!(commands::use_json(true, &table));

    let json = TallyConfig {
        output: OutputFormat::Json,
        ..TallyConfig::default()
    };
    assert!(commands::use_json(false, &json));
}

// ========== Classify Command Tests ==========

#[test]
fn test_cmd_classify() {
    assert!(commands::cmd_classify("Conta de luz", "expense", false).is_ok());
    assert!(commands::cmd_classify("Salário", "income", true).is_ok());
    assert!(commands::cmd_classify("", "expense", false).is_ok());
}

#[test]
fn test_cmd_classify_bad_kind() {
    let err = commands::cmd_classify("Aluguel", "transfer", false).unwrap_err();
    assert!(err.to_string().contains("transfer"));
}

#[test]
fn test_cmd_templates() {
    assert!(commands::cmd_templates(None, false).is_ok());
    assert!(commands::cmd_templates(None, true).is_ok());
}

#[test]
fn test_cmd_templates_by_name() {
    assert!(commands::cmd_templates(Some("ENERGIA_ELETRICA"), false).is_ok());
    assert!(commands::cmd_templates(Some("ENERGIA_ELETRICA"), true).is_ok());

    let err = commands::cmd_templates(Some("DOES_NOT_EXIST"), false).unwrap_err();
    assert!(err.to_string().contains("DOES_NOT_EXIST"));
}

// ========== Batch Command Tests ==========

#[test]
fn test_cmd_batch_writes_semantics() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);

    let loaded = load_semantics(&semantics).unwrap();
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded["rent"].validation_status, ValidationStatus::Inferred);
    assert_eq!(loaded["salary"].validation_status, ValidationStatus::Validated);
    assert_eq!(loaded["mystery"].validation_status, ValidationStatus::NotValidated);
    assert_eq!(
        loaded["mystery"].distribution,
        EnergyDistribution::new(0.5, 0.5, 0.0, 0.0)
    );
}

#[test]
fn test_cmd_batch_keeps_existing_entries() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    commands::cmd_confirm(&semantics, "rent", "ana", None).unwrap();

    // Re-running the batch must not reset the confirmed category
    let categories = dir.path().join("categories.csv");
    commands::cmd_batch(&categories, Some(&semantics), true).unwrap();

    assert_eq!(status_of(&semantics, "rent"), ValidationStatus::Validated);
}

#[test]
fn test_cmd_batch_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = commands::cmd_batch(&dir.path().join("nope.csv"), None, false);
    assert!(result.is_err());
}

// ========== Validate Command Tests ==========

#[test]
fn test_cmd_validate() {
    let valid = EnergyDistribution::new(0.6, 0.0, 0.4, 0.0);
    assert!(commands::cmd_validate(valid, SemanticFlags::new(true, true, true), false).is_ok());

    let invalid = EnergyDistribution::new(0.0, 0.0, 0.5, 0.5);
    let err = commands::cmd_validate(invalid, SemanticFlags::NONE, true).unwrap_err();
    assert!(err.to_string().contains("failed validation"));
}

#[test]
fn test_cmd_validate_warning_only_passes() {
    let choice = EnergyDistribution::pure(EnergyType::Choice);
    assert!(commands::cmd_validate(choice, SemanticFlags::new(true, false, false), false).is_ok());
}

// ========== Semantics Command Tests ==========

#[test]
fn test_cmd_review() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    assert!(commands::cmd_review(&semantics, false).is_ok());
    assert!(commands::cmd_review(&semantics, true).is_ok());
}

#[test]
fn test_cmd_review_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(commands::cmd_review(&dir.path().join("missing.json"), false).is_err());
}

#[test]
fn test_cmd_confirm() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);

    commands::cmd_confirm(&semantics, "market", "ana", Some("weekly groceries".into())).unwrap();

    let loaded = load_semantics(&semantics).unwrap();
    let market = &loaded["market"];
    assert_eq!(market.validation_status, ValidationStatus::Validated);
    assert_eq!(market.validated_by.as_deref(), Some("ana"));
    assert_eq!(market.history.len(), 1);
    assert_eq!(market.history[0].reason.as_deref(), Some("weekly groceries"));
}

#[test]
fn test_cmd_confirm_unknown_id() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    let err = commands::cmd_confirm(&semantics, "ghost", "ana", None).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_cmd_edit() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);

    let edit = SemanticsEdit {
        distribution: EnergyDistribution::new(0.0, 0.6, 0.4, 0.0),
        flags: SemanticFlags::new(false, false, true),
        justification: Some("Language lessons".to_string()),
    };
    commands::cmd_edit(&semantics, "mystery", "bruno", edit, None).unwrap();

    let loaded = load_semantics(&semantics).unwrap();
    let mystery = &loaded["mystery"];
    assert_eq!(mystery.validation_status, ValidationStatus::Validated);
    assert_eq!(mystery.distribution.future, 0.4);
    assert_eq!(mystery.justification.as_deref(), Some("Language lessons"));
}

#[test]
fn test_cmd_edit_rejected_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    let before = fs::read_to_string(&semantics).unwrap();

    let edit = SemanticsEdit {
        distribution: EnergyDistribution::pure(EnergyType::Choice),
        flags: SemanticFlags::new(false, true, false),
        justification: None,
    };
    let result = commands::cmd_edit(&semantics, "rent", "bruno", edit, None);
    assert!(result.is_err());

    assert_eq!(fs::read_to_string(&semantics).unwrap(), before);
    assert_eq!(status_of(&semantics, "rent"), ValidationStatus::Inferred);
}

// ========== Ledger Command Tests ==========

#[test]
fn test_cmd_ledger() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    let transactions = write_file(&dir, "tx.csv", TRANSACTIONS);
    let thresholds = TallyConfig::default().coverage;

    assert!(commands::cmd_ledger(&semantics, &transactions, false, false, &thresholds).is_ok());
    assert!(commands::cmd_ledger(&semantics, &transactions, true, false, &thresholds).is_ok());
    assert!(commands::cmd_ledger(&semantics, &transactions, true, true, &thresholds).is_ok());
}

#[test]
fn test_cmd_ledger_bad_transactions() {
    let dir = TempDir::new().unwrap();
    let semantics = setup_semantics(&dir);
    let transactions = write_file(&dir, "tx.csv", "id,date,kind,amount\nt1,soon,expense,1\n");
    let thresholds = TallyConfig::default().coverage;

    let err = commands::cmd_ledger(&semantics, &transactions, false, false, &thresholds)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Unable to parse date"));
}
