//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use clap::Parser;
use finwise_core::db::Database;
use finwise_core::AssistantConfig;
use rust_decimal_macros::dec;

use crate::cli::{BudgetAction, Cli, Commands, ExpensesAction};
use crate::commands::{self, truncate};

fn setup_test_db() -> (Database, i64) {
    let db = Database::in_memory().unwrap();
    db.ensure_user(commands::LOCAL_USER_ID, "Local user", "local@localhost")
        .unwrap();
    (db, commands::LOCAL_USER_ID)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_defaults() {
    let cli = Cli::try_parse_from(["finwise", "init"]).unwrap();
    assert_eq!(cli.db.to_str(), Some("finwise.db"));
    assert_eq!(cli.user, 1);
    assert!(cli.config.is_none());
    assert!(!cli.verbose);
    assert!(!cli.no_encrypt);
    assert!(matches!(cli.command, Commands::Init));
}

#[test]
fn test_parse_ask_joins_words() {
    let cli = Cli::try_parse_from([
        "finwise", "--user", "7", "ask", "am", "I", "on", "track?", "--json",
    ])
    .unwrap();
    assert_eq!(cli.user, 7);
    match cli.command {
        Commands::Ask { message, json } => {
            assert_eq!(message.join(" "), "am I on track?");
            assert!(json);
        }
        _ => panic!("expected ask"),
    }
}

#[test]
fn test_parse_ask_requires_message() {
    assert!(Cli::try_parse_from(["finwise", "ask"]).is_err());
}

#[test]
fn test_parse_expense_add() {
    let cli = Cli::try_parse_from([
        "finwise",
        "expenses",
        "add",
        "-c",
        "Food",
        "-a",
        "12.50",
        "-d",
        "2024-03-05",
    ])
    .unwrap();
    match cli.command {
        Commands::Expenses {
            action:
                Some(ExpensesAction::Add {
                    category,
                    amount,
                    date,
                    description,
                }),
        } => {
            assert_eq!(category, "Food");
            assert_eq!(amount, dec!(12.50));
            assert_eq!(date, Some(day(2024, 3, 5)));
            assert!(description.is_none());
        }
        _ => panic!("expected expenses add"),
    }
}

#[test]
fn test_parse_rejects_bad_amount() {
    assert!(Cli::try_parse_from(["finwise", "budget", "set", "lots"]).is_err());
    let cli = Cli::try_parse_from(["finwise", "budget", "set", "1500"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Budget {
            action: Some(BudgetAction::Set { .. })
        }
    ));
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer description", 10), "a longe...");
    assert_eq!(truncate("café crème brûlée", 8), "café ...");
}

#[test]
fn test_resolve_month() {
    assert_eq!(
        commands::resolve_month(Some(2024), Some(2)).unwrap(),
        day(2024, 2, 1)
    );
    assert!(commands::resolve_month(Some(2024), Some(13)).is_err());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finwise.db");

    let db = commands::open_db(&path, true).unwrap();
    db.ensure_user(1, "Local user", "local@localhost").unwrap();
    drop(db);

    let reopened = commands::open_db(&path, true).unwrap();
    assert_eq!(reopened.list_users().unwrap().len(), 1);
}

#[test]
fn test_cmd_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finwise.db");

    commands::cmd_init(&path, true).unwrap();
    commands::cmd_init(&path, true).unwrap();

    let db = commands::open_db(&path, true).unwrap();
    let users = db.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, commands::LOCAL_USER_ID);
    assert!(!db.is_encrypted().unwrap());
}

#[test]
fn test_load_config_missing_path_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = commands::load_config(Some(&dir.path().join("nope.toml"))).unwrap();
    assert!(config.trend_months > 0);
}

// ========== Users Command Tests ==========

#[test]
fn test_cmd_users() {
    let (db, _) = setup_test_db();
    commands::cmd_users_add(&db, "Grace Hopper", "grace@example.com").unwrap();
    assert!(commands::cmd_users_add(&db, "Grace Again", "GRACE@example.com").is_err());
    commands::cmd_users_list(&db).unwrap();
    assert_eq!(db.list_users().unwrap().len(), 2);
}

// ========== Expenses Command Tests ==========

#[test]
fn test_cmd_expenses_lifecycle() {
    let (db, user) = setup_test_db();

    commands::cmd_expenses_add(
        &db,
        user,
        "Food",
        dec!(12.50),
        Some(day(2024, 3, 5)),
        Some("Lunch"),
    )
    .unwrap();
    let id = db
        .list_expenses_filtered(user, &Default::default())
        .unwrap()[0]
        .id;

    commands::cmd_expenses_list(&db, user, None, None, None, 100).unwrap();
    commands::cmd_expenses_show(&db, user, id).unwrap();

    commands::cmd_expenses_update(&db, user, id, "Transport", dec!(3), None, None).unwrap();
    let updated = db.get_expense(user, id).unwrap().unwrap();
    assert_eq!(updated.category, "Transport");
    assert_eq!(updated.amount, dec!(3));

    commands::cmd_expenses_delete(&db, user, id).unwrap();
    assert!(db.get_expense(user, id).unwrap().is_none());
}

#[test]
fn test_cmd_expenses_missing() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_expenses_show(&db, user, 42).is_err());
    assert!(commands::cmd_expenses_delete(&db, user, 42).is_err());
    assert!(commands::cmd_expenses_update(&db, user, 42, "Food", dec!(1), None, None).is_err());
}

#[test]
fn test_cmd_expenses_add_rejects_zero() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_expenses_add(&db, user, "Food", dec!(0), None, None).is_err());
    commands::cmd_expenses_list(&db, user, None, None, None, 100).unwrap();
}

// ========== Income / Budget / Stats Command Tests ==========

#[test]
fn test_cmd_income() {
    let (db, user) = setup_test_db();
    commands::cmd_income_add(&db, user, dec!(1500), Some("Salary"), Some(day(2024, 3, 1)))
        .unwrap();
    commands::cmd_income_total(&db, user, Some(2024), Some(3)).unwrap();

    let total = db
        .sum_income_between(user, day(2024, 3, 1), day(2024, 3, 31))
        .unwrap();
    assert_eq!(total, dec!(1500));
}

#[test]
fn test_cmd_budget() {
    let (db, user) = setup_test_db();
    commands::cmd_budget_show(&db, user).unwrap();

    commands::cmd_budget_set(&db, user, dec!(500)).unwrap();
    commands::cmd_budget_show(&db, user).unwrap();
    assert!(commands::cmd_budget_set(&db, user, dec!(-1)).is_err());

    let budget = db.get_budget(user).unwrap().unwrap();
    assert_eq!(budget.monthly_budget, dec!(500));
}

#[test]
fn test_cmd_stats() {
    let (db, user) = setup_test_db();
    commands::cmd_stats(&db, user, Some(2024), Some(3)).unwrap();

    commands::cmd_expenses_add(&db, user, "Food", dec!(20), Some(day(2024, 3, 5)), None)
        .unwrap();
    commands::cmd_stats(&db, user, Some(2024), Some(3)).unwrap();
    assert!(commands::cmd_stats(&db, user, Some(2024), Some(0)).is_err());
}

// ========== Assistant Command Tests ==========

#[test]
fn test_cmd_ask_records_history() {
    let (db, user) = setup_test_db();
    commands::cmd_budget_set(&db, user, dec!(100)).unwrap();

    commands::cmd_ask(&db, AssistantConfig::default(), user, "am I on track?", false).unwrap();
    commands::cmd_ask(&db, AssistantConfig::default(), user, "total", true).unwrap();

    let history = db.list_chat_history(user, 50).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message, "am I on track?");
    assert_eq!(history[1].message, "total");

    commands::cmd_history(&db, user, 10).unwrap();
}

#[test]
fn test_cmd_ask_rejects_blank_message() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_ask(&db, AssistantConfig::default(), user, "  ", false).is_err());
    assert!(db.list_chat_history(user, 50).unwrap().is_empty());
}

#[test]
fn test_cmd_history_clear() {
    let (db, user) = setup_test_db();
    commands::cmd_history(&db, user, 10).unwrap();
    commands::cmd_ask(&db, AssistantConfig::default(), user, "help", false).unwrap();

    commands::cmd_history_clear(&db, user).unwrap();
    assert!(db.list_chat_history(user, 50).unwrap().is_empty());
}
