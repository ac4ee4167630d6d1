//! FinWise CLI - Personal finance tracker with a built-in assistant
//!
//! Usage:
//!   finwise init                              Initialize database
//!   finwise expenses add -c Food -a 12.50     Record an expense
//!   finwise budget set 500                    Set the monthly budget
//!   finwise ask am I on track with my budget  Ask the assistant

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    if let Commands::Init = cli.command {
        return commands::cmd_init(&cli.db, cli.no_encrypt);
    }

    let db = commands::open_db(&cli.db, cli.no_encrypt)?;
    let user = cli.user;

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Users { action } => match action {
            Some(UsersAction::Add { name, email }) => commands::cmd_users_add(&db, &name, &email),
            None | Some(UsersAction::List) => commands::cmd_users_list(&db),
        },
        Commands::Expenses { action } => match action {
            None => commands::cmd_expenses_list(&db, user, None, None, None, 100),
            Some(ExpensesAction::Add {
                category,
                amount,
                date,
                description,
            }) => commands::cmd_expenses_add(
                &db,
                user,
                &category,
                amount,
                date,
                description.as_deref(),
            ),
            Some(ExpensesAction::List {
                category,
                from,
                to,
                limit,
            }) => commands::cmd_expenses_list(&db, user, category, from, to, limit),
            Some(ExpensesAction::Show { id }) => commands::cmd_expenses_show(&db, user, id),
            Some(ExpensesAction::Update {
                id,
                category,
                amount,
                date,
                description,
            }) => commands::cmd_expenses_update(
                &db,
                user,
                id,
                &category,
                amount,
                date,
                description.as_deref(),
            ),
            Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, user, id),
        },
        Commands::Income { action } => match action {
            IncomeAction::Add {
                amount,
                source,
                date,
            } => commands::cmd_income_add(&db, user, amount, source.as_deref(), date),
            IncomeAction::Total { month, year } => {
                commands::cmd_income_total(&db, user, year, month)
            }
        },
        Commands::Budget { action } => match action {
            Some(BudgetAction::Set { amount }) => commands::cmd_budget_set(&db, user, amount),
            None | Some(BudgetAction::Show) => commands::cmd_budget_show(&db, user),
        },
        Commands::Stats { month, year } => commands::cmd_stats(&db, user, year, month),
        Commands::Ask { message, json } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_ask(&db, config, user, &message.join(" "), json)
        }
        Commands::History { limit, clear } => {
            if clear {
                commands::cmd_history_clear(&db, user)
            } else {
                let config = commands::load_config(cli.config.as_deref())?;
                commands::cmd_history(&db, user, limit.unwrap_or(config.history_limit))
            }
        }
    }
}
