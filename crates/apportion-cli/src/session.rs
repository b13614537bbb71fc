//! The interactive solving session.
//!
//! Owns the constraint set for the current round and drives the menu loop:
//! add constraints until one per category is collected, solve, and on a
//! numeric failure let the user revise or discard constraints and retry.
//! Every solve attempt is written to the audit log before control returns,
//! success and failure alike.

use anyhow::Result;
use dialoguer::Select;
use owo_colors::OwoColorize;
use tracing::{info, warn};

use apportion_audit::{AuditLogger, AuditOutcome, AuditRecord};
use apportion_config::BudgetConfig;
use apportion_core::{BudgetError, Category, Constraint, ConstraintSet};
use apportion_solver::{solve_set, Allocation};

use crate::input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstraintKind {
    Total,
    Fixed,
    Ratio,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add(ConstraintKind),
    DiscardLast,
    DiscardAll,
    Solve,
    Quit,
}

/// Runs one allocation session to completion.
pub fn run(config: &BudgetConfig) -> Result<()> {
    let n = input::prompt_parsed(
        "Number of categories (1 to 4)",
        input::parse_category_count,
    )?;
    let mut categories = Vec::with_capacity(n);
    for i in 0..n {
        categories.push(input::prompt_category(i)?);
    }

    let logger = AuditLogger::new(&config.audit_dir);
    let mut set = ConstraintSet::new(n);

    loop {
        match menu(&set)? {
            MenuChoice::Add(kind) => {
                let constraint = prompt_constraint(kind, &categories)?;
                let description = constraint.describe(&categories);
                match set.add(&constraint, &categories) {
                    Ok(()) => println!("Added: {}", description.green()),
                    Err(err) => println!("{}", err.to_string().red()),
                }
            }
            MenuChoice::DiscardLast => {
                if let Some(description) = set.pop() {
                    println!("Discarded: {description}");
                }
            }
            MenuChoice::DiscardAll => {
                set.clear();
                println!("All constraints discarded.");
            }
            MenuChoice::Solve => {
                if !set.is_complete() {
                    println!(
                        "{}",
                        format!(
                            "Collect {} more constraint(s) before solving.",
                            set.remaining(),
                        )
                        .yellow(),
                    );
                    continue;
                }
                match attempt_solve(&categories, &set, &logger) {
                    Ok(allocation) => {
                        render_allocation(&allocation, &categories, config);
                        return Ok(());
                    }
                    Err(err) => {
                        println!("{}", err.to_string().red());
                        println!("Revise or discard constraints and try again.");
                    }
                }
            }
            MenuChoice::Quit => return Ok(()),
        }
    }
}

/// Solves the collected system and writes the audit record before returning.
///
/// Audit failures are reported but never change the solve outcome.
pub(crate) fn attempt_solve(
    categories: &[Category],
    set: &ConstraintSet,
    logger: &AuditLogger,
) -> Result<Allocation, BudgetError> {
    let report = solve_set(categories, set);

    let outcome = match &report.outcome {
        Ok(allocation) => AuditOutcome::Solved(
            allocation
                .named(categories)
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        ),
        Err(err) => AuditOutcome::Failed(err.to_string()),
    };
    let record = AuditRecord::new(
        "solve",
        categories.iter().map(|c| c.name().to_string()).collect(),
        set.rows().to_vec(),
        set.rhs().to_vec(),
        report.steps,
        outcome,
    );
    match logger.record(&record) {
        Ok(path) => info!(event = "audit_written", path = %path.display()),
        Err(err) => warn!(event = "audit_write_failed", error = %err),
    }

    report.outcome
}

fn menu(set: &ConstraintSet) -> Result<MenuChoice> {
    let mut items = Vec::new();
    let mut choices = Vec::new();

    if !set.is_complete() {
        items.push("Add: total value".to_string());
        choices.push(MenuChoice::Add(ConstraintKind::Total));
        items.push("Add: fixed value for a category".to_string());
        choices.push(MenuChoice::Add(ConstraintKind::Fixed));
        items.push("Add: ratio between two categories".to_string());
        choices.push(MenuChoice::Add(ConstraintKind::Ratio));
        items.push("Add: percentage of the total".to_string());
        choices.push(MenuChoice::Add(ConstraintKind::Percentage));
    }
    if !set.is_empty() {
        items.push("Discard last constraint".to_string());
        choices.push(MenuChoice::DiscardLast);
        items.push("Discard all constraints".to_string());
        choices.push(MenuChoice::DiscardAll);
    }
    items.push(format!(
        "Solve ({} of {} constraints)",
        set.len(),
        set.capacity(),
    ));
    choices.push(MenuChoice::Solve);
    items.push("Quit".to_string());
    choices.push(MenuChoice::Quit);

    let index = Select::new()
        .with_prompt("Choose an action")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(choices[index])
}

fn prompt_constraint(kind: ConstraintKind, categories: &[Category]) -> Result<Constraint> {
    match kind {
        ConstraintKind::Total => {
            let amount =
                input::prompt_parsed("Total budget amount", input::parse_positive_amount)?;
            Ok(Constraint::TotalValue { amount })
        }
        ConstraintKind::Fixed => {
            let category = pick_category("Category to fix", categories)?;
            let amount = input::prompt_parsed(
                &format!("Amount for '{}'", categories[category].name()),
                input::parse_positive_amount,
            )?;
            Ok(Constraint::FixedValue { category, amount })
        }
        ConstraintKind::Ratio => {
            let category_a = pick_category("Dependent category (A)", categories)?;
            let category_b = pick_category("Reference category (B)", categories)?;
            let factor = input::prompt_parsed(
                &format!(
                    "Factor f in '{}' = f * '{}' (e.g. 2 for double)",
                    categories[category_a].name(),
                    categories[category_b].name(),
                ),
                input::parse_factor,
            )?;
            Ok(Constraint::Ratio {
                category_a,
                category_b,
                factor,
            })
        }
        ConstraintKind::Percentage => {
            let category = pick_category("Category", categories)?;
            let percent = input::prompt_parsed(
                &format!(
                    "Percentage of the total for '{}' (0 to 100)",
                    categories[category].name(),
                ),
                input::parse_percentage,
            )?;
            Ok(Constraint::Percentage { category, percent })
        }
    }
}

fn pick_category(prompt: &str, categories: &[Category]) -> Result<usize> {
    let names: Vec<&str> = categories.iter().map(Category::name).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact()?;
    Ok(index)
}

fn render_allocation(allocation: &Allocation, categories: &[Category], config: &BudgetConfig) {
    println!();
    for (name, value) in allocation.named(categories) {
        println!(
            "{name}: {}",
            format!("{}{value:.2}", config.currency_symbol).green(),
        );
    }
    println!(
        "{}",
        format!(
            "Total budget: {}{:.2}",
            config.currency_symbol,
            allocation.total(),
        )
        .bold(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<Category> {
        names.iter().copied().map(Category::new).collect()
    }

    #[test]
    fn attempt_solve_audits_success() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path());

        let cats = categories(&["Rent", "Food"]);
        let mut set = ConstraintSet::new(2);
        set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
            .unwrap();
        set.add(
            &Constraint::FixedValue {
                category: 0,
                amount: 600.0,
            },
            &cats,
        )
        .unwrap();

        let allocation = attempt_solve(&cats, &set, &logger).unwrap();
        assert!((allocation.total() - 1000.0).abs() < 1e-9);

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let contents =
            std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert!(contents.contains("Result:"));
        assert!(contents.contains("Rent: 600.00"));
    }

    #[test]
    fn attempt_solve_audits_failure_too() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path());

        let cats = categories(&["Rent", "Food"]);
        let mut set = ConstraintSet::new(2);
        for _ in 0..2 {
            set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
                .unwrap();
        }

        let err = attempt_solve(&cats, &set, &logger).unwrap_err();
        assert!(matches!(err, BudgetError::SingularMatrix { .. }));

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let contents =
            std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert!(contents.contains("Error:"));
        assert!(contents.contains("unique allocation"));
    }

    #[test]
    fn rejected_negative_solution_appears_in_the_audit_record() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::new(dir.path());

        let cats = categories(&["Rent", "Food"]);
        let mut set = ConstraintSet::new(2);
        set.add(
            &Constraint::FixedValue {
                category: 0,
                amount: 1200.0,
            },
            &cats,
        )
        .unwrap();
        set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
            .unwrap();

        let err = attempt_solve(&cats, &set, &logger).unwrap_err();
        assert!(matches!(err, BudgetError::NegativeAllocation { .. }));

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        let contents =
            std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        // The rejected vector shows up both in the steps and the error text.
        assert!(contents.contains("Raw solution x: [1200.0000, -200.0000]"));
        assert!(contents.contains("-200"));
    }
}
