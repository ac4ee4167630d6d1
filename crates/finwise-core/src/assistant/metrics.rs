//! Metric Aggregator
//!
//! Turns one calendar month of raw records into the totals every response
//! is built from. Pure once the records are fetched; totals too large for a
//! `Decimal` are reported as `Error::InvalidData`.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::FinanceStore;
use crate::error::Result;
use crate::models::{CategoryTotal, Expense, TrendPoint};
use crate::money::{checked_diff, checked_sum, percent_of};
use crate::period::month_bounds;

/// Aggregates for the reference month, as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Sorted by total, highest first
    pub category_totals: Vec<CategoryTotal>,
    pub total_expenses: Decimal,
    /// Zero when no budget is set
    pub monthly_budget: Decimal,
    /// `monthly_budget - total_expenses`; negative when over budget
    pub remaining: Decimal,
    pub total_income: Decimal,
}

impl MonthlySummary {
    /// Build the summary from already-fetched records
    pub fn from_records(
        expenses: &[Expense],
        total_income: Decimal,
        monthly_budget: Option<Decimal>,
    ) -> Result<Self> {
        let category_totals = category_totals(expenses)?;
        let total_expenses = checked_sum(expenses.iter().map(|e| e.amount))?;
        let monthly_budget = monthly_budget.unwrap_or(Decimal::ZERO);

        Ok(Self {
            category_totals,
            total_expenses,
            monthly_budget,
            remaining: checked_diff(monthly_budget, total_expenses)?,
            total_income,
        })
    }
}

/// Everything the response synthesizer may draw on for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    /// Ascending by (year, month); months without expenses are absent
    pub trend: Vec<TrendPoint>,
}

impl Metrics {
    pub fn new(summary: MonthlySummary, trend: Vec<TrendPoint>) -> Self {
        Self { summary, trend }
    }

    pub fn has_budget(&self) -> bool {
        self.summary.monthly_budget > Decimal::ZERO
    }

    /// Spending as a percentage of the budget; `None` without a budget
    pub fn usage_percent(&self) -> Result<Option<Decimal>> {
        if !self.has_budget() {
            return Ok(None);
        }
        percent_of(self.summary.total_expenses, self.summary.monthly_budget).map(Some)
    }

    /// Income minus expenses for the month
    pub fn savings(&self) -> Result<Decimal> {
        checked_diff(self.summary.total_income, self.summary.total_expenses)
    }

    /// Highest-spending category
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.summary.category_totals.first()
    }

    /// Total for a category (case-insensitive, first match); zero when absent
    pub fn category_total(&self, category: &str) -> Decimal {
        self.summary
            .category_totals
            .iter()
            .find(|c| c.category.to_lowercase() == category.to_lowercase())
            .map(|c| c.total)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Sum amounts per category, highest total first
///
/// Categories with equal totals keep the order in which they first appear
/// in `expenses`.
pub fn category_totals(expenses: &[Expense]) -> Result<Vec<CategoryTotal>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&i) => totals[i].total = checked_sum([totals[i].total, expense.amount])?,
            None => {
                index.insert(expense.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    // Stable sort: ties stay in first-appearance order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(totals)
}

/// Compute the monthly summary for the month containing `reference_date`
pub fn aggregate_month<S: FinanceStore + ?Sized>(
    store: &S,
    user_id: i64,
    reference_date: NaiveDate,
) -> Result<MonthlySummary> {
    let (from, to) = month_bounds(reference_date)?;

    let expenses = store.list_expenses(user_id, from, to)?;
    let total_income = store.sum_income(user_id, from, to)?;
    let monthly_budget = store.get_budget(user_id)?;

    let summary = MonthlySummary::from_records(&expenses, total_income, monthly_budget)?;
    debug!(
        user_id,
        %from,
        %to,
        expenses = expenses.len(),
        categories = summary.category_totals.len(),
        total = %summary.total_expenses,
        "Aggregated month"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::MockStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn expense(id: i64, category: &str, amount: Decimal) -> Expense {
        Expense {
            id,
            user_id: 1,
            category: category.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_totals_sorted_descending() {
        let expenses = vec![
            expense(1, "Transport", dec!(10)),
            expense(2, "Food", dec!(25.50)),
            expense(3, "Food", dec!(14.50)),
            expense(4, "Rent", dec!(5)),
        ];
        let totals = category_totals(&expenses).unwrap();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].category, "Food");
        assert_eq!(totals[0].total, dec!(40.00));
        assert_eq!(totals[1].category, "Transport");
        assert_eq!(totals[2].category, "Rent");
        assert!(totals.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn test_category_totals_ties_keep_first_appearance() {
        let expenses = vec![
            expense(1, "Books", dec!(10)),
            expense(2, "Games", dec!(10)),
            expense(3, "Art", dec!(10)),
        ];
        let names: Vec<_> = category_totals(&expenses)
            .unwrap()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["Books", "Games", "Art"]);
    }

    #[test]
    fn test_category_sum_matches_total() {
        let expenses = vec![
            expense(1, "Food", dec!(0.10)),
            expense(2, "Food", dec!(0.20)),
            expense(3, "Fun", dec!(19.99)),
            expense(4, "Transport", dec!(3.33)),
        ];
        let summary = MonthlySummary::from_records(&expenses, Decimal::ZERO, None).unwrap();
        let sum: Decimal = summary.category_totals.iter().map(|c| c.total).sum();

        assert_eq!(sum, summary.total_expenses);
        assert_eq!(summary.total_expenses, dec!(23.62));
    }

    #[test]
    fn test_remaining_may_be_negative() {
        let expenses = vec![expense(1, "Food", dec!(120))];
        let summary =
            MonthlySummary::from_records(&expenses, Decimal::ZERO, Some(dec!(100))).unwrap();
        assert_eq!(summary.remaining, dec!(-20));
        assert_eq!(
            summary.remaining,
            summary.monthly_budget - summary.total_expenses
        );
    }

    #[test]
    fn test_missing_budget_is_zero() {
        let summary = MonthlySummary::from_records(&[], Decimal::ZERO, None).unwrap();
        assert_eq!(summary.monthly_budget, Decimal::ZERO);
        assert_eq!(summary.remaining, Decimal::ZERO);

        let metrics = Metrics::new(summary, vec![]);
        assert!(!metrics.has_budget());
        assert_eq!(metrics.usage_percent().unwrap(), None);
    }

    #[test]
    fn test_usage_percent_and_lookup() {
        let expenses = vec![expense(1, "Food", dec!(40)), expense(2, "transport", dec!(10))];
        let summary =
            MonthlySummary::from_records(&expenses, dec!(500), Some(dec!(100))).unwrap();
        let metrics = Metrics::new(summary, vec![]);

        assert_eq!(metrics.usage_percent().unwrap(), Some(dec!(50)));
        assert_eq!(metrics.category_total("FOOD"), dec!(40));
        assert_eq!(metrics.category_total("Transport"), dec!(10));
        assert_eq!(metrics.category_total("rent"), Decimal::ZERO);
        assert_eq!(metrics.savings().unwrap(), dec!(450));
    }

    #[test]
    fn test_overflowing_totals_are_errors() {
        let expenses = vec![
            expense(1, "Food", Decimal::MAX),
            expense(2, "Food", Decimal::MAX),
        ];
        assert!(matches!(
            category_totals(&expenses),
            Err(Error::InvalidData(_))
        ));

        let split = vec![
            expense(1, "Food", Decimal::MAX),
            expense(2, "Rent", Decimal::MAX),
        ];
        assert!(matches!(
            MonthlySummary::from_records(&split, Decimal::ZERO, None),
            Err(Error::InvalidData(_))
        ));

        let one = vec![expense(1, "Food", Decimal::MAX)];
        assert!(MonthlySummary::from_records(&one, Decimal::ZERO, Some(Decimal::MIN)).is_err());
    }

    #[test]
    fn test_usage_percent_overflow_is_error() {
        let expenses = vec![expense(1, "Food", dec!(1000000000))];
        let summary = MonthlySummary::from_records(
            &expenses,
            Decimal::ZERO,
            Some(dec!(0.0000000000000000000001)),
        )
        .unwrap();
        let metrics = Metrics::new(summary, vec![]);

        assert!(metrics.has_budget());
        assert!(matches!(
            metrics.usage_percent(),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_savings_overflow_is_error() {
        let summary = MonthlySummary {
            category_totals: vec![],
            total_expenses: Decimal::MAX,
            monthly_budget: Decimal::ZERO,
            remaining: Decimal::ZERO,
            total_income: Decimal::MIN,
        };
        assert!(Metrics::new(summary, vec![]).savings().is_err());
    }

    #[test]
    fn test_aggregate_month_only_reads_reference_month() {
        let store = MockStore::new()
            .with_budget(1, dec!(100))
            .with_expense(1, "Food", dec!(40), 2024, 3, 5)
            .with_expense(1, "Food", dec!(99), 2024, 2, 28)
            .with_expense(2, "Food", dec!(7), 2024, 3, 5)
            .with_income(1, dec!(300), 2024, 3, 1)
            .with_income(1, dec!(1000), 2024, 4, 1);

        let reference = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let summary = aggregate_month(&store, 1, reference).unwrap();

        assert_eq!(summary.total_expenses, dec!(40));
        assert_eq!(summary.total_income, dec!(300));
        assert_eq!(summary.monthly_budget, dec!(100));
        assert_eq!(summary.remaining, dec!(60));
    }

    #[test]
    fn test_summary_serializes_presentation_keys() {
        let summary = MonthlySummary::from_records(&[], Decimal::ZERO, None).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        for key in [
            "categoryTotals",
            "totalExpenses",
            "monthlyBudget",
            "remaining",
            "totalIncome",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
