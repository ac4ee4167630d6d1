//! Response Synthesizer
//!
//! Renders plain-text answers from an [`Intent`] and the computed
//! [`Metrics`]. Rendering never touches storage; it fails only when a
//! percentage or share cannot be represented.

use rust_decimal::{Decimal, RoundingStrategy};

use super::intent::Intent;
use super::metrics::Metrics;
use super::trend::predict_next_month;
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::money::{percent_of, share_of};

/// Render a currency amount as `$` plus two decimals
///
/// Negative amounts render as `-$20.00`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// Render a percentage with one decimal
pub fn format_percent(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

/// Turns intents into answers using the configured thresholds
#[derive(Debug, Clone)]
pub struct ResponseSynthesizer {
    caution_percent: Decimal,
    top_category_share_percent: Decimal,
    low_remaining_percent: Decimal,
}

impl Default for ResponseSynthesizer {
    fn default() -> Self {
        Self::new(&AssistantConfig::default())
    }
}

impl ResponseSynthesizer {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            caution_percent: config.caution_percent,
            top_category_share_percent: config.top_category_share_percent,
            low_remaining_percent: config.low_remaining_percent,
        }
    }

    pub fn render(&self, intent: &Intent, metrics: &Metrics) -> Result<String> {
        let response = match intent {
            Intent::SpendOnCategory(category) => format!(
                "You have spent {} on {} this month.",
                format_money(metrics.category_total(category)),
                category
            ),
            Intent::BudgetStatus => self.budget_status(metrics)?,
            Intent::TopCategory => match metrics.top_category() {
                Some(top) => format!(
                    "You're spending the most on {} with {} this month.",
                    top.category,
                    format_money(top.total)
                ),
                None => "You haven't recorded any expenses this month yet.".to_string(),
            },
            Intent::TotalSpending => format!(
                "Your total expenses this month are {}.",
                format_money(metrics.summary.total_expenses)
            ),
            Intent::Prediction => match predict_next_month(&metrics.trend)? {
                Some(estimate) => format!(
                    "Based on your spending patterns, I predict you'll spend approximately {} next month.",
                    format_money(estimate)
                ),
                None => "I need more historical data to make accurate predictions. Keep tracking your expenses!"
                    .to_string(),
            },
            Intent::IncomeVsExpense => income_vs_expense(metrics)?,
            Intent::Recommendation => self.recommendations(metrics)?.join(" "),
            Intent::Help => help(metrics)?,
        };
        Ok(response)
    }

    fn budget_status(&self, metrics: &Metrics) -> Result<String> {
        let Some(usage) = metrics.usage_percent()? else {
            return Ok(
                "You haven't set a monthly budget yet. Set one to track your spending!".to_string(),
            );
        };
        let remaining = metrics.summary.remaining;

        let response = if usage > Decimal::ONE_HUNDRED {
            format!(
                "You have used {} of your budget this month and exceeded it by {}. Consider reviewing your expenses.",
                format_percent(usage),
                format_money(-remaining)
            )
        } else if usage > self.caution_percent {
            format!(
                "You're at {} of your budget. You have {} remaining. Be mindful of your spending.",
                format_percent(usage),
                format_money(remaining)
            )
        } else {
            format!(
                "Great job! You're at {} of your budget. You have {} remaining this month.",
                format_percent(usage),
                format_money(remaining)
            )
        };
        Ok(response)
    }

    fn recommendations(&self, metrics: &Metrics) -> Result<Vec<String>> {
        let Some(top) = metrics.top_category() else {
            return Ok(vec![
                "Start by tracking your expenses regularly to get personalized recommendations."
                    .to_string(),
            ]);
        };

        if !metrics.has_budget() {
            return Ok(vec![format!(
                "Set a monthly budget to get personalized advice; {} is currently your largest expense.",
                top.category
            )]);
        }

        let budget = metrics.summary.monthly_budget;
        let mut advice = Vec::new();

        if top.total > share_of(budget, self.top_category_share_percent)? {
            advice.push(format!(
                "Consider reducing spending on {} (currently {} of budget).",
                top.category,
                format_percent(percent_of(top.total, budget)?)
            ));
        }

        if metrics.summary.total_expenses > budget {
            advice.push(
                "You're over budget. Review your largest expenses and identify areas to cut back."
                    .to_string(),
            );
        } else if metrics.summary.remaining < share_of(budget, self.low_remaining_percent)? {
            advice.push(
                "You're close to your budget limit. Be mindful of additional expenses.".to_string(),
            );
        } else {
            advice.push(
                "You're doing well with your budget! Keep up the good financial habits."
                    .to_string(),
            );
        }

        Ok(advice)
    }
}

fn income_vs_expense(metrics: &Metrics) -> Result<String> {
    let income = metrics.summary.total_income;
    let expenses = metrics.summary.total_expenses;
    let savings = metrics.savings()?;

    let response = if savings > Decimal::ZERO {
        format!(
            "Your income this month is {} and expenses are {}. You're saving {}!",
            format_money(income),
            format_money(expenses),
            format_money(savings)
        )
    } else {
        format!(
            "Your expenses ({}) exceed your income ({}) by {}. Consider reviewing your spending.",
            format_money(expenses),
            format_money(income),
            format_money(-savings)
        )
    };
    Ok(response)
}

fn help(metrics: &Metrics) -> Result<String> {
    let budget_line = match metrics.usage_percent()? {
        Some(usage) => format!("{} used", format_percent(usage)),
        None => "Not set".to_string(),
    };
    let top_line = match metrics.top_category() {
        Some(top) => format!("{} ({})", top.category, format_money(top.total)),
        None => format!("None ({})", format_money(Decimal::ZERO)),
    };

    Ok(format!(
        "I can help you with:\n\
         - Total spending this month: {}\n\
         - Budget status: {}\n\
         - Top spending category: {}\n\
         - Remaining budget: {}\n\
         \n\
         Ask me specific questions like \"How much did I spend on food?\" or \"Am I on track with my budget?\"",
        format_money(metrics.summary.total_expenses),
        budget_line,
        top_line,
        format_money(metrics.summary.remaining)
    ))
}
