//! Trend Builder
//!
//! Monthly spending totals over the trailing window, used for display and
//! for the next-month estimate. Months with no expenses are omitted, so a
//! six-month window can yield anywhere from zero to six points.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::store::FinanceStore;
use crate::error::Result;
use crate::models::TrendPoint;
use crate::money::checked_sum;
use crate::period::trailing_months;

/// Minimum points required before a prediction is attempted
pub const MIN_PREDICTION_POINTS: usize = 2;

/// Monthly totals for the `months` calendar months ending at `reference_date`
pub fn build_trend<S: FinanceStore + ?Sized>(
    store: &S,
    user_id: i64,
    reference_date: NaiveDate,
    months: u32,
) -> Result<Vec<TrendPoint>> {
    let (from, to) = trailing_months(reference_date, months)?;
    let mut points = store.list_monthly_totals(user_id, from, to)?;
    points.sort_by_key(|p| (p.year, p.month));

    debug!(user_id, %from, %to, points = points.len(), "Built spending trend");
    Ok(points)
}

/// Simple moving average of the trend totals
///
/// `None` when there are fewer than two points.
pub fn predict_next_month(trend: &[TrendPoint]) -> Result<Option<Decimal>> {
    if trend.len() < MIN_PREDICTION_POINTS {
        return Ok(None);
    }
    let sum = checked_sum(trend.iter().map(|p| p.total))?;
    Ok(Some(sum / Decimal::from(trend.len())))
}
