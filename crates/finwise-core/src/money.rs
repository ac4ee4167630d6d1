//! Currency arithmetic
//!
//! Amounts are `Decimal`, and every total, share and percentage is computed
//! with checked operations. Overflow becomes `Error::InvalidData` rather than
//! a panic, so one bad stored row cannot take down every later query.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Largest amount accepted for a single expense, income payment or budget
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Decimal places accepted on input amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Reject non-positive amounts, amounts above [`MAX_AMOUNT`] and sub-cent precision
pub fn validate_amount(amount: Decimal, label: &str) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(format!(
            "{} must be greater than zero",
            label
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(Error::Validation(format!(
            "{} must not exceed {}",
            label, MAX_AMOUNT
        )));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(Error::Validation(format!(
            "{} must have at most {} decimal places",
            label, AMOUNT_SCALE
        )));
    }
    Ok(())
}

fn overflow(what: &str) -> Error {
    Error::InvalidData(format!("{} is too large to represent", what))
}

/// Sum of `values`, failing instead of overflowing
pub fn checked_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Result<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or_else(|| overflow("Total"))
    })
}

/// `a - b`, failing instead of overflowing
pub fn checked_diff(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow("Difference"))
}

/// `part` as a percentage of `whole`
///
/// `whole` must be non-zero; callers check for a budget first.
pub fn percent_of(part: Decimal, whole: Decimal) -> Result<Decimal> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("Percentage"))
}

/// `percent` percent of `amount`
pub fn share_of(amount: Decimal, percent: Decimal) -> Result<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("Share"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount_bounds() {
        assert!(validate_amount(dec!(0.01), "Amount").is_ok());
        assert!(validate_amount(dec!(12.50), "Amount").is_ok());
        assert!(validate_amount(dec!(1000000000), "Amount").is_ok());
        // Trailing zeros do not count as precision
        assert!(validate_amount(dec!(12.5000), "Amount").is_ok());

        for bad in [
            Decimal::ZERO,
            dec!(-1),
            dec!(1000000000.01),
            dec!(0.001),
            dec!(0.0000000000000000000001),
            Decimal::MAX,
        ] {
            assert!(
                matches!(validate_amount(bad, "Amount"), Err(Error::Validation(_))),
                "{} accepted",
                bad
            );
        }
    }

    #[test]
    fn test_validation_message_names_the_field() {
        let err = validate_amount(dec!(0.001), "Monthly budget").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Monthly budget must have at most 2 decimal places"
        );
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(0.10), dec!(0.20)]).unwrap(), dec!(0.30));
        assert_eq!(checked_sum(Vec::new()).unwrap(), Decimal::ZERO);
        assert!(matches!(
            checked_sum([Decimal::MAX, Decimal::MAX]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_checked_diff() {
        assert_eq!(checked_diff(dec!(100), dec!(120)).unwrap(), dec!(-20));
        assert!(checked_diff(Decimal::MIN, Decimal::MAX).is_err());
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(40), dec!(100)).unwrap(), dec!(40));
        assert_eq!(percent_of(dec!(120), dec!(100)).unwrap(), dec!(120));
        assert!(matches!(
            percent_of(dec!(1000000000), dec!(0.0000000000000000000001)),
            Err(Error::InvalidData(_))
        ));
        assert!(percent_of(dec!(1), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_share_of() {
        assert_eq!(share_of(dec!(200), dec!(30)).unwrap(), dec!(60));
        assert!(share_of(Decimal::MAX, dec!(30)).is_err());
    }
}
