//! Input checks shared by the mutation services.

use rentdesk_shared::{
    AppError, AppResult,
    types::{MAX_MONEY, round_money},
};
use rust_decimal::Decimal;

/// Rounds `amount` to cents and fails unless the result is positive and
/// fits the ledger columns.
pub(crate) fn money(field: &str, amount: Decimal) -> AppResult<Decimal> {
    let amount = round_money(amount);
    positive(field, amount)?;
    at_most_max(field, amount)
}

/// Like [`money`], but zero is allowed.
pub(crate) fn optional_money(field: &str, amount: Decimal) -> AppResult<Decimal> {
    let amount = round_money(amount);
    non_negative(field, amount)?;
    at_most_max(field, amount)
}

fn at_most_max(field: &str, amount: Decimal) -> AppResult<Decimal> {
    if amount > MAX_MONEY {
        Err(AppError::bad_request(format!(
            "{field} must not exceed {MAX_MONEY}"
        )))
    } else {
        Ok(amount)
    }
}

/// Fails unless `amount` is strictly positive.
pub(crate) fn positive(field: &str, amount: Decimal) -> AppResult<()> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(AppError::bad_request(format!("{field} must be greater than 0")))
    }
}

/// Fails if `amount` is negative.
pub(crate) fn non_negative(field: &str, amount: Decimal) -> AppResult<()> {
    if amount < Decimal::ZERO {
        Err(AppError::bad_request(format!("{field} must not be negative")))
    } else {
        Ok(())
    }
}

/// Trims `value` and fails if nothing is left.
pub(crate) fn non_blank(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::bad_request(format!("{field} must not be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Normalizes an email address and checks its basic shape.
pub(crate) fn email(value: &str) -> AppResult<String> {
    let email = value.trim().to_lowercase();
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if valid {
        Ok(email)
    } else {
        Err(AppError::bad_request("email must be a valid address"))
    }
}

/// Trims an optional free-text value, mapping blank text to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("Owner@Example.com ", Some("owner@example.com"))]
    #[case("no-at-sign", None)]
    #[case("@example.com", None)]
    #[case("a@localhost", None)]
    #[case("a@b.", None)]
    fn test_email(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(email(input).ok().as_deref(), expected);
    }

    #[test]
    fn test_amount_checks() {
        assert!(positive("amount", dec!(0.01)).is_ok());
        assert!(positive("amount", dec!(0)).is_err());
        assert!(non_negative("amount", dec!(0)).is_ok());
        assert!(non_negative("amount", dec!(-1)).is_err());
    }

    #[rstest]
    #[case(dec!(0.004), None)]
    #[case(dec!(0.005), Some(dec!(0.01)))]
    #[case(dec!(-3), None)]
    #[case(dec!(999999999999.99), Some(dec!(999999999999.99)))]
    #[case(dec!(1000000000000), None)]
    #[case(Decimal::MAX, None)]
    fn test_money(#[case] input: Decimal, #[case] expected: Option<Decimal>) {
        assert_eq!(money("amount", input).ok(), expected);
    }

    #[test]
    fn test_optional_money() {
        assert_eq!(optional_money("cleaning", dec!(0.004)).unwrap(), dec!(0.00));
        assert!(optional_money("cleaning", dec!(-0.01)).is_err());
        assert!(optional_money("cleaning", Decimal::MAX).is_err());
    }

    #[test]
    fn test_text_checks() {
        assert_eq!(non_blank("name", "  Ann ").unwrap(), "Ann");
        assert!(non_blank("name", "   ").is_err());
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" hi ".into())), Some("hi".into()));
    }
}
