use chrono::NaiveDate;
use crate::error::ValidationError;
use crate::expense_store::Category;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true if `text` parses under `format` and formats back to exactly
/// the same text, so `2024-1-5` is rejected under `%Y-%m-%d`.
pub fn validate_date(text: &str, format: &str) -> bool {
    match NaiveDate::parse_from_str(text, format) {
        Ok(date) => date.format(format).to_string() == text,
        Err(_) => false,
    }
}

/// Surrounding whitespace is not part of the format and is rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    if !validate_date(text, DATE_FORMAT) {
        return Err(ValidationError::InvalidDate);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)
}

/// Trims and title-cases the input before matching it against the allowed categories.
pub fn normalize_category(text: &str) -> Result<Category, ValidationError> {
    let titled = title_case(text.trim());
    titled
        .parse::<Category>()
        .map_err(|_| ValidationError::UnknownCategory(titled))
}

pub fn validate_amount(text: &str) -> Result<f64, ValidationError> {
    check_amount(parse_number(text)?)
}

pub fn check_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NotANumber(amount.to_string()));
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(amount)
}

/// Budgets must be strictly positive, unlike expense amounts.
pub fn validate_budget(text: &str) -> Result<f64, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyBudget);
    }
    let budget = parse_number(text)?;
    if budget <= 0.0 {
        return Err(ValidationError::NonPositiveBudget);
    }
    Ok(budget)
}

fn parse_number(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(trimmed.to_string())),
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

/// Parses a yes/no continuation answer. Only `Y` or `N` in any case is accepted.
pub fn parse_continuation(text: &str) -> Option<bool> {
    match text.to_uppercase().as_str() {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_valid() {
        assert!(validate_date("2024-01-15", DATE_FORMAT));
        assert!(validate_date("2024-02-29", DATE_FORMAT));
        assert_eq!(parse_date("2024-01-15"), Ok(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    }

    #[test]
    fn test_date_wrong_shape() {
        assert!(!validate_date("2024-1-5", DATE_FORMAT));
        assert!(!validate_date("15/01/2024", DATE_FORMAT));
        assert!(!validate_date("2024-01-15T10:00", DATE_FORMAT));
        assert!(!validate_date("", DATE_FORMAT));
        assert_eq!(parse_date("yesterday"), Err(ValidationError::InvalidDate));
        assert_eq!(parse_date(" 2024-01-15 "), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_date_not_on_calendar() {
        assert!(!validate_date("2023-02-29", DATE_FORMAT));
        assert!(!validate_date("2024-13-01", DATE_FORMAT));
        assert!(!validate_date("2024-04-31", DATE_FORMAT));
    }

    #[test]
    fn test_category_normalized() {
        assert_eq!(normalize_category("food"), Ok(Category::Food));
        assert_eq!(normalize_category("  TRAVEL "), Ok(Category::Travel));
        assert_eq!(normalize_category("uTiLiTiEs"), Ok(Category::Utilities));
    }

    #[test]
    fn test_category_rejected() {
        assert_eq!(
            normalize_category("Groceries"),
            Err(ValidationError::UnknownCategory("Groceries".to_string()))
        );
        assert!(normalize_category("").is_err());
        assert!(normalize_category("food court").is_err());
    }

    #[test]
    fn test_amount() {
        assert_eq!(validate_amount("0"), Ok(0.0));
        assert_eq!(validate_amount("12.50"), Ok(12.5));
        assert_eq!(validate_amount("-5"), Err(ValidationError::NegativeAmount));
        assert_eq!(validate_amount("abc"), Err(ValidationError::NotANumber("abc".to_string())));
        assert!(validate_amount("NaN").is_err());
        assert!(validate_amount("inf").is_err());
    }

    #[test]
    fn test_budget() {
        assert_eq!(validate_budget("500"), Ok(500.0));
        assert_eq!(validate_budget("   "), Err(ValidationError::EmptyBudget));
        assert_eq!(validate_budget("0"), Err(ValidationError::NonPositiveBudget));
        assert_eq!(validate_budget("-10"), Err(ValidationError::NonPositiveBudget));
        assert!(matches!(validate_budget("lots"), Err(ValidationError::NotANumber(_))));
    }

    #[test]
    fn test_continuation() {
        assert_eq!(parse_continuation("y"), Some(true));
        assert_eq!(parse_continuation("N"), Some(false));
        assert_eq!(parse_continuation(" y "), None);
        assert_eq!(parse_continuation("N\n"), None);
        assert_eq!(parse_continuation("yes"), None);
        assert_eq!(parse_continuation(""), None);
    }
}
