//! Field validation for wallet forms
//!
//! Every validator is a pure function of its input and policy. A fresh
//! [`ValidationResult`] is returned on each call.

use crate::models::Money;

/// Shown when an amount is empty, unparsable, zero or negative
pub const INVALID_AMOUNT: &str = "يرجى إدخال مبلغ صحيح";

/// Shown when an amount exceeds the available balance
pub const INSUFFICIENT_BALANCE: &str = "الرصيد غير كافي";

/// Number of digits in a card security code
pub const CVV_LEN: usize = 3;

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Empty when valid
    pub message: String,
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    /// A failing result with a user-facing message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }

    /// Convert to a `Result` carrying the message on failure
    pub fn into_result(self) -> Result<(), String> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.message)
        }
    }
}

/// Bounds for an amount field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPolicy {
    /// Inclusive lower bound, on top of the amount being positive
    pub minimum: Option<Money>,
    /// Inclusive upper bound, usually the available balance
    pub maximum: Option<Money>,
    /// Message used when the amount is below `minimum`
    pub below_minimum: String,
}

impl AmountPolicy {
    /// Any positive amount
    pub fn positive() -> Self {
        Self {
            minimum: None,
            maximum: None,
            below_minimum: INVALID_AMOUNT.to_string(),
        }
    }

    /// Positive and at least `minimum`
    pub fn at_least(minimum: Money, below_minimum: impl Into<String>) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: None,
            below_minimum: below_minimum.into(),
        }
    }

    /// Cap the amount at `maximum`
    pub fn at_most(mut self, maximum: Money) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

/// Rules for a free-text reference such as a transaction number or RIB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePolicy {
    pub min_len: usize,
    pub empty_message: String,
    pub too_short_message: String,
}

/// Parse user text into a strictly positive amount
pub fn parse_amount(input: &str) -> Option<Money> {
    Money::parse(input).ok().filter(|m| m.is_positive())
}

/// Validate an amount field
pub fn validate_amount(input: &str, policy: &AmountPolicy) -> ValidationResult {
    let Some(amount) = parse_amount(input) else {
        return ValidationResult::invalid(INVALID_AMOUNT);
    };

    if let Some(minimum) = policy.minimum {
        if amount < minimum {
            return ValidationResult::invalid(policy.below_minimum.clone());
        }
    }

    if let Some(maximum) = policy.maximum {
        if amount > maximum {
            return ValidationResult::invalid(INSUFFICIENT_BALANCE);
        }
    }

    ValidationResult::valid()
}

/// Validate a reference field; surrounding whitespace is ignored
pub fn validate_reference(input: &str, policy: &ReferencePolicy) -> ValidationResult {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return ValidationResult::invalid(policy.empty_message.clone());
    }

    if trimmed.chars().count() < policy.min_len {
        return ValidationResult::invalid(policy.too_short_message.clone());
    }

    ValidationResult::valid()
}

/// Validate that a field is not blank
pub fn validate_required(input: &str, message: &str) -> ValidationResult {
    if input.trim().is_empty() {
        ValidationResult::invalid(message)
    } else {
        ValidationResult::valid()
    }
}

/// Validate that a field holds one of a fixed set of values
pub fn validate_choice(input: &str, options: &[String], message: &str) -> ValidationResult {
    let value = input.trim();
    if options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(message)
    }
}

/// Keep only digits, truncated to the security code length
pub fn sanitize_cvv(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CVV_LEN)
        .collect()
}

/// Format a limit the way limit messages show it: `1000`, `1000.50`
pub fn plain_amount(amount: Money) -> String {
    if amount.cents_part() == 0 {
        amount.units().to_string()
    } else {
        format!("{}.{:02}", amount.units(), amount.cents_part())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recharge_policy() -> AmountPolicy {
        AmountPolicy::at_least(Money::from_units(1000), "الحد الأدنى: 1000 دج")
    }

    fn rib_policy() -> ReferencePolicy {
        ReferencePolicy {
            min_len: 16,
            empty_message: "يرجى إدخال رقم الحساب البنكي (RIB)".into(),
            too_short_message: "رقم الحساب البنكي غير صحيح".into(),
        }
    }

    #[test]
    fn test_amount_rejects_non_positive() {
        for input in ["", "   ", "abc", "0", "-50", "0.00"] {
            let result = validate_amount(input, &recharge_policy());
            assert!(!result.is_valid, "{input:?} should be rejected");
            assert_eq!(result.message, INVALID_AMOUNT);
        }
    }

    #[test]
    fn test_amount_below_minimum() {
        let result = validate_amount("500", &recharge_policy());
        assert!(!result.is_valid);
        assert_eq!(result.message, "الحد الأدنى: 1000 دج");

        let result = validate_amount("999.99", &recharge_policy());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_amount_in_range_accepted() {
        let policy = recharge_policy().at_most(Money::from_units(5000));
        for input in ["1000", "2500.50", "5,000", "5000"] {
            let result = validate_amount(input, &policy);
            assert!(result.is_valid, "{input:?} should be accepted");
            assert!(result.message.is_empty());
        }
    }

    #[test]
    fn test_amount_above_balance() {
        let policy = recharge_policy().at_most(Money::from_units(3000));
        let result = validate_amount("3000.01", &policy);
        assert!(!result.is_valid);
        assert_eq!(result.message, INSUFFICIENT_BALANCE);
    }

    #[test]
    fn test_positive_policy_has_no_minimum() {
        assert!(validate_amount("0.01", &AmountPolicy::positive()).is_valid);
    }

    #[test]
    fn test_reference_rules() {
        let policy = rib_policy();

        let empty = validate_reference("   ", &policy);
        assert_eq!(empty.message, "يرجى إدخال رقم الحساب البنكي (RIB)");

        let short = validate_reference("123456789012345", &policy);
        assert_eq!(short.message, "رقم الحساب البنكي غير صحيح");

        assert!(validate_reference(" 0079999900272354667 ", &policy).is_valid);
    }

    #[test]
    fn test_required_and_choice() {
        assert!(!validate_required("  ", "required").is_valid);
        assert!(validate_required("x", "required").is_valid);

        let options = vec!["algeria".to_string(), "tunisia".to_string()];
        assert!(validate_choice("Algeria", &options, "pick").is_valid);
        assert_eq!(validate_choice("france", &options, "pick").message, "pick");
    }

    #[test]
    fn test_sanitize_cvv() {
        assert_eq!(sanitize_cvv("1a2b3c4"), "123");
        assert_eq!(sanitize_cvv("12"), "12");
        assert_eq!(sanitize_cvv("abc"), "");
    }

    #[test]
    fn test_plain_amount() {
        assert_eq!(plain_amount(Money::from_units(1000)), "1000");
        assert_eq!(plain_amount(Money::from_cents(100050)), "1000.50");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationResult::valid().into_result(), Ok(()));
        assert_eq!(
            ValidationResult::invalid("bad").into_result(),
            Err("bad".to_string())
        );
    }
}
