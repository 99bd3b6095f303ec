//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

/// Builds an external reference code such as `TRX-3F9A0C1B2D`.
///
/// The code is shown to users and auditors instead of the internal sequence
/// id, so it carries no ordering information.
pub(crate) fn reference_code(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", hex[..10].to_uppercase())
}

/// Trim a required text field and enforce a maximum length in characters.
pub(crate) fn normalize_required_text(
    value: &str,
    label: &str,
    max_chars: usize,
) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    if trimmed.chars().count() > max_chars {
        return Err(EngineError::Validation(format!(
            "{label} must be at most {max_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Expected obligation amounts must be strictly positive.
pub(crate) fn ensure_positive(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::Validation(format!("{label} must be > 0")));
    }
    Ok(())
}

/// Paid amounts may be zero (a waived debt) but never negative.
pub(crate) fn ensure_non_negative(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::Validation(format!("{label} must be >= 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_code_has_prefix_and_ten_hex_chars() {
        let code = reference_code("ACC");
        let (prefix, hex) = code.split_once('-').unwrap();
        assert_eq!(prefix, "ACC");
        assert_eq!(hex.len(), 10);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn required_text_is_trimmed_and_bounded() {
        assert_eq!(
            normalize_required_text("  Rent ", "title", 10).unwrap(),
            "Rent"
        );
        assert!(matches!(
            normalize_required_text("   ", "title", 10),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            normalize_required_text("abcdefghijk", "title", 10),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn amount_guards() {
        assert!(ensure_positive(MoneyCents::new(1), "amount").is_ok());
        assert!(ensure_positive(MoneyCents::ZERO, "amount").is_err());
        assert!(ensure_non_negative(MoneyCents::ZERO, "paid").is_ok());
        assert!(ensure_non_negative(MoneyCents::new(-1), "paid").is_err());
    }
}
