//! Resolution of the single stored correct answer for scalar question types.
//!
//! Only the candidate field matching the question type is inspected. The
//! other three are inert whatever they contain, so switching a question from
//! Integer to Text never trips over a stale integer value left in the form.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::catalog::{CandidateField, CandidateFieldView};
use crate::errors::FormError;
use crate::models::question::{QuestionType, MAX_CORRECT_ANSWER_LENGTH};

pub const BOOLEAN_ANSWERS: [&str; 2] = ["Yes", "No"];

/// Validates the active candidate field and returns the value to persist.
///
/// Choice questions resolve to `None` without looking at any candidate.
pub fn resolve_correct_answer(
    question_type: QuestionType,
    candidates: &CandidateFieldView,
) -> Result<Option<String>, FormError> {
    let Some(candidate) = question_type.candidate_field() else {
        return Ok(None);
    };

    let field = candidate.form_field();
    let Some(raw) = candidates.filled(candidate) else {
        return Err(FormError::missing(field));
    };

    let resolved = match candidate {
        CandidateField::Integer => parse_integer(raw)
            .map(|value| value.to_string())
            .ok_or_else(|| FormError::invalid(field, "Enter a whole number."))?,
        CandidateField::Decimal => Decimal::from_str(raw.trim())
            .map(|value| value.to_string())
            .map_err(|_| FormError::invalid(field, "Enter a number."))?,
        CandidateField::Boolean => {
            if !BOOLEAN_ANSWERS.contains(&raw) {
                return Err(FormError::invalid(field, "Value of the field is invalid."));
            }
            raw.to_string()
        }
        CandidateField::Text => raw.trim().to_string(),
    };

    let length = resolved.chars().count();
    if length > MAX_CORRECT_ANSWER_LENGTH {
        return Err(FormError::invalid(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                MAX_CORRECT_ANSWER_LENGTH, length
            ),
        ));
    }

    Ok(Some(resolved))
}

/// Whole number parsing that tolerates a zero fraction (`"4.0"`) and signs.
fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = match trimmed.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return None,
        None => trimmed,
    };
    digits.parse::<i64>().ok()
}
