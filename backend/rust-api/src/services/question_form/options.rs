//! Validation of the option list attached to choice questions.

use std::collections::HashSet;

use crate::errors::{CorrectCount, ErrorSet, ErrorTarget, FormError, FormField};
use crate::models::option::{OptionDeletes, OptionDraft, OptionUpsert, MAX_OPTION_VALUE_LENGTH};
use crate::models::QuestionType;

pub const MIN_OPTIONS: usize = 2;

/// Option rows to write and remove for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSetOutcome {
    pub upserts: Vec<OptionUpsert>,
    pub deletes: OptionDeletes,
}

impl OptionSetOutcome {
    /// Drops every stored option of the question.
    pub fn clear_all() -> Self {
        Self {
            upserts: Vec::new(),
            deletes: OptionDeletes::All,
        }
    }
}

/// Checks a single row on its own, before any group-level rule.
pub fn row_error(row: &OptionDraft) -> Option<FormError> {
    let value = row.value.trim();
    if value.is_empty() {
        return Some(FormError::missing(FormField::OptionValue));
    }

    let length = value.chars().count();
    if length > MAX_OPTION_VALUE_LENGTH {
        return Some(FormError::invalid(
            FormField::OptionValue,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                MAX_OPTION_VALUE_LENGTH, length
            ),
        ));
    }

    None
}

/// Validates the submitted rows against the rules of `question_type`.
///
/// Scalar types skip validation entirely and clear the stored options. When
/// any retained row fails its own check only row errors are reported; the
/// group rules run once every row is individually valid.
pub fn validate_option_set(
    question_type: QuestionType,
    rows: &[OptionDraft],
) -> Result<OptionSetOutcome, ErrorSet> {
    if !question_type.requires_options() {
        return Ok(OptionSetOutcome::clear_all());
    }

    let mut errors = ErrorSet::new();
    let mut deleted = Vec::new();
    let mut candidates = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if row.marked_for_deletion {
            if let Some(id) = row.id {
                deleted.push(id);
            }
            continue;
        }

        match row_error(row) {
            Some(error) => errors.push(ErrorTarget::OptionRow { index }, error),
            None => candidates.push(row),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let valid_count = candidates.len();
    let distinct_count = candidates
        .iter()
        .map(|row| row.value.trim())
        .collect::<HashSet<_>>()
        .len();

    if valid_count < MIN_OPTIONS {
        errors.push(ErrorTarget::OptionGroup, FormError::InsufficientOptions);
        return Err(errors);
    }

    if distinct_count != valid_count {
        errors.push(ErrorTarget::OptionGroup, FormError::DuplicateOptions);
        return Err(errors);
    }

    let correct_count = candidates.iter().filter(|row| row.is_correct).count();
    let expected = match question_type {
        QuestionType::SingleChoice if correct_count != 1 => Some(CorrectCount::ExactlyOne),
        QuestionType::MultipleChoice if correct_count == 0 => Some(CorrectCount::AtLeastOne),
        _ => None,
    };
    if let Some(expected) = expected {
        errors.push(
            ErrorTarget::OptionGroup,
            FormError::WrongCorrectCount { expected },
        );
        return Err(errors);
    }

    let upserts = candidates
        .into_iter()
        .map(|row| OptionUpsert {
            id: row.id,
            value: row.value.trim().to_string(),
            is_correct: row.is_correct,
        })
        .collect();

    Ok(OptionSetOutcome {
        upserts,
        deletes: OptionDeletes::Rows(deleted),
    })
}
