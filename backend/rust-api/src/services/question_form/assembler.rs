use serde::Serialize;
use validator::Validate;

use super::answer::resolve_correct_answer;
use super::catalog::{required_fields, CandidateField, CandidateFieldView, METADATA_REQUIRED};
use super::options::validate_option_set;
use crate::errors::{ErrorSet, FormError, FormField, RangeBound};
use crate::models::question::{MAX_POINTS, MAX_TEXT_LENGTH, MIN_ATTEMPTS_TO_SOLVE, MIN_POINTS};
use crate::models::{OptionDeletes, OptionUpsert, QuestionDraft, QuestionWrite};

/// Everything the persistence layer needs to apply one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitPayload {
    pub question: QuestionWrite,
    pub option_upserts: Vec<OptionUpsert>,
    pub option_deletes: OptionDeletes,
}

/// Validates a submitted question form and collapses it into a commit payload.
///
/// Errors are accumulated across metadata, the correct answer and the option
/// list. The draft is never modified, so repeated calls on the same draft
/// return the same result.
pub fn validate_and_build_payload(draft: &QuestionDraft) -> Result<CommitPayload, ErrorSet> {
    let mut errors = metadata_errors(draft);
    let candidates = CandidateFieldView::from_draft(draft);

    let required = draft
        .question_type
        .map_or_else(|| METADATA_REQUIRED.to_vec(), required_fields);
    for &field in &required {
        if !is_present(draft, &candidates, field) {
            errors.push_field(FormError::missing(field));
        }
    }

    // Without a type there is nothing to resolve the answer or options against.
    let resolved = draft.question_type.map(|question_type| {
        // A missing answer field was reported with the rest of the required set.
        let correct_answer = match question_type.candidate_field() {
            Some(candidate) if candidates.filled(candidate).is_none() => None,
            _ => resolve_correct_answer(question_type, &candidates)
                .map_err(|error| errors.push_field(error))
                .ok(),
        };
        let options = validate_option_set(question_type, &draft.options)
            .map_err(|option_errors| errors.extend(option_errors))
            .ok();
        (question_type, correct_answer, options)
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    let (
        Some(category_id),
        Some(text),
        Some(complexity),
        Some(number_of_points),
        Some((question_type, Some(correct_answer), Some(options))),
    ) = (
        draft.category_id,
        non_blank(draft.text.as_deref()),
        draft.complexity,
        draft.number_of_points,
        resolved,
    )
    else {
        return Err(errors);
    };

    Ok(CommitPayload {
        question: QuestionWrite {
            id: draft.id,
            category_id,
            text,
            question_type,
            complexity,
            number_of_points,
            max_attempts_to_solve: draft.max_attempts_to_solve,
            correct_answer,
            solution: non_blank(draft.solution.as_deref()),
        },
        option_upserts: options.upserts,
        option_deletes: options.deletes,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_present(draft: &QuestionDraft, candidates: &CandidateFieldView, field: FormField) -> bool {
    match field {
        FormField::Category => draft.category_id.is_some(),
        FormField::Text => non_blank(draft.text.as_deref()).is_some(),
        FormField::Type => draft.question_type.is_some(),
        FormField::Complexity => draft.complexity.is_some(),
        FormField::NumberOfPoints => draft.number_of_points.is_some(),
        FormField::MaxAttemptsToSolve => draft.max_attempts_to_solve.is_some(),
        FormField::Solution => non_blank(draft.solution.as_deref()).is_some(),
        FormField::IntegerAnswer
        | FormField::DecimalAnswer
        | FormField::BooleanAnswer
        | FormField::TextAnswer => CandidateField::for_form_field(field)
            .is_some_and(|candidate| candidates.filled(candidate).is_some()),
        FormField::OptionValue => true,
    }
}

/// Type-independent rules declared on `QuestionDraft`, mapped onto form errors.
fn metadata_errors(draft: &QuestionDraft) -> ErrorSet {
    let mut errors = ErrorSet::new();
    let Err(report) = draft.validate() else {
        return errors;
    };

    for (name, failures) in report.field_errors() {
        let Some(field) = FormField::from_draft_field(&name) else {
            tracing::warn!("Unmapped validation error on field {}", name);
            continue;
        };
        for failure in failures {
            let error = match failure.code.as_ref() {
                "range" => range_violation(field, draft),
                _ => FormError::invalid(
                    field,
                    failure
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                ),
            };
            errors.push_field(error);
        }
    }

    if let Some(text) = non_blank(draft.text.as_deref()) {
        let length = text.chars().count();
        if length > MAX_TEXT_LENGTH {
            errors.push_field(FormError::invalid(
                FormField::Text,
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    MAX_TEXT_LENGTH, length
                ),
            ));
        }
    }

    errors
}

fn range_violation(field: FormField, draft: &QuestionDraft) -> FormError {
    let bound = match field {
        FormField::NumberOfPoints => match draft.number_of_points {
            Some(points) if points > MAX_POINTS => RangeBound::AtMost(MAX_POINTS.into()),
            _ => RangeBound::AtLeast(MIN_POINTS.into()),
        },
        _ => RangeBound::AtLeast(MIN_ATTEMPTS_TO_SOLVE.into()),
    };
    FormError::NumericRangeViolation { field, bound }
}
