mod common;

use common::{base_draft, choice_draft, integer_draft};
use quizbank_api::errors::{CorrectCount, ErrorTarget, FormError, FormField};
use quizbank_api::models::{OptionDeletes, QuestionType};
use quizbank_api::services::question_form::{
    prefill, validate_and_build_payload, CandidateFieldView,
};
use uuid::Uuid;

fn category() -> Option<Uuid> {
    Some(Uuid::new_v4())
}

/// Draft of the given type with every candidate field and a valid option list filled in.
fn fully_populated(question_type: QuestionType) -> quizbank_api::models::QuestionDraft {
    let mut draft = choice_draft(
        category(),
        question_type,
        &[("3", false), ("4", true), ("5", false)],
    );
    draft.integer_answer = Some("4".to_string());
    draft.decimal_answer = Some("4.0".to_string());
    draft.boolean_answer = Some("Yes".to_string());
    draft.text_answer = Some("four".to_string());
    draft
}

#[test]
fn test_empty_integer_answer() {
    let draft = integer_draft(category(), "");

    let errors = validate_and_build_payload(&draft).unwrap_err();
    assert_eq!(
        errors.get(&ErrorTarget::Field(FormField::IntegerAnswer)),
        &[FormError::missing(FormField::IntegerAnswer)]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_invalid_boolean_answer() {
    let mut draft = base_draft(category(), QuestionType::Boolean);
    draft.boolean_answer = Some("Maybe".to_string());

    let errors = validate_and_build_payload(&draft).unwrap_err();
    assert!(matches!(
        errors.get(&ErrorTarget::Field(FormField::BooleanAnswer)),
        [FormError::InvalidFieldValue {
            field: FormField::BooleanAnswer,
            ..
        }]
    ));
}

#[test]
fn test_single_choice_success() {
    let draft = choice_draft(
        category(),
        QuestionType::SingleChoice,
        &[("3", false), ("4", true), ("5", false)],
    );

    let payload = validate_and_build_payload(&draft).unwrap();
    assert_eq!(payload.question.correct_answer, None);
    assert_eq!(payload.option_upserts.len(), 3);
    assert_eq!(
        payload
            .option_upserts
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>(),
        vec!["4"]
    );
}

#[test]
fn test_duplicate_options() {
    let draft = choice_draft(
        category(),
        QuestionType::SingleChoice,
        &[("5", false), ("5", false)],
    );

    let errors = validate_and_build_payload(&draft).unwrap_err();
    assert_eq!(
        errors.get(&ErrorTarget::OptionGroup),
        &[FormError::DuplicateOptions]
    );
}

#[test]
fn test_multiple_choice_without_correct_option() {
    let draft = choice_draft(
        category(),
        QuestionType::MultipleChoice,
        &[("2+2=4", false), ("3*3=9", false)],
    );

    let errors = validate_and_build_payload(&draft).unwrap_err();
    assert_eq!(
        errors.get(&ErrorTarget::OptionGroup),
        &[FormError::WrongCorrectCount {
            expected: CorrectCount::AtLeastOne
        }]
    );
}

#[test]
fn test_exactly_one_branch_is_meaningful_for_every_type() {
    for question_type in QuestionType::ALL {
        let payload = validate_and_build_payload(&fully_populated(question_type)).unwrap();

        if question_type.requires_options() {
            assert_eq!(payload.question.correct_answer, None);
            assert_eq!(payload.option_upserts.len(), 3);
            assert_eq!(payload.option_deletes, OptionDeletes::none());
        } else {
            assert!(payload.question.correct_answer.is_some());
            assert!(payload.option_upserts.is_empty());
            assert_eq!(payload.option_deletes, OptionDeletes::All);
        }
    }
}

#[test]
fn test_scalar_answers_resolve_from_their_own_field() {
    let expected = [
        (QuestionType::Integer, "4"),
        (QuestionType::Decimal, "4.0"),
        (QuestionType::Boolean, "Yes"),
        (QuestionType::Text, "four"),
    ];

    for (question_type, answer) in expected {
        let payload = validate_and_build_payload(&fully_populated(question_type)).unwrap();
        assert_eq!(payload.question.correct_answer.as_deref(), Some(answer));
    }
}

#[test]
fn test_invalid_options_are_ignored_for_scalar_types() {
    let mut draft = integer_draft(category(), "4");
    draft.options = choice_draft(None, QuestionType::SingleChoice, &[("", true), ("", true)])
        .options;

    let payload = validate_and_build_payload(&draft).unwrap();
    assert_eq!(payload.option_deletes, OptionDeletes::All);
}

#[test]
fn test_invalid_candidates_are_ignored_for_choice_types() {
    let mut draft = choice_draft(
        category(),
        QuestionType::MultipleChoice,
        &[("2+2=4", true), ("3*3=9", true)],
    );
    draft.integer_answer = Some("not a number".to_string());
    draft.boolean_answer = Some("Maybe".to_string());

    assert!(validate_and_build_payload(&draft).is_ok());
}

#[test]
fn test_revalidation_is_idempotent() {
    let accepted = fully_populated(QuestionType::SingleChoice);
    assert_eq!(
        validate_and_build_payload(&accepted),
        validate_and_build_payload(&accepted)
    );

    let mut rejected = integer_draft(None, "four");
    rejected.number_of_points = Some(42);
    rejected.max_attempts_to_solve = Some(0);
    let first = validate_and_build_payload(&rejected);
    let second = validate_and_build_payload(&rejected);
    assert!(first.is_err());
    assert_eq!(first, second);
}

#[test]
fn test_errors_are_reported_together() {
    let mut draft = choice_draft(None, QuestionType::SingleChoice, &[("4", true)]);
    draft.number_of_points = Some(0);

    let errors = validate_and_build_payload(&draft).unwrap_err();
    let targets: Vec<String> = errors.targets().map(|t| t.to_string()).collect();
    assert_eq!(targets, vec!["category", "number_of_points", "options"]);
}

#[test]
fn test_prefill_matches_resolved_answer() {
    for question_type in QuestionType::ALL {
        let draft = fully_populated(question_type);
        let payload = validate_and_build_payload(&draft).unwrap();
        let now = chrono::Utc::now();
        let record = quizbank_api::models::PersistedQuestion {
            id: Uuid::new_v4(),
            category_id: payload.question.category_id,
            text: payload.question.text.clone(),
            question_type,
            complexity: payload.question.complexity,
            number_of_points: payload.question.number_of_points,
            max_attempts_to_solve: None,
            correct_answer: payload.question.correct_answer.clone(),
            solution: None,
            created: now,
            changed: now,
        };

        let view = prefill(&record);
        match question_type.candidate_field() {
            Some(field) => {
                assert_eq!(view.get(field), payload.question.correct_answer.as_deref());
                assert_eq!(view.populated(), vec![field]);
            }
            None => assert_eq!(view, CandidateFieldView::default()),
        }
    }
}
