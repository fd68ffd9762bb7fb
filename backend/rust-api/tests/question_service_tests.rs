mod common;

use common::{choice_draft, create_test_service, integer_draft};
use quizbank_api::errors::{CommitError, FormError, FormField, StorageError};
use quizbank_api::models::{
    Complexity, CreateCategoryRequest, OptionDraft, QuestionFilter, QuestionType,
};
use uuid::Uuid;

#[tokio::test]
async fn test_save_integer_question() {
    let (service, category_id) = create_test_service().await;

    let question = service
        .save_question(integer_draft(Some(category_id), " 4 "))
        .await
        .unwrap();

    assert_eq!(question.question_type, QuestionType::Integer);
    assert_eq!(question.correct_answer.as_deref(), Some("4"));
    assert_eq!(question.category_id, category_id);

    let stored = service.get_question(question.id).await.unwrap().unwrap();
    assert_eq!(stored.question, question);
    assert!(stored.options.is_empty());
}

#[tokio::test]
async fn test_save_single_choice_question_with_options() {
    let (service, category_id) = create_test_service().await;

    let question = service
        .save_question(choice_draft(
            Some(category_id),
            QuestionType::SingleChoice,
            &[("3", false), ("4", true), ("5", false)],
        ))
        .await
        .unwrap();

    assert_eq!(question.correct_answer, None);
    let stored = service.get_question(question.id).await.unwrap().unwrap();
    assert_eq!(stored.options.len(), 3);
    assert_eq!(
        stored
            .options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>(),
        vec!["4"]
    );
}

#[tokio::test]
async fn test_rejected_form_is_not_committed() {
    let (service, category_id) = create_test_service().await;

    let result = service
        .save_question(integer_draft(Some(category_id), ""))
        .await;

    match result {
        Err(CommitError::Rejected(errors)) => {
            assert!(errors.contains(&FormError::missing(FormField::IntegerAnswer)))
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    let listed = service
        .list_questions(QuestionFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_switch_from_choice_to_integer_clears_options() {
    let (service, category_id) = create_test_service().await;
    let original = service
        .save_question(choice_draft(
            Some(category_id),
            QuestionType::SingleChoice,
            &[("3", false), ("4", true), ("5", false)],
        ))
        .await
        .unwrap();

    let form = service.edit_form(original.id).await.unwrap().unwrap();
    assert_eq!(form.draft.options.len(), 3);

    let mut draft = form.draft;
    draft.question_type = Some(QuestionType::Integer);
    draft.integer_answer = Some("4".to_string());
    let updated = service.save_question(draft).await.unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.correct_answer.as_deref(), Some("4"));
    let stored = service.get_question(original.id).await.unwrap().unwrap();
    assert!(stored.options.is_empty());
}

#[tokio::test]
async fn test_clearing_also_removes_options_missing_from_the_form() {
    let (service, category_id) = create_test_service().await;
    let original = service
        .save_question(choice_draft(
            Some(category_id),
            QuestionType::MultipleChoice,
            &[("2+2=4", true), ("3*3=9", true)],
        ))
        .await
        .unwrap();

    let mut draft = service.edit_form(original.id).await.unwrap().unwrap().draft;
    draft.options.clear();
    draft.question_type = Some(QuestionType::Text);
    draft.text_answer = Some("Logarithm".to_string());
    service.save_question(draft).await.unwrap();

    let stored = service.get_question(original.id).await.unwrap().unwrap();
    assert!(stored.options.is_empty());
}

#[tokio::test]
async fn test_unchanged_edit_form_resubmits_same_state() {
    let (service, category_id) = create_test_service().await;
    let mut draft = integer_draft(Some(category_id), "4");
    draft.question_type = Some(QuestionType::Decimal);
    draft.decimal_answer = Some("4.50".to_string());
    draft.max_attempts_to_solve = Some(3);
    draft.solution = Some("Divide".to_string());
    let original = service.save_question(draft).await.unwrap();

    let form = service.edit_form(original.id).await.unwrap().unwrap();
    assert_eq!(form.candidates.decimal_answer.as_deref(), Some("4.50"));
    assert_eq!(form.candidates.integer_answer, None);

    let resaved = service.save_question(form.draft).await.unwrap();
    assert_eq!(resaved.correct_answer, original.correct_answer);
    assert_eq!(resaved.max_attempts_to_solve, Some(3));
    assert_eq!(resaved.solution.as_deref(), Some("Divide"));
    assert_eq!(resaved.created, original.created);
}

#[tokio::test]
async fn test_edit_options_updates_inserts_and_deletes() {
    let (service, category_id) = create_test_service().await;
    let original = service
        .save_question(choice_draft(
            Some(category_id),
            QuestionType::SingleChoice,
            &[("3", false), ("4", true), ("5", false)],
        ))
        .await
        .unwrap();

    let mut draft = service.edit_form(original.id).await.unwrap().unwrap().draft;
    let removed = draft.options[0].id;
    draft.options[0].marked_for_deletion = true;
    draft.options[2].value = "6".to_string();
    draft.options.push(OptionDraft::new("7", false));
    service.save_question(draft).await.unwrap();

    let stored = service.get_question(original.id).await.unwrap().unwrap();
    let values: Vec<_> = stored.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["4", "6", "7"]);
    assert!(stored.options.iter().all(|o| Some(o.id) != removed));
}

#[tokio::test]
async fn test_storage_conflict_rolls_back_whole_submission() {
    let (service, category_id) = create_test_service().await;
    let original = service
        .save_question(choice_draft(
            Some(category_id),
            QuestionType::SingleChoice,
            &[("3", false), ("4", true)],
        ))
        .await
        .unwrap();

    // Rename "3" to "4" while the stored "4" row is left out of the form.
    let mut draft = service.edit_form(original.id).await.unwrap().unwrap().draft;
    draft.text = Some("Changed text".to_string());
    draft.options[0].value = "4".to_string();
    draft.options[0].is_correct = true;
    draft.options.remove(1);
    draft.options.push(OptionDraft::new("9", false));

    let result = service.save_question(draft).await;
    assert!(matches!(
        result,
        Err(CommitError::Storage(StorageError::UniqueViolation(_)))
    ));

    let stored = service.get_question(original.id).await.unwrap().unwrap();
    assert_eq!(stored.question.text, "2+2=?");
    let values: Vec<_> = stored.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["3", "4"]);
}

#[tokio::test]
async fn test_unknown_category_surfaces_at_commit() {
    let (service, _) = create_test_service().await;
    let missing = Uuid::new_v4();

    let result = service
        .save_question(integer_draft(Some(missing), "4"))
        .await;

    assert!(matches!(
        result,
        Err(CommitError::Storage(StorageError::InvalidReference { category_id })) if category_id == missing
    ));
}

#[tokio::test]
async fn test_editing_unknown_question_fails() {
    let (service, category_id) = create_test_service().await;
    let mut draft = integer_draft(Some(category_id), "4");
    draft.id = Some(Uuid::new_v4());

    let result = service.save_question(draft).await;
    assert!(matches!(
        result,
        Err(CommitError::Storage(StorageError::QuestionNotFound(_)))
    ));
}

#[tokio::test]
async fn test_list_questions_filters_and_caps_page() {
    let (service, category_id) = create_test_service().await;
    for answer in ["1", "2", "3"] {
        service
            .save_question(integer_draft(Some(category_id), answer))
            .await
            .unwrap();
    }
    let mut hard = choice_draft(
        Some(category_id),
        QuestionType::MultipleChoice,
        &[("a", true), ("b", false)],
    );
    hard.complexity = Some(Complexity::Hard);
    service.save_question(hard).await.unwrap();

    let all = service
        .list_questions(QuestionFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].question_type, QuestionType::MultipleChoice);

    let integers = service
        .list_questions(QuestionFilter {
            question_type: Some(QuestionType::Integer),
            limit: Some(1000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(integers.len(), 3);
    assert_eq!(integers[0].correct_answer.as_deref(), Some("3"));

    let page = service
        .list_questions(QuestionFilter {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].correct_answer.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_categories() {
    let (service, category_id) = create_test_service().await;

    let categories = service.list_categories().await.unwrap();
    assert_eq!(categories.len(), common::DEFAULT_CATEGORIES.len());
    assert_eq!(categories[0].name, "Elementary Algebra");

    let found = service.get_category(category_id).await.unwrap();
    assert_eq!(found.map(|c| c.name), Some("Elementary Algebra".to_string()));

    let created = service
        .create_category(CreateCategoryRequest {
            name: "Number Theory".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Number Theory");

    let duplicate = service
        .create_category(CreateCategoryRequest {
            name: "Calculus".to_string(),
        })
        .await;
    assert!(duplicate.is_err());

    let empty = service
        .create_category(CreateCategoryRequest {
            name: String::new(),
        })
        .await;
    assert!(empty.is_err());
}

#[tokio::test]
async fn test_app_state_seeds_configured_categories() {
    let config = quizbank_api::Config {
        default_categories: vec!["Calculus".to_string(), "Set Theory".to_string()],
        ..Default::default()
    };
    let state = quizbank_api::AppState::new(config).unwrap();

    let service = state.question_service();
    let names: Vec<_> = service
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Calculus", "Set Theory"]);

    let duplicated = quizbank_api::Config {
        default_categories: vec!["Calculus".to_string(), "Calculus".to_string()],
        ..Default::default()
    };
    assert!(quizbank_api::AppState::new(duplicated).is_err());
}
