#![allow(dead_code)]

use quizbank_api::models::{Complexity, OptionDraft, QuestionDraft, QuestionType};
use quizbank_api::services::{MemoryStore, QuestionService};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Elementary Algebra",
    "Elementary Geometry",
    "Linear Algebra",
    "Calculus",
    "Probability Theory",
];

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Service over a fresh store seeded with the default categories.
pub async fn create_test_service() -> (QuestionService, Uuid) {
    init_tracing();

    let store = MemoryStore::with_categories(DEFAULT_CATEGORIES)
        .expect("Failed to seed test categories");
    let service = QuestionService::new(Arc::new(store), 50);
    let category_id = service
        .list_categories()
        .await
        .expect("Failed to list categories")[0]
        .id;

    (service, category_id)
}

pub fn base_draft(category_id: Option<Uuid>, question_type: QuestionType) -> QuestionDraft {
    QuestionDraft {
        category_id,
        text: Some("2+2=?".to_string()),
        question_type: Some(question_type),
        complexity: Some(Complexity::Easy),
        number_of_points: Some(1),
        ..Default::default()
    }
}

pub fn integer_draft(category_id: Option<Uuid>, answer: &str) -> QuestionDraft {
    QuestionDraft {
        integer_answer: Some(answer.to_string()),
        ..base_draft(category_id, QuestionType::Integer)
    }
}

pub fn choice_draft(
    category_id: Option<Uuid>,
    question_type: QuestionType,
    options: &[(&str, bool)],
) -> QuestionDraft {
    QuestionDraft {
        options: options
            .iter()
            .map(|(value, correct)| OptionDraft::new(*value, *correct))
            .collect(),
        ..base_draft(category_id, question_type)
    }
}
