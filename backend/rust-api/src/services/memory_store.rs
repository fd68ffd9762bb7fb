use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::question_form::CommitPayload;
use super::store::QuestionStore;
use crate::errors::StorageError;
use crate::models::question::{
    MAX_CORRECT_ANSWER_LENGTH, MAX_POINTS, MIN_ATTEMPTS_TO_SOLVE, MIN_POINTS,
};
use crate::models::{
    Category, OptionDeletes, OptionRecord, PersistedQuestion, QuestionFilter, QuestionWrite,
};

#[derive(Debug, Clone, Default)]
struct StoreState {
    categories: Vec<Category>,
    questions: Vec<PersistedQuestion>,
    options: Vec<OptionRecord>,
}

/// In-process store with transactional commits.
///
/// A commit is applied to a copy of the state which replaces the live state
/// only after every write and constraint check succeeded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given category names.
    pub fn with_categories<I, S>(names: I) -> Result<Self, StorageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = StoreState::default();
        for name in names {
            insert_category(&mut state, name.as_ref())?;
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn commit(&self, payload: CommitPayload) -> Result<PersistedQuestion, StorageError> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let question = apply_commit(&mut next, payload)?;
        *state = next;

        tracing::debug!(
            "Committed question {} ({})",
            question.id,
            question.question_type
        );
        Ok(question)
    }

    async fn find_question(&self, id: Uuid) -> Result<Option<PersistedQuestion>, StorageError> {
        let state = self.state.read().await;
        Ok(state.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StorageError> {
        let state = self.state.read().await;
        let questions = state
            .questions
            .iter()
            .rev()
            .filter(|q| filter.matches(q))
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(questions)
    }

    async fn list_options(&self, question_id: Uuid) -> Result<Vec<OptionRecord>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .options
            .iter()
            .filter(|o| o.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StorageError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let state = self.state.read().await;
        Ok(state.categories.clone())
    }

    async fn create_category(&self, name: &str) -> Result<Category, StorageError> {
        let mut state = self.state.write().await;
        insert_category(&mut state, name)
    }
}

fn insert_category(state: &mut StoreState, name: &str) -> Result<Category, StorageError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StorageError::CheckViolation(
            "category name must not be blank".to_string(),
        ));
    }
    if state.categories.iter().any(|c| c.name == name) {
        return Err(StorageError::UniqueViolation(format!(
            "category name '{}' already exists",
            name
        )));
    }

    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created: now,
        changed: now,
    };
    state.categories.push(category.clone());
    Ok(category)
}

fn check_constraints(question: &QuestionWrite) -> Result<(), StorageError> {
    if !(MIN_POINTS..=MAX_POINTS).contains(&question.number_of_points) {
        return Err(StorageError::CheckViolation(
            "Number of Points is an integer value between 1 and 10".to_string(),
        ));
    }

    if question
        .max_attempts_to_solve
        .is_some_and(|attempts| attempts < MIN_ATTEMPTS_TO_SOLVE)
    {
        return Err(StorageError::CheckViolation(
            "Max Attempts To Solve is a positive integer value".to_string(),
        ));
    }

    if question.correct_answer.is_some() == question.question_type.requires_options() {
        return Err(StorageError::CheckViolation(format!(
            "correct answer must be set exactly for scalar question types (got {} for {})",
            if question.correct_answer.is_some() {
                "a value"
            } else {
                "none"
            },
            question.question_type
        )));
    }

    if question
        .correct_answer
        .as_ref()
        .is_some_and(|answer| answer.chars().count() > MAX_CORRECT_ANSWER_LENGTH)
    {
        return Err(StorageError::CheckViolation(
            "correct answer exceeds 255 characters".to_string(),
        ));
    }

    Ok(())
}

fn apply_commit(
    state: &mut StoreState,
    payload: CommitPayload,
) -> Result<PersistedQuestion, StorageError> {
    let CommitPayload {
        question,
        option_upserts,
        option_deletes,
    } = payload;

    if !state.categories.iter().any(|c| c.id == question.category_id) {
        return Err(StorageError::InvalidReference {
            category_id: question.category_id,
        });
    }
    check_constraints(&question)?;

    let now = Utc::now();
    let persisted = match question.id {
        Some(id) => {
            let existing = state
                .questions
                .iter_mut()
                .find(|q| q.id == id)
                .ok_or(StorageError::QuestionNotFound(id))?;
            existing.category_id = question.category_id;
            existing.text = question.text;
            existing.question_type = question.question_type;
            existing.complexity = question.complexity;
            existing.number_of_points = question.number_of_points;
            existing.max_attempts_to_solve = question.max_attempts_to_solve;
            existing.correct_answer = question.correct_answer;
            existing.solution = question.solution;
            existing.changed = now;
            existing.clone()
        }
        None => {
            let created = PersistedQuestion {
                id: Uuid::new_v4(),
                category_id: question.category_id,
                text: question.text,
                question_type: question.question_type,
                complexity: question.complexity,
                number_of_points: question.number_of_points,
                max_attempts_to_solve: question.max_attempts_to_solve,
                correct_answer: question.correct_answer,
                solution: question.solution,
                created: now,
                changed: now,
            };
            state.questions.push(created.clone());
            created
        }
    };
    let question_id = persisted.id;

    match option_deletes {
        OptionDeletes::All => state.options.retain(|o| o.question_id != question_id),
        OptionDeletes::Rows(ids) => {
            for option_id in ids {
                let position = state
                    .options
                    .iter()
                    .position(|o| o.id == option_id && o.question_id == question_id)
                    .ok_or(StorageError::OptionNotFound {
                        question_id,
                        option_id,
                    })?;
                state.options.remove(position);
            }
        }
    }

    for upsert in option_upserts {
        match upsert.id {
            Some(option_id) => {
                let option = state
                    .options
                    .iter_mut()
                    .find(|o| o.id == option_id && o.question_id == question_id)
                    .ok_or(StorageError::OptionNotFound {
                        question_id,
                        option_id,
                    })?;
                option.value = upsert.value;
                option.is_correct = upsert.is_correct;
                option.changed = now;
            }
            None => state.options.push(OptionRecord {
                id: Uuid::new_v4(),
                question_id,
                value: upsert.value,
                is_correct: upsert.is_correct,
                created: now,
                changed: now,
            }),
        }
    }

    let mut seen = HashSet::new();
    for option in state.options.iter().filter(|o| o.question_id == question_id) {
        if !seen.insert(option.value.as_str()) {
            return Err(StorageError::UniqueViolation(format!(
                "question {} already has option '{}'",
                question_id, option.value
            )));
        }
    }

    Ok(persisted)
}
