use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::question_form::{self, CandidateFieldView};
use super::store::QuestionStore;
use crate::errors::{CommitError, StorageError};
use crate::metrics::{
    record_submission_accepted, record_submission_rejected, track_store_operation,
};
use crate::models::{
    Category, CreateCategoryRequest, OptionDeletes, OptionRecord, PersistedQuestion,
    QuestionDraft, QuestionFilter,
};

/// Stored question together with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionWithOptions {
    pub question: PersistedQuestion,
    pub options: Vec<OptionRecord>,
}

/// Data needed to render the edit form of an existing question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditForm {
    pub question: PersistedQuestion,
    pub candidates: CandidateFieldView,
    /// Submission that reproduces the stored state when sent back unchanged.
    pub draft: QuestionDraft,
}

pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
    max_page_size: usize,
}

impl QuestionService {
    pub fn new(store: Arc<dyn QuestionStore>, max_page_size: usize) -> Self {
        Self {
            store,
            max_page_size,
        }
    }

    /// Validates `draft` and, when it is accepted, commits it in one transaction.
    ///
    /// Storage failures are returned as they are; nothing is retried.
    pub async fn save_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<PersistedQuestion, CommitError> {
        let payload = match question_form::validate_and_build_payload(&draft) {
            Ok(payload) => payload,
            Err(errors) => {
                record_submission_rejected(&errors);
                tracing::info!(
                    "Question form rejected: question={:?}, errors={}",
                    draft.id,
                    errors.len()
                );
                tracing::debug!("Question form errors: {}", errors);
                return Err(CommitError::Rejected(errors));
            }
        };
        record_submission_accepted();

        if payload.option_deletes == OptionDeletes::All {
            if let Some(id) = payload.question.id {
                tracing::debug!(
                    "Question {} saved as {}, clearing its options",
                    id,
                    payload.question.question_type
                );
            }
        }

        let question = track_store_operation("commit", self.store.commit(payload))
            .await
            .map_err(|e| {
                tracing::error!("Failed to commit question {:?}: {}", draft.id, e);
                CommitError::Storage(e)
            })?;

        tracing::info!(
            "Question saved: id={}, type={}, created={}",
            question.id,
            question.question_type,
            draft.id.is_none()
        );

        Ok(question)
    }

    pub async fn get_question(
        &self,
        id: Uuid,
    ) -> Result<Option<QuestionWithOptions>, StorageError> {
        let Some(question) =
            track_store_operation("find_question", self.store.find_question(id)).await?
        else {
            return Ok(None);
        };
        let options = track_store_operation("list_options", self.store.list_options(id)).await?;

        Ok(Some(QuestionWithOptions { question, options }))
    }

    /// Prefilled edit form for an existing question.
    pub async fn edit_form(&self, id: Uuid) -> Result<Option<EditForm>, StorageError> {
        let Some(QuestionWithOptions { question, options }) = self.get_question(id).await? else {
            return Ok(None);
        };

        Ok(Some(EditForm {
            candidates: question_form::prefill(&question),
            draft: question_form::draft_from_record(&question, &options),
            question,
        }))
    }

    /// Lists questions newest first, never more than the configured page size.
    pub async fn list_questions(
        &self,
        mut filter: QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StorageError> {
        let limit = filter
            .limit
            .unwrap_or(self.max_page_size)
            .min(self.max_page_size);
        filter.limit = Some(limit);

        track_store_operation("list_questions", self.store.list_questions(&filter)).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        track_store_operation("list_categories", self.store.list_categories()).await
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StorageError> {
        track_store_operation("find_category", self.store.find_category(id)).await
    }

    pub async fn create_category(&self, req: CreateCategoryRequest) -> Result<Category> {
        req.validate()
            .map_err(|e| anyhow!("Validation error: {}", e))?;

        let category =
            track_store_operation("create_category", self.store.create_category(&req.name))
                .await
                .context("Failed to create category")?;
        tracing::info!("Category created: id={}, name={}", category.id, category.name);
        Ok(category)
    }
}
