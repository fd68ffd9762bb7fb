use async_trait::async_trait;
use uuid::Uuid;

use super::question_form::CommitPayload;
use crate::errors::StorageError;
use crate::models::{Category, OptionRecord, PersistedQuestion, QuestionFilter};

/// Persistence collaborator of the question engine.
///
/// `commit` must apply the question write together with its option upserts
/// and deletes, or nothing at all.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn commit(&self, payload: CommitPayload) -> Result<PersistedQuestion, StorageError>;

    async fn find_question(&self, id: Uuid) -> Result<Option<PersistedQuestion>, StorageError>;

    /// Questions matching `filter`, most recently created first.
    async fn list_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StorageError>;

    async fn list_options(&self, question_id: Uuid) -> Result<Vec<OptionRecord>, StorageError>;

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StorageError>;

    /// Categories in creation order.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    async fn create_category(&self, name: &str) -> Result<Category, StorageError>;
}
