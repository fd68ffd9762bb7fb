use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_OPTION_VALUE_LENGTH: usize = 2048;

/// One row of the option list submitted with a choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDraft {
    /// Existing option row, `None` for rows added in this submission.
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default, rename = "delete")]
    pub marked_for_deletion: bool,
}

impl OptionDraft {
    pub fn new(value: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: None,
            value: value.into(),
            is_correct,
            marked_for_deletion: false,
        }
    }

    pub fn existing(id: Uuid, value: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: Some(id),
            ..Self::new(value, is_correct)
        }
    }

    pub fn deleted(mut self) -> Self {
        self.marked_for_deletion = true;
        self
    }
}

/// Validated option row to insert (`id == None`) or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionUpsert {
    pub id: Option<Uuid>,
    pub value: String,
    pub is_correct: bool,
}

/// Which stored options a commit removes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "ids", rename_all = "snake_case")]
pub enum OptionDeletes {
    Rows(Vec<Uuid>),
    /// Every option of the question, used when it switches to a scalar answer type.
    All,
}

impl OptionDeletes {
    pub fn none() -> Self {
        OptionDeletes::Rows(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub id: Uuid,
    pub question_id: Uuid,
    pub value: String,
    pub is_correct: bool,
    pub created: DateTime<Utc>,
    pub changed: DateTime<Utc>,
}

impl From<&OptionRecord> for OptionDraft {
    fn from(record: &OptionRecord) -> Self {
        OptionDraft::existing(record.id, record.value.clone(), record.is_correct)
    }
}
