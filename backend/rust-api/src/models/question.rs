use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;
use validator::Validate;

use super::option::OptionDraft;

pub const MIN_POINTS: i32 = 1;
pub const MAX_POINTS: i32 = 10;
pub const MIN_ATTEMPTS_TO_SOLVE: i32 = 1;
pub const MAX_CORRECT_ANSWER_LENGTH: usize = 255;
pub const MAX_TEXT_LENGTH: usize = 2048;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionType {
    Integer,
    Decimal,
    Text,
    Boolean,
    #[serde(rename = "Single Choice", alias = "single_choice")]
    SingleChoice,
    #[serde(rename = "Multiple Choice", alias = "multiple_choice")]
    MultipleChoice,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        QuestionType::Integer,
        QuestionType::Decimal,
        QuestionType::Text,
        QuestionType::Boolean,
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Integer => "Integer",
            QuestionType::Decimal => "Decimal",
            QuestionType::Text => "Text",
            QuestionType::Boolean => "Boolean",
            QuestionType::SingleChoice => "Single Choice",
            QuestionType::MultipleChoice => "Multiple Choice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_lowercase().replace(['_', ' '], "");
        match normalized.as_str() {
            "integer" => Ok(QuestionType::Integer),
            "decimal" => Ok(QuestionType::Decimal),
            "text" => Ok(QuestionType::Text),
            "boolean" => Ok(QuestionType::Boolean),
            "singlechoice" => Ok(QuestionType::SingleChoice),
            "multiplechoice" => Ok(QuestionType::MultipleChoice),
            _ => Err(format!("Invalid question type: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Complexity {
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Extremely Hard", alias = "extremely_hard")]
    ExtremelyHard,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Easy => "Easy",
            Complexity::Medium => "Medium",
            Complexity::Hard => "Hard",
            Complexity::ExtremelyHard => "Extremely Hard",
        }
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_lowercase().replace(['_', ' '], "");
        match normalized.as_str() {
            "easy" => Ok(Complexity::Easy),
            "medium" => Ok(Complexity::Medium),
            "hard" => Ok(Complexity::Hard),
            "extremelyhard" => Ok(Complexity::ExtremelyHard),
            _ => Err(format!("Invalid complexity: {}", value)),
        }
    }
}

/// Question form submission as received from the admin layer.
///
/// Metadata arrives typed; the four candidate answers stay raw so that the
/// answer resolver can report parse failures against the right field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionDraft {
    /// Existing question being edited, `None` when creating.
    #[serde(default)]
    pub id: Option<Uuid>,

    #[serde(default)]
    pub category_id: Option<Uuid>,

    /// Checked against `MAX_TEXT_LENGTH` once trimmed.
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default, rename = "type")]
    pub question_type: Option<QuestionType>,

    #[serde(default)]
    pub complexity: Option<Complexity>,

    #[validate(range(min = 1, max = 10))]
    #[serde(default)]
    pub number_of_points: Option<i32>,

    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_attempts_to_solve: Option<i32>,

    #[serde(default)]
    pub solution: Option<String>,

    #[serde(default)]
    pub integer_answer: Option<String>,

    #[serde(default)]
    pub decimal_answer: Option<String>,

    #[serde(default)]
    pub boolean_answer: Option<String>,

    #[serde(default)]
    pub text_answer: Option<String>,

    #[serde(default)]
    pub options: Vec<OptionDraft>,
}

/// Question fields ready to be written by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionWrite {
    pub id: Option<Uuid>,
    pub category_id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub complexity: Complexity,
    pub number_of_points: i32,
    pub max_attempts_to_solve: Option<i32>,
    pub correct_answer: Option<String>,
    pub solution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuestion {
    pub id: Uuid,
    pub category_id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub complexity: Complexity,
    pub number_of_points: i32,
    pub max_attempts_to_solve: Option<i32>,
    /// Set for scalar answer types only; choice questions keep correctness on options.
    pub correct_answer: Option<String>,
    pub solution: Option<String>,
    pub created: DateTime<Utc>,
    pub changed: DateTime<Utc>,
}

/// Filters for the admin question list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    pub category_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub complexity: Option<Complexity>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &PersistedQuestion) -> bool {
        self.category_id
            .map_or(true, |id| question.category_id == id)
            && self
                .question_type
                .map_or(true, |t| question.question_type == t)
            && self.complexity.map_or(true, |c| question.complexity == c)
    }
}
