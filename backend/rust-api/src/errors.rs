use serde::{ser::SerializeMap, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Fields of the question form that can carry their own errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Category,
    Text,
    Type,
    Complexity,
    NumberOfPoints,
    MaxAttemptsToSolve,
    Solution,
    IntegerAnswer,
    DecimalAnswer,
    BooleanAnswer,
    TextAnswer,
    OptionValue,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Category => "category",
            FormField::Text => "text",
            FormField::Type => "type",
            FormField::Complexity => "complexity",
            FormField::NumberOfPoints => "number_of_points",
            FormField::MaxAttemptsToSolve => "max_attempts_to_solve",
            FormField::Solution => "solution",
            FormField::IntegerAnswer => "integer_answer",
            FormField::DecimalAnswer => "decimal_answer",
            FormField::BooleanAnswer => "boolean_answer",
            FormField::TextAnswer => "text_answer",
            FormField::OptionValue => "value",
        }
    }

    /// Maps a struct field name reported by `validator` back to the form field.
    pub fn from_draft_field(name: &str) -> Option<Self> {
        match name {
            "category_id" => Some(FormField::Category),
            "text" => Some(FormField::Text),
            "question_type" => Some(FormField::Type),
            "complexity" => Some(FormField::Complexity),
            "number_of_points" => Some(FormField::NumberOfPoints),
            "max_attempts_to_solve" => Some(FormField::MaxAttemptsToSolve),
            "solution" => Some(FormField::Solution),
            "integer_answer" => Some(FormField::IntegerAnswer),
            "decimal_answer" => Some(FormField::DecimalAnswer),
            "boolean_answer" => Some(FormField::BooleanAnswer),
            "text_answer" => Some(FormField::TextAnswer),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI region an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorTarget {
    Field(FormField),
    OptionRow { index: usize },
    OptionGroup,
}

impl fmt::Display for ErrorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorTarget::Field(field) => write!(f, "{}", field),
            ErrorTarget::OptionRow { index } => {
                write!(f, "options-{}-{}", index, FormField::OptionValue)
            }
            ErrorTarget::OptionGroup => f.write_str("options"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "limit", rename_all = "snake_case")]
pub enum RangeBound {
    AtLeast(i64),
    AtMost(i64),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::AtLeast(limit) => write!(f, "greater than or equal to {}", limit),
            RangeBound::AtMost(limit) => write!(f, "less than or equal to {}", limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectCount {
    ExactlyOne,
    AtLeastOne,
}

impl fmt::Display for CorrectCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectCount::ExactlyOne => f.write_str(
                "For single choice question type you need to specify exactly one correct option.",
            ),
            CorrectCount::AtLeastOne => f.write_str(
                "For multiple choice question type you need to specify at least one correct option.",
            ),
        }
    }
}

/// A single validation failure of a submitted question form.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormError {
    #[error("This field is required.")]
    MissingRequiredField { field: FormField },

    #[error("{reason}")]
    InvalidFieldValue { field: FormField, reason: String },

    #[error("Ensure this value is {bound}.")]
    NumericRangeViolation { field: FormField, bound: RangeBound },

    #[error("At least two options should be specified.")]
    InsufficientOptions,

    #[error("Some options have the same values.")]
    DuplicateOptions,

    #[error("{expected}")]
    WrongCorrectCount { expected: CorrectCount },
}

impl FormError {
    pub fn missing(field: FormField) -> Self {
        FormError::MissingRequiredField { field }
    }

    pub fn invalid(field: FormField, reason: impl Into<String>) -> Self {
        FormError::InvalidFieldValue {
            field,
            reason: reason.into(),
        }
    }

    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FormError::MissingRequiredField { .. } => "missing_required_field",
            FormError::InvalidFieldValue { .. } => "invalid_field_value",
            FormError::NumericRangeViolation { .. } => "numeric_range_violation",
            FormError::InsufficientOptions => "insufficient_options",
            FormError::DuplicateOptions => "duplicate_options",
            FormError::WrongCorrectCount { .. } => "wrong_correct_count",
        }
    }
}

/// Accumulated validation errors of one submission, keyed by UI region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    errors: BTreeMap<ErrorTarget, Vec<FormError>>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: ErrorTarget, error: FormError) {
        self.errors.entry(target).or_default().push(error);
    }

    pub fn push_field(&mut self, error: FormError) {
        let target = match &error {
            FormError::MissingRequiredField { field }
            | FormError::InvalidFieldValue { field, .. }
            | FormError::NumericRangeViolation { field, .. } => ErrorTarget::Field(*field),
            FormError::InsufficientOptions
            | FormError::DuplicateOptions
            | FormError::WrongCorrectCount { .. } => ErrorTarget::OptionGroup,
        };
        self.push(target, error);
    }

    pub fn extend(&mut self, other: ErrorSet) {
        for (target, errors) in other.errors {
            self.errors.entry(target).or_default().extend(errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of individual errors.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn get(&self, target: &ErrorTarget) -> &[FormError] {
        self.errors.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, error: &FormError) -> bool {
        self.errors.values().flatten().any(|e| e == error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ErrorTarget, &FormError)> {
        self.errors
            .iter()
            .flat_map(|(target, errors)| errors.iter().map(move |e| (target, e)))
    }

    pub fn targets(&self) -> impl Iterator<Item = &ErrorTarget> {
        self.errors.keys()
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (target, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", target, error)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorEntry<'a> {
    message: String,
    #[serde(flatten)]
    error: &'a FormError,
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (target, errors) in &self.errors {
            let entries: Vec<ErrorEntry<'_>> = errors
                .iter()
                .map(|error| ErrorEntry {
                    message: error.to_string(),
                    error,
                })
                .collect();
            map.serialize_entry(&target.to_string(), &entries)?;
        }
        map.end()
    }
}

/// Failures reported by the persistence layer while applying a commit payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Select a valid choice. Category {category_id} is not one of the available choices.")]
    InvalidReference { category_id: Uuid },

    #[error("Question {0} not found")]
    QuestionNotFound(Uuid),

    #[error("Option {option_id} does not belong to question {question_id}")]
    OptionNotFound { question_id: Uuid, option_id: Uuid },

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Check constraint violated: {0}")]
    CheckViolation(String),
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("Question form is invalid: {0}")]
    Rejected(ErrorSet),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
