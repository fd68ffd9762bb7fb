use serde::{Deserialize, Serialize};

use crate::errors::FormField;
use crate::models::{QuestionDraft, QuestionType};

/// Capability group a question type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerGroup {
    /// Correctness is a single stored value.
    Scalar,
    /// Correctness lives on the option rows.
    Options,
}

/// The four type-specific answer inputs of the question form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    Integer,
    Decimal,
    Boolean,
    Text,
}

impl CandidateField {
    pub const ALL: [CandidateField; 4] = [
        CandidateField::Integer,
        CandidateField::Decimal,
        CandidateField::Boolean,
        CandidateField::Text,
    ];

    pub fn form_field(&self) -> FormField {
        match self {
            CandidateField::Integer => FormField::IntegerAnswer,
            CandidateField::Decimal => FormField::DecimalAnswer,
            CandidateField::Boolean => FormField::BooleanAnswer,
            CandidateField::Text => FormField::TextAnswer,
        }
    }

    pub fn for_form_field(field: FormField) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.form_field() == field)
    }
}

/// Fields every submission must carry, whatever its type.
pub const METADATA_REQUIRED: [FormField; 5] = [
    FormField::Category,
    FormField::Text,
    FormField::Type,
    FormField::Complexity,
    FormField::NumberOfPoints,
];

impl QuestionType {
    pub fn answer_group(&self) -> AnswerGroup {
        match self {
            QuestionType::Integer
            | QuestionType::Decimal
            | QuestionType::Boolean
            | QuestionType::Text => AnswerGroup::Scalar,
            QuestionType::SingleChoice | QuestionType::MultipleChoice => AnswerGroup::Options,
        }
    }

    pub fn requires_options(&self) -> bool {
        self.answer_group() == AnswerGroup::Options
    }

    /// Candidate field holding the correct answer, `None` for choice questions.
    pub fn candidate_field(&self) -> Option<CandidateField> {
        match self {
            QuestionType::Integer => Some(CandidateField::Integer),
            QuestionType::Decimal => Some(CandidateField::Decimal),
            QuestionType::Boolean => Some(CandidateField::Boolean),
            QuestionType::Text => Some(CandidateField::Text),
            QuestionType::SingleChoice | QuestionType::MultipleChoice => None,
        }
    }
}

/// Form fields that must be filled in for a question of the given type.
///
/// Choice questions have no required candidate field; their option list is
/// checked as a group instead.
pub fn required_fields(question_type: QuestionType) -> Vec<FormField> {
    let mut fields = METADATA_REQUIRED.to_vec();
    if let Some(candidate) = question_type.candidate_field() {
        fields.push(candidate.form_field());
    }
    fields
}

/// Per-type view of the candidate answer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFieldView {
    pub integer_answer: Option<String>,
    pub decimal_answer: Option<String>,
    pub boolean_answer: Option<String>,
    pub text_answer: Option<String>,
}

impl CandidateFieldView {
    pub fn from_draft(draft: &QuestionDraft) -> Self {
        Self {
            integer_answer: draft.integer_answer.clone(),
            decimal_answer: draft.decimal_answer.clone(),
            boolean_answer: draft.boolean_answer.clone(),
            text_answer: draft.text_answer.clone(),
        }
    }

    pub fn get(&self, field: CandidateField) -> Option<&str> {
        match field {
            CandidateField::Integer => self.integer_answer.as_deref(),
            CandidateField::Decimal => self.decimal_answer.as_deref(),
            CandidateField::Boolean => self.boolean_answer.as_deref(),
            CandidateField::Text => self.text_answer.as_deref(),
        }
    }

    /// Value of `field` unless it is absent or blank.
    pub fn filled(&self, field: CandidateField) -> Option<&str> {
        self.get(field).filter(|value| !value.trim().is_empty())
    }

    pub fn set(&mut self, field: CandidateField, value: Option<String>) {
        let slot = match field {
            CandidateField::Integer => &mut self.integer_answer,
            CandidateField::Decimal => &mut self.decimal_answer,
            CandidateField::Boolean => &mut self.boolean_answer,
            CandidateField::Text => &mut self.text_answer,
        };
        *slot = value;
    }

    /// Candidate fields that currently hold a value.
    pub fn populated(&self) -> Vec<CandidateField> {
        CandidateField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }

    pub fn apply_to(self, draft: &mut QuestionDraft) {
        draft.integer_answer = self.integer_answer;
        draft.decimal_answer = self.decimal_answer;
        draft.boolean_answer = self.boolean_answer;
        draft.text_answer = self.text_answer;
    }
}
