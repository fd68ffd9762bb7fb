use super::catalog::CandidateFieldView;
use crate::models::{OptionDraft, OptionRecord, PersistedQuestion, QuestionDraft};

/// Candidate answer fields for an edit form of `record`.
///
/// Only the field matching the stored type carries the stored answer.
pub fn prefill(record: &PersistedQuestion) -> CandidateFieldView {
    let mut view = CandidateFieldView::default();
    if let Some(field) = record.question_type.candidate_field() {
        view.set(field, record.correct_answer.clone());
    }
    view
}

/// Rebuilds the submission that produced `record` and its `options`.
pub fn draft_from_record(record: &PersistedQuestion, options: &[OptionRecord]) -> QuestionDraft {
    let mut draft = QuestionDraft {
        id: Some(record.id),
        category_id: Some(record.category_id),
        text: Some(record.text.clone()),
        question_type: Some(record.question_type),
        complexity: Some(record.complexity),
        number_of_points: Some(record.number_of_points),
        max_attempts_to_solve: record.max_attempts_to_solve,
        solution: record.solution.clone(),
        options: options.iter().map(OptionDraft::from).collect(),
        ..Default::default()
    };
    prefill(record).apply_to(&mut draft);
    draft
}
