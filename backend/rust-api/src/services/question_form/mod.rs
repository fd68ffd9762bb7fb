//! Question form validation and correct-answer resolution.
//!
//! One submitted form is checked against the rules of its question type:
//! scalar types resolve a single stored answer, choice types validate their
//! option list. Both branches always run and the inactive one reduces to a
//! no-op (answer `None`) or a clearing instruction (all options deleted).

pub mod answer;
pub mod assembler;
pub mod catalog;
pub mod options;
pub mod prefill;

pub use answer::resolve_correct_answer;
pub use assembler::{validate_and_build_payload, CommitPayload};
pub use catalog::{required_fields, AnswerGroup, CandidateField, CandidateFieldView};
pub use options::{validate_option_set, OptionSetOutcome};
pub use prefill::{draft_from_record, prefill};
