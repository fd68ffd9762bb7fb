pub mod category;
pub mod option;
pub mod question;

pub use category::{Category, CreateCategoryRequest};
pub use option::{OptionDeletes, OptionDraft, OptionRecord, OptionUpsert};
pub use question::{
    Complexity, PersistedQuestion, QuestionDraft, QuestionFilter, QuestionType, QuestionWrite,
};
