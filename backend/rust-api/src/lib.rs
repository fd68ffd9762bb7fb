pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use errors::{CommitError, ErrorSet, ErrorTarget, FormError, FormField, StorageError};
pub use services::question_form::{prefill, validate_and_build_payload, CommitPayload};
pub use services::AppState;
