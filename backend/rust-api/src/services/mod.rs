use crate::config::Config;
use anyhow::Context;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn QuestionStore>,
}

impl AppState {
    /// Builds the state around an in-memory store seeded with the configured categories.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!(
            "Seeding question store with {} categories",
            config.default_categories.len()
        );

        let store = MemoryStore::with_categories(&config.default_categories)
            .context("Failed to seed default categories")?;

        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: Config, store: Arc<dyn QuestionStore>) -> Self {
        Self { config, store }
    }

    pub fn question_service(&self) -> QuestionService {
        QuestionService::new(self.store.clone(), self.config.max_page_size)
    }
}

pub mod memory_store;
pub mod question_form;
pub mod question_service;
pub mod store;

pub use memory_store::MemoryStore;
pub use question_service::{EditForm, QuestionService, QuestionWithOptions};
pub use store::QuestionStore;
