use serde::Deserialize;
use std::env;

const DEFAULT_LOG_FILTER: &str = "quizbank_api=info";
const DEFAULT_MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: String,
    pub log: LogConfig,
    /// Category names created when the store starts empty.
    pub default_categories: Vec<String>,
    /// Upper bound for one page of the admin question list.
    pub max_page_size: usize,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Local .env is optional
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("catalog.default_categories")
                    .try_parsing(true),
            )
            .build()?;

        let filter = settings
            .get_string("log.filter")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let json = settings.get_bool("log.json").unwrap_or(false);

        let default_categories = settings
            .get::<Vec<String>>("catalog.default_categories")
            .unwrap_or_default()
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let max_page_size = match settings.get_int("listing.max_page_size") {
            Ok(size) if size > 0 => size as usize,
            Ok(size) => {
                return Err(config::ConfigError::Message(format!(
                    "listing.max_page_size must be positive, got {}",
                    size
                )))
            }
            Err(_) => DEFAULT_MAX_PAGE_SIZE,
        };

        Ok(Config {
            environment,
            log: LogConfig { filter, json },
            default_categories,
            max_page_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
                json: false,
            },
            default_categories: Vec::new(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}
