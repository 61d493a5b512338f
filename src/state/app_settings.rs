use log::LevelFilter;
use plpredict_api::client::DEFAULT_BASE_URL;

pub const API_URL_ENV: &str = "PLPREDICT_API_URL";
pub const LOG_LEVEL_ENV: &str = "PLPREDICT_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub api_url: String,
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            full_screen: false,
            log_level: None,
        }
    }
}

impl AppSettings {
    /// Settings from the environment; `api_url_override` comes from `--api-url`.
    pub fn load(api_url_override: Option<String>) -> Self {
        Self::from_values(
            api_url_override,
            std::env::var(API_URL_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
        )
    }

    fn from_values(
        api_url_override: Option<String>,
        api_url_env: Option<String>,
        log_level_env: Option<String>,
    ) -> Self {
        let api_url = api_url_override
            .into_iter()
            .chain(api_url_env)
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_level = log_level_env.and_then(|raw| raw.trim().parse::<LevelFilter>().ok());

        Self { api_url, full_screen: false, log_level }
    }
}
