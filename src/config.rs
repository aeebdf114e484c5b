use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::discovery::DEFAULT_SEARCH_ENDPOINT;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        openai_api_key: get_env_opt("OPENAI_API_KEY"),
        openai_model: get_env_or_default("OPENAI_MODEL", "gpt-3.5-turbo"),
        openai_base_url: get_env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
        search_endpoint: get_env_or_default("SEARCH_ENDPOINT", DEFAULT_SEARCH_ENDPOINT),
        bind_addr: get_env_or_default("BIND_ADDR", "0.0.0.0:3000"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
    }
});

#[derive(Debug)]
pub struct Config {
    /// Chat requests are rejected while this is unset.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub search_endpoint: String,
    pub bind_addr: String,
    pub static_dir: String,
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
