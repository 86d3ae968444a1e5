use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Serialize;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SITE_URL: &str = "https://eventos360.mx";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Environment keys the server cannot run without.
pub const REQUIRED_KEYS: [&str; 2] = ["DATABASE_URL", "JWT_SECRET"];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub site_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub stripe_secret_key: Option<String>,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
    pub storage_url: Option<String>,
    pub storage_service_key: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password_sha256: Option<String>,
    pub social_links: SocialLinks,
    pub allowed_origins: Vec<String>,
}

/// Optional social profile links shown in the site footer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
}

/// Result of reading the environment.
///
/// Missing required keys do not abort startup: the server comes up in a
/// degraded mode that reports them on every route.
#[derive(Debug, Clone)]
pub enum ConfigStatus {
    Ready(Box<Config>),
    NotConfigured { port: u16, missing: Vec<String> },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<ConfigStatus> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ConfigStatus> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(p) => p.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| get(key).is_none())
            .map(|key| key.to_string())
            .collect();

        let (Some(database_url), Some(jwt_secret)) = (get("DATABASE_URL"), get("JWT_SECRET"))
        else {
            return Ok(ConfigStatus::NotConfigured { port, missing });
        };

        let site_url = get("SITE_URL")
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ConfigStatus::Ready(Box::new(Config {
            database_url,
            jwt_secret,
            port,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            stripe_secret_key: get("STRIPE_SECRET_KEY"),
            checkout_success_url: get("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|| format!("{site_url}/registro/exito?session_id={{CHECKOUT_SESSION_ID}}")),
            checkout_cancel_url: get("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|| format!("{site_url}/planes")),
            storage_url: get("STORAGE_URL").map(|u| u.trim_end_matches('/').to_string()),
            storage_service_key: get("STORAGE_SERVICE_KEY"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password_sha256: get("ADMIN_PASSWORD_SHA256").map(|h| h.to_lowercase()),
            social_links: SocialLinks {
                facebook: get("FACEBOOK_URL"),
                instagram: get("INSTAGRAM_URL"),
                whatsapp: get("WHATSAPP_URL"),
            },
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            site_url,
        })))
    }
}
