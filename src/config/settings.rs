use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, read from the environment (and `.env`) once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub site_url: String,
    pub site_name: String,
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: String,
    pub image_base_url: String,
    pub allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let site_url = String::from("http://localhost:8080");
        Self {
            bind_address: String::from("127.0.0.1"),
            port: 8080,
            mongodb_uri: String::from("mongodb://localhost:27017"),
            database_name: String::from("chemsite"),
            image_base_url: format!("{}/uploads", site_url),
            site_url,
            site_name: String::from("Chemsite"),
            default_title: String::from("Chemsite | Dyes, Pigments and Intermediates"),
            default_description: String::from(
                "Manufacturer and exporter of dyes, pigments, dye intermediates and specialty chemicals.",
            ),
            default_keywords: String::from(
                "dyes, pigments, dye intermediates, specialty chemicals, chemical manufacturer",
            ),
            allowed_origins: vec![String::from("http://localhost:3000")],
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Settings::default();

        let port = match env::var("PORT") {
            Ok(port) => port.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => defaults.port,
        };
        let mongodb_uri = env::var("MONGODB_URI").context("MONGODB_URI not set")?;
        let site_url = env::var("SITE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.site_url);
        let image_base_url = env::var("IMAGE_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("{}/uploads", site_url));
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port,
            mongodb_uri,
            database_name: env::var("MONGODB_DB").unwrap_or(defaults.database_name),
            site_url,
            site_name: env::var("SITE_NAME").unwrap_or(defaults.site_name),
            default_title: env::var("DEFAULT_TITLE").unwrap_or(defaults.default_title),
            default_description: env::var("DEFAULT_DESCRIPTION")
                .unwrap_or(defaults.default_description),
            default_keywords: env::var("DEFAULT_KEYWORDS").unwrap_or(defaults.default_keywords),
            image_base_url,
            allowed_origins,
        })
    }

    /// Absolute URL for a site path such as `/blogs` or `reactive-dyes`.
    pub fn absolute_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", self.site_url)
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }

    /// Absolute URL for an uploaded image filename. Already absolute values pass through.
    pub fn image_url(&self, filename: &str) -> String {
        let filename = filename.trim();
        if filename.starts_with("http://") || filename.starts_with("https://") {
            filename.to_string()
        } else {
            format!("{}/{}", self.image_base_url, filename.trim_start_matches('/'))
        }
    }
}
