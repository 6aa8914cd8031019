use serde::Deserialize;
use validator::Validate;

use crate::errors::api_error::ApiError;

/// `?slugs=<slug>` as sent by the site front end.
#[derive(Deserialize)]
pub struct SlugsQuery {
    pub slugs: Option<String>,
}

#[derive(Deserialize)]
pub struct SlugQuery {
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct CategorySlugQuery {
    #[serde(rename = "categorySlug")]
    pub category_slug: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct RelatedProductsQuery {
    pub slugs: Option<String>,
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct LatestNewsQuery {
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct VisitQuery {
    pub id: Option<String>,
    #[serde(rename = "clientIP")]
    #[validate(ip(message = "clientIP must be an IP address"))]
    pub client_ip: Option<String>,
}

#[derive(Deserialize)]
pub struct SectionQuery {
    pub section: Option<String>,
}

/// A present, non-blank query parameter, trimmed.
pub fn required(value: Option<&str>, name: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| ApiError::missing(name))
}
