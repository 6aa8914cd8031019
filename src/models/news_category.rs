use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NewsCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub slug: Option<String>, // Empty or missing slugs are never routable
    #[serde(default)]
    pub metatitle: String,
    #[serde(default)]
    pub metadescription: String,
    #[serde(default)]
    pub metakeywords: String,
    #[serde(default)]
    pub metacanonical: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl NewsCategory {
    pub fn new(category: String, slug: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            category,
            slug: Some(slug),
            created_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        }
    }

    /// The routable slug, if any.
    pub fn routable_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.updated_at.or(self.created_at)
    }
}
