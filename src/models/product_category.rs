use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProductCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub category: String, // Display name
    pub slug: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub description: String,
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

impl ProductCategory {
    pub fn new(category: String, slug: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            category,
            slug,
            created_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        }
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.updated_at.or(self.created_at)
    }
}
