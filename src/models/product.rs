use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::status::Status;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<String>, // Product category slugs
    #[serde(default)]
    pub description: String, // Rich text from the CMS editor
    #[serde(default)]
    pub photo: Vec<String>, // Uploaded image filenames, first one is the cover
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub status: Status,
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

impl Product {
    pub fn new(title: String, slug: String, categories: Vec<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            title,
            slug,
            categories,
            status: Status::Active,
            created_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn cover_photo(&self) -> Option<&str> {
        self.photo
            .iter()
            .map(|p| p.trim())
            .find(|p| !p.is_empty())
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.updated_at.or(self.created_at)
    }
}
