use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::status::{Status, deserialize_lenient_count};

/// A blog post. `visits` only grows once per distinct client IP.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct News {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>, // Slug of the featured product, not validated
    #[serde(default)]
    pub categories: Vec<String>, // News category slugs
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    pub visits: i64,
    #[serde(rename = "viewedIPs", default)]
    pub viewed_ips: Vec<String>,
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

impl News {
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

    pub fn has_viewed(&self, client_ip: &str) -> bool {
        self.viewed_ips.iter().any(|ip| ip == client_ip)
    }

    /// Applies a first visit from `client_ip`. Returns false if the IP was
    /// already counted.
    pub fn register_view(&mut self, client_ip: &str) -> bool {
        if self.has_viewed(client_ip) {
            return false;
        }
        self.visits += 1;
        self.viewed_ips.push(client_ip.to_string());
        true
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.updated_at.or(self.created_at)
    }
}
