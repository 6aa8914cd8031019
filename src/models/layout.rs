use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SocialLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Top bar contact details.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Header {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "socialLinks", default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Footer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(rename = "socialLinks", default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MenuItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub priority: i32,
}

impl MenuItem {
    pub fn new(name: &str, path: &str, priority: i32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            path: path.to_string(),
            priority,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Logo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub alt: String,
}
