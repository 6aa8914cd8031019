use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::status::Status;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSection {
    #[serde(rename = "Home")]
    Home,
    #[serde(rename = "About Us")]
    AboutUs,
    #[serde(rename = "Blog")]
    Blog,
    #[serde(rename = "Contact")]
    Contact,
}

impl BannerSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerSection::Home => "Home",
            BannerSection::AboutUs => "About Us",
            BannerSection::Blog => "Blog",
            BannerSection::Contact => "Contact",
        }
    }

    /// Lenient parse for query strings (`about-us`, `About Us`, `aboutus`).
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "home" => Some(BannerSection::Home),
            "aboutus" | "about" => Some(BannerSection::AboutUs),
            "blog" | "blogs" => Some(BannerSection::Blog),
            "contact" | "contactus" => Some(BannerSection::Contact),
            _ => None,
        }
    }
}

impl fmt::Display for BannerSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Banner {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub link: String,
    pub section: BannerSection,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: i32, // Lower values are shown first
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Banner {
    pub fn new(title: String, section: BannerSection, priority: i32) -> Self {
        Self {
            id: None,
            title,
            subtitle: String::new(),
            photo: String::new(),
            alt: String::new(),
            link: String::new(),
            section,
            status: Status::Active,
            priority,
            created_at: Some(chrono::Utc::now().timestamp_millis()),
        }
    }
}
