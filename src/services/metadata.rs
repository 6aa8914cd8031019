use serde::Serialize;

use crate::config::settings::Settings;
use crate::models::news::News;
use crate::models::news_category::NewsCategory;
use crate::models::product::Product;
use crate::models::product_category::ProductCategory;
use crate::services::slug_router::PageType;
use crate::state::app_state::AppState;
use crate::utils::text::{first_non_empty, rfc3339_from_millis, strip_html, truncate_chars};

const DESCRIPTION_LIMIT: usize = 160;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    #[serde(rename = "type")]
    pub og_type: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical: String,
    pub robots: Robots,
    #[serde(rename = "openGraph")]
    pub open_graph: OpenGraph,
}

impl PageMetadata {
    /// Site-wide metadata used whenever a page has nothing more specific.
    pub fn site_default(settings: &Settings) -> Self {
        let url = settings.absolute_url("");
        Self {
            title: settings.default_title.clone(),
            description: settings.default_description.clone(),
            keywords: settings.default_keywords.clone(),
            canonical: url.clone(),
            robots: Robots {
                index: true,
                follow: true,
            },
            open_graph: OpenGraph {
                title: settings.default_title.clone(),
                description: settings.default_description.clone(),
                url,
                site_name: settings.site_name.clone(),
                og_type: String::from("website"),
                images: Vec::new(),
                published_time: None,
                modified_time: None,
                authors: Vec::new(),
            },
        }
    }

    pub fn not_found(settings: &Settings) -> Self {
        let mut meta = Self::site_default(settings);
        meta.title = format!("Page Not Found | {}", settings.site_name);
        meta.open_graph.title = meta.title.clone();
        meta.robots.index = false;
        meta
    }

    pub fn server_error(settings: &Settings) -> Self {
        let mut meta = Self::site_default(settings);
        meta.title = format!("Server Error | {}", settings.site_name);
        meta.open_graph.title = meta.title.clone();
        meta.robots.index = false;
        meta
    }

    /// Value of the `robots` meta tag.
    pub fn robots_directive(&self) -> String {
        format!(
            "{}, {}",
            if self.robots.index { "index" } else { "noindex" },
            if self.robots.follow { "follow" } else { "nofollow" }
        )
    }
}

/// The SEO fields every routable document carries.
struct SeoSource<'a> {
    slug: &'a str,
    metatitle: &'a str,
    name: &'a str,
    metadescription: &'a str,
    description: &'a str,
    metakeywords: &'a str,
    metacanonical: &'a str,
    image: Option<&'a str>,
}

fn project(settings: &Settings, source: SeoSource<'_>, og_type: &str) -> PageMetadata {
    let title = first_non_empty([source.metatitle, source.name, settings.default_title.as_str()])
        .unwrap_or(settings.default_title.as_str())
        .to_string();

    let plain_description = truncate_chars(&strip_html(source.description), DESCRIPTION_LIMIT);
    let description = first_non_empty([
        source.metadescription,
        plain_description.as_str(),
        settings.default_description.as_str(),
    ])
    .unwrap_or(settings.default_description.as_str())
    .to_string();

    let keywords = first_non_empty([source.metakeywords, settings.default_keywords.as_str()])
        .unwrap_or_default()
        .to_string();

    let canonical = match first_non_empty([source.metacanonical]) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_string(),
        Some(path) => settings.absolute_url(path),
        None => settings.absolute_url(source.slug),
    };

    let images = source
        .image
        .map(|filename| vec![settings.image_url(filename)])
        .unwrap_or_default();

    PageMetadata {
        title: title.clone(),
        description: description.clone(),
        keywords,
        canonical: canonical.clone(),
        robots: Robots {
            index: true,
            follow: true,
        },
        open_graph: OpenGraph {
            title,
            description,
            url: canonical,
            site_name: settings.site_name.clone(),
            og_type: og_type.to_string(),
            images,
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
        },
    }
}

pub fn product_metadata(settings: &Settings, product: &Product) -> PageMetadata {
    project(
        settings,
        SeoSource {
            slug: &product.slug,
            metatitle: &product.metatitle,
            name: &product.title,
            metadescription: &product.metadescription,
            description: &product.description,
            metakeywords: &product.metakeywords,
            metacanonical: &product.metacanonical,
            image: product.cover_photo(),
        },
        "website",
    )
}

pub fn product_category_metadata(settings: &Settings, category: &ProductCategory) -> PageMetadata {
    project(
        settings,
        SeoSource {
            slug: &category.slug,
            metatitle: &category.metatitle,
            name: &category.category,
            metadescription: &category.metadescription,
            description: &category.description,
            metakeywords: &category.metakeywords,
            metacanonical: &category.metacanonical,
            image: first_non_empty([category.photo.as_str()]),
        },
        "website",
    )
}

pub fn news_metadata(settings: &Settings, news: &News) -> PageMetadata {
    let description = first_non_empty([news.description.as_str(), news.content.as_str()])
        .unwrap_or_default();
    let mut meta = project(
        settings,
        SeoSource {
            slug: &news.slug,
            metatitle: &news.metatitle,
            name: &news.title,
            metadescription: &news.metadescription,
            description,
            metakeywords: &news.metakeywords,
            metacanonical: &news.metacanonical,
            image: first_non_empty([news.photo.as_str()]),
        },
        "article",
    );
    meta.open_graph.published_time = news.created_at.and_then(rfc3339_from_millis);
    meta.open_graph.modified_time = news.last_modified().and_then(rfc3339_from_millis);
    let author = first_non_empty([news.author.as_str(), settings.site_name.as_str()])
        .unwrap_or_default();
    meta.open_graph.authors = vec![author.to_string()];
    meta
}

pub fn news_category_metadata(settings: &Settings, category: &NewsCategory) -> PageMetadata {
    let slug = category.routable_slug().unwrap_or_default();
    let fallback_title = format!("{} | {}", category.category.trim(), settings.site_name);
    let name = if category.category.trim().is_empty() {
        ""
    } else {
        fallback_title.as_str()
    };
    project(
        settings,
        SeoSource {
            slug,
            metatitle: &category.metatitle,
            name,
            metadescription: &category.metadescription,
            description: "",
            metakeywords: &category.metakeywords,
            metacanonical: &category.metacanonical,
            image: None,
        },
        "website",
    )
}

/// Metadata for an already classified slug. Never fails: a missing or inactive
/// record or a failed fetch falls back to the site defaults.
pub async fn resolve(state: &AppState, slug: &str, page_type: PageType) -> PageMetadata {
    let settings = &state.settings;
    let resolved = match page_type {
        PageType::Product => state
            .products
            .find_by_slug(slug)
            .await
            .map(|found| {
                found
                    .filter(Product::is_active)
                    .map(|p| product_metadata(settings, &p))
            }),
        PageType::ProductCategory => state
            .product_categories
            .find_by_slug(slug)
            .await
            .map(|found| found.map(|c| product_category_metadata(settings, &c))),
        PageType::SingleBlog => state
            .news
            .find_by_slug(slug)
            .await
            .map(|found| found.filter(News::is_active).map(|n| news_metadata(settings, &n))),
        PageType::Blog => state
            .news_categories
            .find_by_slug(slug)
            .await
            .map(|found| found.map(|c| news_category_metadata(settings, &c))),
        PageType::NotFound => return PageMetadata::not_found(settings),
        PageType::Error => return PageMetadata::server_error(settings),
    };

    match resolved {
        Ok(Some(meta)) => meta,
        Ok(None) => PageMetadata::site_default(settings),
        Err(e) => {
            log::warn!("Metadata lookup failed for {} {:?}: {:#}", page_type, slug, e);
            PageMetadata::site_default(settings)
        }
    }
}
