use futures_util::try_join;
use serde::Serialize;
use std::fmt;

use crate::state::app_state::AppState;

/// What a top-level slug resolves to.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "product-category")]
    ProductCategory,
    #[serde(rename = "single-blog")]
    SingleBlog,
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "404")]
    NotFound,
    #[serde(rename = "error")]
    Error,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Product => "product",
            PageType::ProductCategory => "product-category",
            PageType::SingleBlog => "single-blog",
            PageType::Blog => "blog",
            PageType::NotFound => "404",
            PageType::Error => "error",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SlugLists {
    pub product_slugs: Vec<String>,
    pub product_category_slugs: Vec<String>,
    pub news_slugs: Vec<String>,
    pub news_category_slugs: Vec<String>,
}

/// Joined catch-all path segments without surrounding slashes or whitespace.
pub fn normalize_slug(raw: &str) -> String {
    raw.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve `slug` against the four routable collections.
///
/// The existence checks run concurrently. A slug found in several
/// collections resolves by precedence: product, product category, news post,
/// news category. Any failed lookup yields `PageType::Error`, never a 404.
pub async fn classify(state: &AppState, slug: &str) -> PageType {
    if slug.is_empty() {
        return PageType::NotFound;
    }

    let lookups = try_join!(
        state.products.slug_exists(slug),
        state.product_categories.slug_exists(slug),
        state.news.slug_exists(slug),
        state.news_categories.slug_exists(slug),
    );

    match lookups {
        Ok((true, _, _, _)) => PageType::Product,
        Ok((_, true, _, _)) => PageType::ProductCategory,
        Ok((_, _, true, _)) => PageType::SingleBlog,
        Ok((_, _, _, true)) => PageType::Blog,
        Ok(_) => PageType::NotFound,
        Err(e) => {
            log::error!("Slug classification failed for {:?}: {:#}", slug, e);
            PageType::Error
        }
    }
}

/// Every routable slug, one list per collection.
pub async fn all_slugs(state: &AppState) -> anyhow::Result<SlugLists> {
    let (product_slugs, product_category_slugs, news_slugs, news_category_slugs) = try_join!(
        state.products.slugs(),
        state.product_categories.slugs(),
        state.news.slugs(),
        state.news_categories.slugs(),
    )?;

    Ok(SlugLists {
        product_slugs,
        product_category_slugs,
        news_slugs,
        news_category_slugs: news_category_slugs
            .into_iter()
            .filter(|slug| !slug.trim().is_empty())
            .collect(),
    })
}
