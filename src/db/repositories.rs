use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::banner::{Banner, BannerSection};
use crate::models::layout::{Footer, Header, Logo, MenuItem};
use crate::models::news::News;
use crate::models::news_category::NewsCategory;
use crate::models::product::Product;
use crate::models::product_category::ProductCategory;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
    async fn slugs(&self) -> Result<Vec<String>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>>;
    /// Active products tagged with `category_slug`, newest first.
    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<Product>>;
    /// Active products sharing a category with `product`, excluding it.
    async fn related(&self, product: &Product, limit: i64) -> Result<Vec<Product>>;
    async fn all_active(&self) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait ProductCategoryRepository: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
    async fn slugs(&self) -> Result<Vec<String>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductCategory>>;
    async fn all(&self) -> Result<Vec<ProductCategory>>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
    async fn slugs(&self) -> Result<Vec<String>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<News>>;
    async fn latest_active(&self, limit: i64) -> Result<Vec<News>>;
    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<News>>;
    async fn all_active(&self) -> Result<Vec<News>>;
    /// Counts a visit from `client_ip` in a single conditional update.
    /// Returns the updated post, or `None` when nothing was updated because the
    /// post does not exist or already recorded this IP.
    async fn record_visit(&self, id: &ObjectId, client_ip: &str) -> Result<Option<News>>;
}

#[async_trait]
pub trait NewsCategoryRepository: Send + Sync {
    /// Empty slugs never match.
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
    /// Non-empty slugs only.
    async fn slugs(&self) -> Result<Vec<String>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsCategory>>;
    async fn all(&self) -> Result<Vec<NewsCategory>>;
}

#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// Active banners of a section, ascending priority, ties in insertion order.
    async fn active_by_section(&self, section: BannerSection) -> Result<Vec<Banner>>;
}

#[async_trait]
pub trait LayoutRepository: Send + Sync {
    async fn header(&self) -> Result<Option<Header>>;
    async fn footer(&self) -> Result<Option<Footer>>;
    async fn menu(&self) -> Result<Vec<MenuItem>>;
    async fn logo(&self) -> Result<Option<Logo>>;
    async fn ping(&self) -> Result<()>;
}
