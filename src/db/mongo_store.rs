use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::db::mongodb::{
    BANNERS, FOOTERS, HEADERS, LOGOS, MENUS, NEWS, NEWS_CATEGORIES, PRODUCT_CATEGORIES, PRODUCTS,
};
use crate::db::repositories::{
    BannerRepository, LayoutRepository, NewsCategoryRepository, NewsRepository,
    ProductCategoryRepository, ProductRepository,
};
use crate::models::banner::{Banner, BannerSection};
use crate::models::layout::{Footer, Header, Logo, MenuItem};
use crate::models::news::News;
use crate::models::news_category::NewsCategory;
use crate::models::product::Product;
use crate::models::product_category::ProductCategory;
use crate::models::status::Status;

/// MongoDB implementation of every repository, sharing the driver's pool.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS)
    }

    fn product_categories(&self) -> Collection<ProductCategory> {
        self.db.collection(PRODUCT_CATEGORIES)
    }

    fn news(&self) -> Collection<News> {
        self.db.collection(NEWS)
    }

    fn news_categories(&self) -> Collection<NewsCategory> {
        self.db.collection(NEWS_CATEGORIES)
    }
}

fn active() -> &'static str {
    Status::Active.as_str()
}

async fn exists<T: Send + Sync>(collection: &Collection<T>, filter: Document) -> Result<bool> {
    let count = collection
        .count_documents(filter)
        .limit(1)
        .await
        .with_context(|| format!("Database error counting {}", collection.name()))?;
    Ok(count > 0)
}

async fn distinct_slugs<T: Send + Sync>(
    collection: &Collection<T>,
    skip_empty: bool,
) -> Result<Vec<String>> {
    let values = collection
        .distinct("slug", doc! {})
        .await
        .with_context(|| format!("Database error listing slugs of {}", collection.name()))?;

    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Bson::String(slug) if !(skip_empty && slug.trim().is_empty()) => Some(slug),
            _ => None,
        })
        .collect())
}

#[async_trait]
impl ProductRepository for MongoStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        exists(&self.products(), doc! { "slug": slug }).await
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        distinct_slugs(&self.products(), false).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        self.products()
            .find_one(doc! { "slug": slug })
            .await
            .context("Database error loading product")
    }

    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<Product>> {
        self.products()
            .find(doc! { "status": active(), "categories": category_slug })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing products by category")
    }

    async fn related(&self, product: &Product, limit: i64) -> Result<Vec<Product>> {
        if product.categories.is_empty() {
            return Ok(Vec::new());
        }
        self.products()
            .find(doc! {
                "status": active(),
                "slug": { "$ne": product.slug.as_str() },
                "categories": { "$in": product.categories.clone() },
            })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await
            .context("Database error listing related products")
    }

    async fn all_active(&self) -> Result<Vec<Product>> {
        self.products()
            .find(doc! { "status": active() })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing products")
    }
}

#[async_trait]
impl ProductCategoryRepository for MongoStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        exists(&self.product_categories(), doc! { "slug": slug }).await
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        distinct_slugs(&self.product_categories(), false).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductCategory>> {
        self.product_categories()
            .find_one(doc! { "slug": slug })
            .await
            .context("Database error loading product category")
    }

    async fn all(&self) -> Result<Vec<ProductCategory>> {
        self.product_categories()
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing product categories")
    }
}

/// Pipeline update adding one to `visits` and appending `client_ip`.
/// Stored counts that are strings, NaN, infinite or outside the `long` range
/// restart from zero instead of failing the update.
fn visit_update(client_ip: &str) -> Vec<Document> {
    let as_double = doc! {
        "$convert": { "input": "$visits", "to": "double", "onError": 0, "onNull": 0 }
    };
    let as_long = doc! {
        "$convert": { "input": as_double, "to": "long", "onError": 0, "onNull": 0 }
    };
    vec![doc! {
        "$set": {
            "visits": { "$add": [ as_long, 1 ] },
            "viewedIPs": {
                "$concatArrays": [ { "$ifNull": [ "$viewedIPs", [] ] }, [ client_ip ] ]
            },
        }
    }]
}

#[async_trait]
impl NewsRepository for MongoStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        exists(&self.news(), doc! { "slug": slug }).await
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        distinct_slugs(&self.news(), false).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>> {
        self.news()
            .find_one(doc! { "slug": slug })
            .await
            .context("Database error loading news")
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<News>> {
        self.news()
            .find_one(doc! { "_id": *id })
            .await
            .context("Database error loading news")
    }

    async fn latest_active(&self, limit: i64) -> Result<Vec<News>> {
        self.news()
            .find(doc! { "status": active() })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await
            .context("Database error listing latest news")
    }

    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<News>> {
        self.news()
            .find(doc! { "status": active(), "categories": category_slug })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing news by category")
    }

    async fn all_active(&self) -> Result<Vec<News>> {
        self.news()
            .find(doc! { "status": active() })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing news")
    }

    async fn record_visit(&self, id: &ObjectId, client_ip: &str) -> Result<Option<News>> {
        // Matching on the IP's absence makes check and increment one atomic step.
        let filter = doc! { "_id": *id, "viewedIPs": { "$ne": client_ip } };
        let update = visit_update(client_ip);

        self.news()
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .context("Database error recording visit")
    }
}

#[async_trait]
impl NewsCategoryRepository for MongoStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        if slug.trim().is_empty() {
            return Ok(false);
        }
        exists(&self.news_categories(), doc! { "slug": slug }).await
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        distinct_slugs(&self.news_categories(), true).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsCategory>> {
        if slug.trim().is_empty() {
            return Ok(None);
        }
        self.news_categories()
            .find_one(doc! { "slug": slug })
            .await
            .context("Database error loading news category")
    }

    async fn all(&self) -> Result<Vec<NewsCategory>> {
        let categories: Vec<NewsCategory> = self
            .news_categories()
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing news categories")?;
        Ok(categories
            .into_iter()
            .filter(|c| c.routable_slug().is_some())
            .collect())
    }
}

#[async_trait]
impl BannerRepository for MongoStore {
    async fn active_by_section(&self, section: BannerSection) -> Result<Vec<Banner>> {
        self.db
            .collection::<Banner>(BANNERS)
            .find(doc! { "section": section.as_str(), "status": active() })
            .sort(doc! { "priority": 1, "_id": 1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing banners")
    }
}

#[async_trait]
impl LayoutRepository for MongoStore {
    async fn header(&self) -> Result<Option<Header>> {
        self.db
            .collection::<Header>(HEADERS)
            .find_one(doc! {})
            .await
            .context("Database error loading header")
    }

    async fn footer(&self) -> Result<Option<Footer>> {
        self.db
            .collection::<Footer>(FOOTERS)
            .find_one(doc! {})
            .await
            .context("Database error loading footer")
    }

    async fn menu(&self) -> Result<Vec<MenuItem>> {
        self.db
            .collection::<MenuItem>(MENUS)
            .find(doc! {})
            .sort(doc! { "priority": 1, "_id": 1 })
            .await?
            .try_collect()
            .await
            .context("Database error listing menu")
    }

    async fn logo(&self) -> Result<Option<Logo>> {
        self.db
            .collection::<Logo>(LOGOS)
            .find_one(doc! {})
            .await
            .context("Database error loading logo")
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}
