use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

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

/// In-process store used by tests. Documents keep insertion order and any
/// collection can be switched to fail every call.
#[derive(Default)]
pub struct MemoryStore {
    pub products: Mutex<Vec<Product>>,
    pub product_categories: Mutex<Vec<ProductCategory>>,
    pub news: Mutex<Vec<News>>,
    pub news_categories: Mutex<Vec<NewsCategory>>,
    pub banners: Mutex<Vec<Banner>>,
    pub header: Mutex<Option<Header>>,
    pub footer: Mutex<Option<Footer>>,
    pub menu: Mutex<Vec<MenuItem>>,
    pub logo: Mutex<Option<Logo>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl MemoryStore {
    pub fn fail(&self, collection: &'static str) {
        self.failing.lock().unwrap().insert(collection);
    }

    pub fn add_product(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }

    pub fn add_product_category(&self, category: ProductCategory) {
        self.product_categories.lock().unwrap().push(category);
    }

    pub fn add_news(&self, mut news: News) -> ObjectId {
        let id = *news.id.get_or_insert_with(ObjectId::new);
        self.news.lock().unwrap().push(news);
        id
    }

    pub fn add_news_category(&self, category: NewsCategory) {
        self.news_categories.lock().unwrap().push(category);
    }

    pub fn add_banner(&self, banner: Banner) {
        self.banners.lock().unwrap().push(banner);
    }

    fn check(&self, collection: &'static str) -> Result<()> {
        if self.failing.lock().unwrap().contains(collection) {
            bail!("{} is unavailable", collection);
        }
        Ok(())
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> Option<i64>) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.check(PRODUCTS)?;
        Ok(self.products.lock().unwrap().iter().any(|p| p.slug == slug))
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        self.check(PRODUCTS)?;
        Ok(self.products.lock().unwrap().iter().map(|p| p.slug.clone()).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        self.check(PRODUCTS)?;
        Ok(self.products.lock().unwrap().iter().find(|p| p.slug == slug).cloned())
    }

    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<Product>> {
        self.check(PRODUCTS)?;
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active() && p.categories.iter().any(|c| c == category_slug))
            .cloned()
            .collect();
        newest_first(&mut products, |p| p.created_at);
        Ok(products)
    }

    async fn related(&self, product: &Product, limit: i64) -> Result<Vec<Product>> {
        self.check(PRODUCTS)?;
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.is_active()
                    && p.slug != product.slug
                    && p.categories.iter().any(|c| product.categories.contains(c))
            })
            .cloned()
            .collect();
        newest_first(&mut products, |p| p.created_at);
        products.truncate(limit.max(0) as usize);
        Ok(products)
    }

    async fn all_active(&self) -> Result<Vec<Product>> {
        self.check(PRODUCTS)?;
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect();
        newest_first(&mut products, |p| p.created_at);
        Ok(products)
    }
}

#[async_trait]
impl ProductCategoryRepository for MemoryStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.check(PRODUCT_CATEGORIES)?;
        Ok(self
            .product_categories
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug == slug))
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        self.check(PRODUCT_CATEGORIES)?;
        Ok(self
            .product_categories
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.slug.clone())
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductCategory>> {
        self.check(PRODUCT_CATEGORIES)?;
        Ok(self
            .product_categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn all(&self) -> Result<Vec<ProductCategory>> {
        self.check(PRODUCT_CATEGORIES)?;
        Ok(self.product_categories.lock().unwrap().clone())
    }
}

#[async_trait]
impl NewsRepository for MemoryStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.check(NEWS)?;
        Ok(self.news.lock().unwrap().iter().any(|n| n.slug == slug))
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        self.check(NEWS)?;
        Ok(self.news.lock().unwrap().iter().map(|n| n.slug.clone()).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>> {
        self.check(NEWS)?;
        Ok(self.news.lock().unwrap().iter().find(|n| n.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<News>> {
        self.check(NEWS)?;
        Ok(self
            .news
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id.as_ref() == Some(id))
            .cloned())
    }

    async fn latest_active(&self, limit: i64) -> Result<Vec<News>> {
        let mut news = NewsRepository::all_active(self).await?;
        news.truncate(limit.max(0) as usize);
        Ok(news)
    }

    async fn active_in_category(&self, category_slug: &str) -> Result<Vec<News>> {
        Ok(NewsRepository::all_active(self)
            .await?
            .into_iter()
            .filter(|n| n.categories.iter().any(|c| c == category_slug))
            .collect())
    }

    async fn all_active(&self) -> Result<Vec<News>> {
        self.check(NEWS)?;
        let mut news: Vec<News> = self
            .news
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_active())
            .cloned()
            .collect();
        newest_first(&mut news, |n| n.created_at);
        Ok(news)
    }

    async fn record_visit(&self, id: &ObjectId, client_ip: &str) -> Result<Option<News>> {
        self.check(NEWS)?;
        let mut news = self.news.lock().unwrap();
        Ok(news
            .iter_mut()
            .find(|n| n.id.as_ref() == Some(id))
            .filter(|n| !n.has_viewed(client_ip))
            .map(|n| {
                n.register_view(client_ip);
                n.clone()
            }))
    }
}

#[async_trait]
impl NewsCategoryRepository for MemoryStore {
    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.check(NEWS_CATEGORIES)?;
        if slug.trim().is_empty() {
            return Ok(false);
        }
        Ok(self
            .news_categories
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug.as_deref() == Some(slug)))
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        self.check(NEWS_CATEGORIES)?;
        Ok(self
            .news_categories
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| c.slug.clone())
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsCategory>> {
        self.check(NEWS_CATEGORIES)?;
        if slug.trim().is_empty() {
            return Ok(None);
        }
        Ok(self
            .news_categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn all(&self) -> Result<Vec<NewsCategory>> {
        self.check(NEWS_CATEGORIES)?;
        Ok(self
            .news_categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.routable_slug().is_some())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BannerRepository for MemoryStore {
    async fn active_by_section(&self, section: BannerSection) -> Result<Vec<Banner>> {
        self.check(BANNERS)?;
        let mut banners: Vec<Banner> = self
            .banners
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.section == section && b.status.is_active())
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal priorities.
        banners.sort_by_key(|b| b.priority);
        Ok(banners)
    }
}

#[async_trait]
impl LayoutRepository for MemoryStore {
    async fn header(&self) -> Result<Option<Header>> {
        self.check(HEADERS)?;
        Ok(self.header.lock().unwrap().clone())
    }

    async fn footer(&self) -> Result<Option<Footer>> {
        self.check(FOOTERS)?;
        Ok(self.footer.lock().unwrap().clone())
    }

    async fn menu(&self) -> Result<Vec<MenuItem>> {
        self.check(MENUS)?;
        let mut menu = self.menu.lock().unwrap().clone();
        menu.sort_by_key(|m| m.priority);
        Ok(menu)
    }

    async fn logo(&self) -> Result<Option<Logo>> {
        self.check(LOGOS)?;
        Ok(self.logo.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
