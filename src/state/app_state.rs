use std::sync::Arc;

use crate::config::settings::Settings;
use crate::db::repositories::{
    BannerRepository, LayoutRepository, NewsCategoryRepository, NewsRepository,
    ProductCategoryRepository, ProductRepository,
};

pub struct AppState {
    pub settings: Settings,
    pub products: Arc<dyn ProductRepository>,
    pub product_categories: Arc<dyn ProductCategoryRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub news_categories: Arc<dyn NewsCategoryRepository>,
    pub banners: Arc<dyn BannerRepository>,
    pub layout: Arc<dyn LayoutRepository>,
}

impl AppState {
    /// Wire every repository to one store implementation.
    pub fn new<S>(settings: Settings, store: Arc<S>) -> Self
    where
        S: ProductRepository
            + ProductCategoryRepository
            + NewsRepository
            + NewsCategoryRepository
            + BannerRepository
            + LayoutRepository
            + 'static,
    {
        Self {
            settings,
            products: store.clone(),
            product_categories: store.clone(),
            news: store.clone(),
            news_categories: store.clone(),
            banners: store.clone(),
            layout: store,
        }
    }
}
