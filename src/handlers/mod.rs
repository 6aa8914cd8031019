pub mod banner_handlers;
pub mod health_handlers;
pub mod layout_handlers;
pub mod news_handlers;
pub mod page_handlers;
pub mod product_handlers;
pub mod sitemap_handlers;
pub mod slug_handlers;
