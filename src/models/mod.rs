pub mod banner;
pub mod layout;
pub mod news;
pub mod news_category;
pub mod product;
pub mod product_category;
pub mod status;
