use actix_web::{error, web};

use crate::errors::api_error::ApiError;
use crate::handlers::banner_handlers::get_banners_by_section;
use crate::handlers::health_handlers::health_check;
use crate::handlers::layout_handlers::get_layout;
use crate::handlers::news_handlers::{
    get_all_news_categories, get_latest_active_news, get_news_by_category, get_news_by_slug,
    increment_blog_visits,
};
use crate::handlers::page_handlers::{dynamic_page, home_page};
use crate::handlers::product_handlers::{
    get_all_product_categories, get_product_by_slug, get_product_category_by_slug,
    get_products_by_category, get_related_products,
};
use crate::handlers::sitemap_handlers::{
    sitemap_blogs, sitemap_index, sitemap_pages, sitemap_products,
};
use crate::handlers::slug_handlers::{classify_slug, get_all_slugs, get_meta};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Malformed query strings get the JSON envelope instead of a plain-text 400
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }));
    // Content API consumed by the frontend
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            .route("/layout", web::get().to(get_layout))
            .route("/meta", web::get().to(get_meta))
            .service(
                web::scope("/product")
                    .route("/getProductsByCategory", web::get().to(get_products_by_category))
                    .route("/getDataBySlug", web::get().to(get_product_by_slug))
                    .route("/getRelatedProducts", web::get().to(get_related_products)),
            )
            .service(
                web::scope("/productCategory")
                    .route("/getAllCategories", web::get().to(get_all_product_categories))
                    .route("/getDataBySlug", web::get().to(get_product_category_by_slug)),
            )
            .service(
                web::scope("/news")
                    .route("/getDataBySlug", web::get().to(get_news_by_slug))
                    .route("/getLatestActiveNews", web::get().to(get_latest_active_news))
                    .route("/getNewsByCategory", web::get().to(get_news_by_category))
                    .route("/incrementBlogVisits", web::put().to(increment_blog_visits)),
            )
            .service(
                web::scope("/newsCategory")
                    .route("/getAllCategories", web::get().to(get_all_news_categories)),
            )
            .service(
                web::scope("/banner").route("/getBySection", web::get().to(get_banners_by_section)),
            )
            .service(
                web::scope("/dynamicSlug")
                    .route("/getAllSlugs", web::get().to(get_all_slugs))
                    .route("/classify", web::get().to(classify_slug)),
            ),
    );
    // Sitemaps
    cfg.route("/sitemap.xml", web::get().to(sitemap_index))
        .route("/sitemap1.xml", web::get().to(sitemap_pages))
        .route("/chemical.xml", web::get().to(sitemap_products))
        .route("/blogs.xml", web::get().to(sitemap_blogs));
    // Rendered pages; the catch-all must stay last
    cfg.route("/", web::get().to(home_page))
        .route("/{slug:.*}", web::get().to(dynamic_page));
}
