use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use anyhow::anyhow;
use askama::Template;
use futures_util::{join, try_join};

use crate::config::settings::Settings;
use crate::errors::api_error::ApiError;
use crate::models::banner::{Banner, BannerSection};
use crate::models::news::News;
use crate::models::news_category::NewsCategory;
use crate::models::product::Product;
use crate::models::product_category::ProductCategory;
use crate::services::metadata::{self, PageMetadata};
use crate::services::page_shell::{PageShell, load_shell, or_empty};
use crate::services::slug_router::{PageType, classify, normalize_slug};
use crate::services::view_counter::record_visit;
use crate::state::app_state::AppState;
use crate::utils::client_ip::client_ip;
use crate::utils::text::{display_date_from_millis, strip_html, truncate_chars};

const SUMMARY_LIMIT: usize = 140;
const HOME_POSTS: i64 = 3;
const SIDEBAR_POSTS: i64 = 5;
const RELATED_PRODUCTS: i64 = 4;

/// A linked tile in a grid or sidebar.
pub struct Card {
    pub title: String,
    pub href: String,
    pub image: String,
    pub alt: String,
    pub summary: String,
    pub date: String,
}

impl Card {
    fn product(settings: &Settings, product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            href: format!("/{}", product.slug),
            image: product
                .cover_photo()
                .map(|photo| settings.image_url(photo))
                .unwrap_or_default(),
            alt: alt_text(&product.alt, &product.title),
            summary: summary(&product.description),
            date: String::new(),
        }
    }

    fn category(settings: &Settings, category: &ProductCategory) -> Self {
        Self {
            title: category.category.clone(),
            href: format!("/{}", category.slug),
            image: image(settings, &category.photo),
            alt: alt_text(&category.alt, &category.category),
            summary: summary(&category.description),
            date: String::new(),
        }
    }

    fn post(settings: &Settings, news: &News) -> Self {
        let text = if news.description.trim().is_empty() {
            &news.content
        } else {
            &news.description
        };
        Self {
            title: news.title.clone(),
            href: format!("/{}", news.slug),
            image: image(settings, &news.photo),
            alt: alt_text(&news.alt, &news.title),
            summary: summary(text),
            date: news.created_at.map(display_date_from_millis).unwrap_or_default(),
        }
    }
}

pub struct Slide {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub alt: String,
    pub link: String,
}

impl Slide {
    fn new(settings: &Settings, banner: Banner) -> Self {
        Self {
            image: image(settings, &banner.photo),
            alt: alt_text(&banner.alt, &banner.title),
            title: banner.title,
            subtitle: banner.subtitle,
            link: banner.link,
        }
    }
}

fn image(settings: &Settings, photo: &str) -> String {
    if photo.trim().is_empty() {
        String::new()
    } else {
        settings.image_url(photo)
    }
}

fn alt_text(alt: &str, fallback: &str) -> String {
    if alt.trim().is_empty() {
        fallback.to_string()
    } else {
        alt.to_string()
    }
}

fn summary(html: &str) -> String {
    truncate_chars(&strip_html(html), SUMMARY_LIMIT)
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
    banners: Vec<Slide>,
    categories: Vec<Card>,
    posts: Vec<Card>,
}

#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
    product: Product,
    images: Vec<String>,
    related: Vec<Card>,
}

#[derive(Template)]
#[template(path = "product_category.html")]
pub struct ProductCategoryPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
    category: ProductCategory,
    products: Vec<Card>,
}

#[derive(Template)]
#[template(path = "blog_post.html")]
pub struct BlogPostPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
    post: News,
    image: String,
    date: String,
    latest: Vec<Card>,
}

#[derive(Template)]
#[template(path = "blog_category.html")]
pub struct BlogCategoryPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
    category: NewsCategory,
    posts: Vec<Card>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
}

#[derive(Template)]
#[template(path = "server_error.html")]
pub struct ServerErrorPage<'a> {
    meta: PageMetadata,
    shell: &'a PageShell,
}

fn render(status: StatusCode, page: impl Template) -> Result<HttpResponse, ApiError> {
    let html = page.render().map_err(|e| ApiError::Internal(anyhow!(e)))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}

fn not_found(settings: &Settings, shell: &PageShell) -> Result<HttpResponse, ApiError> {
    render(
        StatusCode::NOT_FOUND,
        NotFoundPage {
            meta: PageMetadata::not_found(settings),
            shell,
        },
    )
}

fn server_error(settings: &Settings, shell: &PageShell) -> Result<HttpResponse, ApiError> {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        ServerErrorPage {
            meta: PageMetadata::server_error(settings),
            shell,
        },
    )
}

/// Render a loaded page; a missing record becomes the 404 page and a failed
/// fetch the error page.
fn respond<T: Template>(
    settings: &Settings,
    shell: &PageShell,
    slug: &str,
    loaded: anyhow::Result<Option<T>>,
) -> Result<HttpResponse, ApiError> {
    match loaded {
        Ok(Some(page)) => render(StatusCode::OK, page),
        Ok(None) => not_found(settings, shell),
        Err(e) => {
            log::error!("Failed to load page {:?}: {:#}", slug, e);
            server_error(settings, shell)
        }
    }
}

pub async fn home_page(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let settings = &app_state.settings;
    let (shell, banners, posts) = join!(
        load_shell(&app_state),
        or_empty("banners", app_state.banners.active_by_section(BannerSection::Home)),
        or_empty("latest posts", app_state.news.latest_active(HOME_POSTS)),
    );

    let page = HomePage {
        meta: PageMetadata::site_default(settings),
        banners: banners.into_iter().map(|b| Slide::new(settings, b)).collect(),
        categories: shell
            .categories
            .iter()
            .map(|c| Card::category(settings, c))
            .collect(),
        posts: posts.iter().map(|n| Card::post(settings, n)).collect(),
        shell: &shell,
    };
    render(StatusCode::OK, page)
}

/// Catch-all route: classify the slug, then load shell, metadata and content together.
pub async fn dynamic_page(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = normalize_slug(&path.into_inner());
    let page_type = classify(&app_state, &slug).await;
    let settings = &app_state.settings;

    match page_type {
        PageType::Product => {
            let (shell, meta, product) = join!(
                load_shell(&app_state),
                metadata::resolve(&app_state, &slug, page_type),
                load_product(&app_state, &slug),
            );
            let page = product.map(|found| {
                found.map(|(product, related)| ProductPage {
                    meta,
                    shell: &shell,
                    images: product
                        .photo
                        .iter()
                        .filter(|p| !p.trim().is_empty())
                        .map(|p| settings.image_url(p))
                        .collect(),
                    related: related.iter().map(|p| Card::product(settings, p)).collect(),
                    product,
                })
            });
            respond(settings, &shell, &slug, page)
        }
        PageType::ProductCategory => {
            let (shell, meta, loaded) = join!(
                load_shell(&app_state),
                metadata::resolve(&app_state, &slug, page_type),
                async {
                    try_join!(
                        app_state.product_categories.find_by_slug(&slug),
                        app_state.products.active_in_category(&slug),
                    )
                },
            );
            let page = loaded.map(|(category, products)| {
                category.map(|category| ProductCategoryPage {
                    meta,
                    shell: &shell,
                    category,
                    products: products.iter().map(|p| Card::product(settings, p)).collect(),
                })
            });
            respond(settings, &shell, &slug, page)
        }
        PageType::SingleBlog => {
            let (shell, meta, loaded) = join!(
                load_shell(&app_state),
                metadata::resolve(&app_state, &slug, page_type),
                async {
                    try_join!(
                        app_state.news.find_by_slug(&slug),
                        app_state.news.latest_active(SIDEBAR_POSTS + 1),
                    )
                },
            );
            let page = loaded.map(|(post, latest)| {
                post.filter(News::is_active).map(|post| {
                    count_visit(&req, &app_state, &post);
                    BlogPostPage {
                        meta,
                        shell: &shell,
                        image: image(settings, &post.photo),
                        date: post.created_at.map(display_date_from_millis).unwrap_or_default(),
                        latest: latest
                            .iter()
                            .filter(|n| n.slug != post.slug)
                            .take(SIDEBAR_POSTS as usize)
                            .map(|n| Card::post(settings, n))
                            .collect(),
                        post,
                    }
                })
            });
            respond(settings, &shell, &slug, page)
        }
        PageType::Blog => {
            let (shell, meta, loaded) = join!(
                load_shell(&app_state),
                metadata::resolve(&app_state, &slug, page_type),
                async {
                    try_join!(
                        app_state.news_categories.find_by_slug(&slug),
                        app_state.news.active_in_category(&slug),
                    )
                },
            );
            let page = loaded.map(|(category, posts)| {
                category.map(|category| BlogCategoryPage {
                    meta,
                    shell: &shell,
                    category,
                    posts: posts.iter().map(|n| Card::post(settings, n)).collect(),
                })
            });
            respond(settings, &shell, &slug, page)
        }
        PageType::NotFound => not_found(settings, &load_shell(&app_state).await),
        PageType::Error => server_error(settings, &load_shell(&app_state).await),
    }
}

/// An active product and its related products. Related products are optional.
async fn load_product(
    state: &AppState,
    slug: &str,
) -> anyhow::Result<Option<(Product, Vec<Product>)>> {
    let Some(product) = state.products.find_by_slug(slug).await?.filter(Product::is_active) else {
        return Ok(None);
    };
    let related = or_empty(
        "related products",
        state.products.related(&product, RELATED_PRODUCTS),
    )
    .await;
    Ok(Some((product, related)))
}

/// Record the view in the background so the page never waits on the counter.
fn count_visit(req: &HttpRequest, app_state: &web::Data<AppState>, post: &News) {
    let (Some(id), Some(ip)) = (post.id, client_ip(req)) else {
        return;
    };
    let state = app_state.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = record_visit(state.news.as_ref(), &id, &ip).await {
            log::warn!("Failed to record visit for {}: {:#}", id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryStore;
    use crate::db::mongodb::{NEWS, PRODUCTS};
    use crate::models::layout::MenuItem;
    use crate::models::status::Status;
    use crate::routes::routes::init_routes;
    use actix_web::{App, test};
    use std::sync::Arc;
    use std::time::Duration;

    fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        *store.menu.lock().unwrap() = vec![
            MenuItem::new("Home", "/", 0),
            MenuItem::new("Products", "/products", 1),
        ];
        store.add_product_category(ProductCategory::new(
            "Dye Intermediate".into(),
            "dye-intermediate".into(),
        ));
        store.add_product_category(ProductCategory::new("Pigments".into(), "pigments".into()));
        let mut product = Product::new(
            "H-Acid".into(),
            "h-acid".into(),
            vec!["dye-intermediate".into()],
        );
        product.description = "<p>Used in <b>reactive dyes</b></p>".into();
        store.add_product(product);
        store.add_product(Product::new(
            "Gamma Acid".into(),
            "gamma-acid".into(),
            vec!["dye-intermediate".into()],
        ));
        let mut retired = Product::new("J-Acid".into(), "j-acid".into(), vec![]);
        retired.status = Status::Inactive;
        store.add_product(retired);
        store.add_news_category(NewsCategory::new("Industry".into(), "industry".into()));
        store.add_news_category(NewsCategory::new("Events".into(), "events".into()));
        store.add_news(News::new(
            "Market Update".into(),
            "market-update".into(),
            vec!["industry".into()],
        ));
        store
    }

    fn data(store: Arc<MemoryStore>) -> web::Data<AppState> {
        web::Data::new(AppState::new(Settings::default(), store))
    }

    async fn get(store: Arc<MemoryStore>, uri: &str) -> (StatusCode, String) {
        let app = test::init_service(App::new().app_data(data(store)).configure(init_routes)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn home_renders_categories_and_posts() {
        let (status, body) = get(store(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Dye Intermediate"));
        assert!(body.contains("Market Update"));
        assert!(body.contains("submenu"));
    }

    #[actix_web::test]
    async fn product_page_lists_related_products() {
        let (status, body) = get(store(), "/h-acid").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>H-Acid</title>"));
        assert!(body.contains("<b>reactive dyes</b>"));
        assert!(body.contains("Related Products"));
        assert!(body.contains("Gamma Acid"));
    }

    #[actix_web::test]
    async fn inactive_product_renders_404() {
        let (status, body) = get(store(), "/j-acid").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Back to home"));
    }

    #[actix_web::test]
    async fn unknown_slug_renders_404() {
        let (status, body) = get(store(), "/no-such-page/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page Not Found"));
    }

    #[actix_web::test]
    async fn empty_category_says_so() {
        let (status, body) = get(store(), "/pigments").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No products found"));

        let (status, body) = get(store(), "/events").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No posts found"));
    }

    #[actix_web::test]
    async fn lookup_failure_renders_error_page() {
        let store = store();
        store.fail(PRODUCTS);
        let (status, body) = get(store, "/h-acid").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Server Error"));
    }

    #[actix_web::test]
    async fn blog_post_records_the_visit() {
        let store = store();
        let app = test::init_service(
            App::new()
                .app_data(data(store.clone()))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/market-update")
            .insert_header(("X-Forwarded-For", "198.51.100.4"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let counted = tokio::time::timeout(Duration::from_secs(5), async {
            while store.news.lock().unwrap()[0].visits == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(counted.is_ok(), "visit was never recorded");
        let news = store.news.lock().unwrap();
        assert_eq!(news[0].visits, 1);
        assert_eq!(news[0].viewed_ips, vec!["198.51.100.4".to_string()]);
    }

    #[actix_web::test]
    async fn news_outage_renders_error_page() {
        let store = store();
        store.fail(NEWS);
        let (status, body) = get(store, "/market-update").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Server Error"));
    }
}
