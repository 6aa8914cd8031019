use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::errors::api_error::ApiError;
use crate::services::metadata;
use crate::services::slug_router::{PageType, all_slugs, classify, normalize_slug};
use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;
use crate::structs::query_params::{SlugQuery, required};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub slug: String,
    pub page_type: PageType,
}

pub async fn get_all_slugs(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let slugs = all_slugs(&app_state).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(slugs)))
}

pub async fn classify_slug(
    app_state: web::Data<AppState>,
    query: web::Query<SlugQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = normalize_slug(&required(query.slug.as_deref(), "slug")?);
    let page_type = classify(&app_state, &slug).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(Classification { slug, page_type })))
}

/// SEO metadata for any slug; unknown slugs get the not-found metadata
pub async fn get_meta(
    app_state: web::Data<AppState>,
    query: web::Query<SlugQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = normalize_slug(&required(query.slug.as_deref(), "slug")?);
    let page_type = classify(&app_state, &slug).await;
    let meta = metadata::resolve(&app_state, &slug, page_type).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(meta)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::db::memory_store::MemoryStore;
    use crate::db::mongodb::NEWS_CATEGORIES;
    use crate::models::news_category::NewsCategory;
    use crate::models::product::Product;
    use crate::models::product_category::ProductCategory;
    use crate::models::status::Status;
    use crate::routes::routes::init_routes;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        let mut product = Product::new("H-Acid".into(), "h-acid".into(), vec![]);
        product.metatitle = "H-Acid Manufacturer".into();
        store.add_product(product);
        store.add_product_category(ProductCategory::new(
            "Dye Intermediate".into(),
            "dye-intermediate".into(),
        ));
        store.add_news_category(NewsCategory::new("Industry".into(), "industry".into()));
        store.add_news_category(NewsCategory::new("Empty".into(), "".into()));
        store
    }

    fn data(store: Arc<MemoryStore>) -> web::Data<AppState> {
        web::Data::new(AppState::new(Settings::default(), store))
    }

    #[actix_web::test]
    async fn lists_all_slugs() {
        let app = test::init_service(App::new().app_data(data(store())).configure(init_routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dynamicSlug/getAllSlugs")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["productSlugs"], serde_json::json!(["h-acid"]));
        assert_eq!(body["data"]["productCategorySlugs"], serde_json::json!(["dye-intermediate"]));
        assert_eq!(body["data"]["newsSlugs"], serde_json::json!([]));
        assert_eq!(body["data"]["newsCategorySlugs"], serde_json::json!(["industry"]));
    }

    #[actix_web::test]
    async fn slug_list_failure_is_500() {
        let store = store();
        store.fail(NEWS_CATEGORIES);
        let app = test::init_service(App::new().app_data(data(store)).configure(init_routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dynamicSlug/getAllSlugs")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn classifies_slugs() {
        let app = test::init_service(App::new().app_data(data(store())).configure(init_routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/dynamicSlug/classify?slug=dye-intermediate")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pageType"], "product-category");

        let req = test::TestRequest::get()
            .uri("/api/dynamicSlug/classify?slug=unknown")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pageType"], "404");
    }

    #[actix_web::test]
    async fn meta_uses_record_seo_fields() {
        let app = test::init_service(App::new().app_data(data(store())).configure(init_routes)).await;
        let req = test::TestRequest::get().uri("/api/meta?slug=h-acid").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "H-Acid Manufacturer");
        assert_eq!(body["data"]["canonical"], "http://localhost:8080/h-acid");
        assert_eq!(body["data"]["openGraph"]["type"], "website");
    }

    #[actix_web::test]
    async fn meta_of_an_inactive_product_is_the_site_default() {
        let store = store();
        let mut hidden = Product::new("J-Acid".into(), "j-acid".into(), vec![]);
        hidden.metatitle = "J-Acid Supplier".into();
        hidden.status = Status::Inactive;
        store.add_product(hidden);
        let app = test::init_service(App::new().app_data(data(store)).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/meta?slug=j-acid").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], Settings::default().default_title);
        assert_ne!(body["data"]["title"], "J-Acid Supplier");
    }

    #[actix_web::test]
    async fn meta_requires_slug() {
        let app = test::init_service(App::new().app_data(data(store())).configure(init_routes)).await;
        let req = test::TestRequest::get().uri("/api/meta").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
