use actix_web::{HttpResponse, web};
use serde::Serialize;
use validator::Validate;

use crate::errors::api_error::ApiError;
use crate::models::product::Product;
use crate::models::product_category::ProductCategory;
use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;
use crate::structs::query_params::{CategorySlugQuery, RelatedProductsQuery, SlugsQuery, required};

const DEFAULT_RELATED_LIMIT: i64 = 8;

#[derive(Serialize)]
pub struct CategoryWithProducts {
    pub category: ProductCategory,
    pub products: Vec<Product>,
}

/// Active products of a category, newest first
pub async fn get_products_by_category(
    app_state: web::Data<AppState>,
    query: web::Query<CategorySlugQuery>,
) -> Result<HttpResponse, ApiError> {
    let category_slug = required(query.category_slug.as_deref(), "categorySlug")?;

    let products = app_state.products.active_in_category(&category_slug).await?;
    let message = if products.is_empty() {
        "No products found"
    } else {
        "Products fetched successfully"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(products).with_message(message)))
}

pub async fn get_product_by_slug(
    app_state: web::Data<AppState>,
    query: web::Query<SlugsQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = required(query.slugs.as_deref(), "slugs")?;

    let product = app_state
        .products
        .find_by_slug(&slug)
        .await?
        .filter(Product::is_active)
        .ok_or_else(|| ApiError::not_found("Product"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(product)))
}

pub async fn get_related_products(
    app_state: web::Data<AppState>,
    query: web::Query<RelatedProductsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let slug = required(query.slugs.as_deref(), "slugs")?;
    let limit = query.limit.unwrap_or(DEFAULT_RELATED_LIMIT);

    let product = app_state
        .products
        .find_by_slug(&slug)
        .await?
        .filter(Product::is_active)
        .ok_or_else(|| ApiError::not_found("Product"))?;
    let related = app_state.products.related(&product, limit).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(related)))
}

pub async fn get_all_product_categories(
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let categories = app_state.product_categories.all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// A category together with its active products
pub async fn get_product_category_by_slug(
    app_state: web::Data<AppState>,
    query: web::Query<SlugsQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = required(query.slugs.as_deref(), "slugs")?;

    let (category, products) = futures_util::try_join!(
        app_state.product_categories.find_by_slug(&slug),
        app_state.products.active_in_category(&slug),
    )?;
    let category = category.ok_or_else(|| ApiError::not_found("Product category"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryWithProducts { category, products })))
}
