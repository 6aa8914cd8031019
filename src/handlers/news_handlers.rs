use actix_web::{HttpResponse, web};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::errors::api_error::ApiError;
use crate::models::news::News;
use crate::services::view_counter::{VisitOutcome, record_visit};
use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;
use crate::structs::query_params::{
    CategorySlugQuery, LatestNewsQuery, SlugsQuery, VisitQuery, required,
};

const DEFAULT_LATEST_LIMIT: i64 = 6;

pub async fn get_news_by_slug(
    app_state: web::Data<AppState>,
    query: web::Query<SlugsQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = required(query.slugs.as_deref(), "slugs")?;

    let news = app_state
        .news
        .find_by_slug(&slug)
        .await?
        .filter(News::is_active)
        .ok_or_else(|| ApiError::not_found("News"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(news)))
}

pub async fn get_latest_active_news(
    app_state: web::Data<AppState>,
    query: web::Query<LatestNewsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT);

    let news = app_state.news.latest_active(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(news)))
}

pub async fn get_news_by_category(
    app_state: web::Data<AppState>,
    query: web::Query<CategorySlugQuery>,
) -> Result<HttpResponse, ApiError> {
    let category_slug = required(query.category_slug.as_deref(), "categorySlug")?;

    let news = app_state.news.active_in_category(&category_slug).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(news)))
}

pub async fn get_all_news_categories(
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let categories = app_state.news_categories.all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// Count a blog view at most once per client IP
pub async fn increment_blog_visits(
    app_state: web::Data<AppState>,
    query: web::Query<VisitQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = required(query.id.as_deref(), "id")?;
    let client_ip = required(query.client_ip.as_deref(), "clientIP")?;
    query.validate()?;

    let object_id =
        ObjectId::parse_str(&id).map_err(|_| ApiError::BadRequest("Invalid id format".into()))?;

    match record_visit(app_state.news.as_ref(), &object_id, &client_ip).await? {
        VisitOutcome::Counted(news) => Ok(HttpResponse::Ok()
            .json(ApiResponse::ok(news).with_message("Visit recorded"))),
        VisitOutcome::AlreadyCounted(news) => Ok(HttpResponse::Ok()
            .json(ApiResponse::ok(news).with_message("Visit already recorded for this IP"))),
        VisitOutcome::NotFound => Err(ApiError::not_found("News")),
    }
}
