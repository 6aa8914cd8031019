use actix_web::{HttpResponse, web};

use crate::errors::api_error::ApiError;
use crate::models::banner::BannerSection;
use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;
use crate::structs::query_params::{SectionQuery, required};

/// Active banners of a page section, ascending priority
pub async fn get_banners_by_section(
    app_state: web::Data<AppState>,
    query: web::Query<SectionQuery>,
) -> Result<HttpResponse, ApiError> {
    let raw = required(query.section.as_deref(), "section")?;
    let section = BannerSection::parse(&raw)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown banner section: {}", raw)))?;

    let banners = app_state.banners.active_by_section(section).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(banners)))
}
