use actix_web::{HttpResponse, web};

use crate::errors::api_error::ApiError;
use crate::services::sitemap::{
    blog_entries, index_entries, pages_entries, product_entries, render_index, render_urlset,
};
use crate::state::app_state::AppState;

fn xml(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(body)
}

pub async fn sitemap_index(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(xml(render_index(&index_entries(&app_state))?))
}

pub async fn sitemap_pages(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let entries = pages_entries(&app_state).await?;
    Ok(xml(render_urlset(&entries)?))
}

pub async fn sitemap_products(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let entries = product_entries(&app_state).await?;
    Ok(xml(render_urlset(&entries)?))
}

pub async fn sitemap_blogs(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let entries = blog_entries(&app_state).await?;
    Ok(xml(render_urlset(&entries)?))
}
