use actix_web::{HttpResponse, web};

use crate::services::page_shell::load_shell;
use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;

/// Header, footer, menu, categories and logo in one payload.
/// Sections that fail to load come back empty.
pub async fn get_layout(state: web::Data<AppState>) -> HttpResponse {
    let shell = load_shell(&state).await;
    HttpResponse::Ok().json(ApiResponse::ok(shell))
}
