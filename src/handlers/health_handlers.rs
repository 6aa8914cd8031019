use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;
use crate::structs::api_response::ApiResponse;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // Perform a simple ping operation to check the database connection
    match state.layout.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => {
            log::error!("Health check failed: {:#}", e);
            HttpResponse::InternalServerError().json(ApiResponse::failure(
                "Database connection failed",
                None,
            ))
        }
    }
}
