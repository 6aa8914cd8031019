pub mod api_response;
pub mod query_params;
