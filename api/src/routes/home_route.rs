use axum::Json;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to the Diet Specialist Chatbot";

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// Handler: GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: WELCOME_MESSAGE,
    })
}
