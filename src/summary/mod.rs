use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod fasting;
pub mod handlers;
pub mod repo;
pub mod rules;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
