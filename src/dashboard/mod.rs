use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod stats;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
