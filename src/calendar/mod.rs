use crate::state::AppState;
use axum::Router;

mod dto;
pub mod grid;
pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
