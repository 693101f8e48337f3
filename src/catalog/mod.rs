use crate::state::AppState;
use axum::Router;

pub mod client;
pub mod featured;
pub mod handlers;
pub mod types;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::read_routes())
}
