pub mod catalog;
mod dto;
pub mod handlers;
pub mod history;
pub mod metrics;
pub mod model;
pub mod store;
pub mod totals;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
