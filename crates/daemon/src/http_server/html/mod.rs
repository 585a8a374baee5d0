use axum::routing::{get, post};
use axum::Router;

mod admin;
mod index;
mod reveal;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(index::handler))
        .route("/reveal", post(reveal::handler))
        .route("/admin", post(admin::handler))
        .with_state(state)
}
