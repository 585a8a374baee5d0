use axum::Router;

pub mod santas;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/santas", santas::router(state.clone()))
        .with_state(state)
}
