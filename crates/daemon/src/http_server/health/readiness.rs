use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use crate::ServiceState;

#[tracing::instrument(skip(state))]
pub async fn handler(State(state): State<ServiceState>) -> Response {
    if state.is_ready() {
        let msg = serde_json::json!({"status": "ok"});
        (StatusCode::OK, Json(msg)).into_response()
    } else {
        let msg = serde_json::json!({
            "status": "failure",
            "message": "no passphrase configured"
        });
        (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use common::prelude::Passphrase;

    use super::*;

    #[tokio::test]
    async fn test_handler_direct() {
        let ready = ServiceState::new(Passphrase::new("secret"), None);
        let response = handler(State(ready)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let unready = ServiceState::new(Passphrase::new(""), None);
        let response = handler(State(unready)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
