use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::check_assignment;

use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CheckRequest {
    /// Your name, exactly as the organizer entered it
    #[arg(long)]
    pub name: String,

    /// The token you received
    #[arg(long)]
    pub token: String,
}

/// `recipient` is `null` for every kind of failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub recipient: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<CheckRequest>,
) -> impl IntoResponse {
    let reveal = check_assignment(&req.name, &req.token, state.passphrase());
    tracing::info!("CHECK: valid={}", reveal.is_valid());

    (
        http::StatusCode::OK,
        Json(CheckResponse {
            recipient: reveal.into_recipient(),
        }),
    )
}

// Client implementation - builds request for this operation
impl ApiRequest for CheckRequest {
    type Response = CheckResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/api/v0/santas/check")?;
        Ok(client.post(full_url).json(&self))
    }
}
