use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::{authorize_admin, compute_santas, SantaError};

use super::share_link;
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ComputeRequest {
    /// Admin passphrase (must match the daemon's passphrase)
    #[arg(long, env = "WICHTEL_PASSWORD", hide_env_values = true)]
    pub admin_passphrase: String,

    /// Participant name; repeat once per participant
    #[arg(long = "participant", required = true)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub matching: Vec<MatchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub giver: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Url>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<ComputeRequest>,
) -> Result<impl IntoResponse, ComputeError> {
    tracing::info!(
        "COMPUTE: Received draw request with {} names",
        req.participants.len()
    );

    authorize_admin(&req.admin_passphrase, state.passphrase())?;
    let matching = draw(&state, &req.participants).await?;

    tracing::info!("COMPUTE: Issued {} tokens", matching.len());
    Ok((
        http::StatusCode::CREATED,
        Json(ComputeResponse { matching }),
    )
        .into_response())
}

/// Run a draw under the daemon's passphrase and attach share links.
pub(crate) async fn draw(
    state: &ServiceState,
    participants: &[String],
) -> Result<Vec<MatchEntry>, SantaError> {
    let assignments = compute_santas(participants, state.passphrase()).await?;

    Ok(assignments
        .into_iter()
        .map(|assignment| {
            let giver = assignment.giver.into_inner();
            let token = assignment.token.into_inner();
            let link = state
                .public_url()
                .map(|base| share_link(base, &giver, &token));
            MatchEntry { giver, token, link }
        })
        .collect())
}

#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error(transparent)]
    Santa(#[from] SantaError),
}

impl IntoResponse for ComputeError {
    fn into_response(self) -> Response {
        let ComputeError::Santa(err) = self;
        match err {
            SantaError::Unauthorized => {
                (http::StatusCode::UNAUTHORIZED, err.to_string()).into_response()
            }
            SantaError::Pairing(_) => {
                tracing::warn!("COMPUTE ERROR: {}", err);
                (http::StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            _ => {
                tracing::error!("COMPUTE ERROR: {:?}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to compute santas: {}", err),
                )
                    .into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for ComputeRequest {
    type Response = ComputeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/api/v0/santas/compute")?;
        Ok(client.post(full_url).json(&self))
    }
}

#[cfg(test)]
mod tests {
    use common::prelude::PairingError;

    use super::*;

    #[test]
    fn test_pairing_errors_are_bad_requests() {
        let errors = [
            PairingError::TooFewParticipants { count: 1 },
            PairingError::Exhausted { attempts: 500 },
        ];
        for err in errors {
            let response = ComputeError::from(SantaError::from(err)).into_response();
            assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_unauthorized() {
        let response = ComputeError::from(SantaError::Unauthorized).into_response();
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
    }
}
