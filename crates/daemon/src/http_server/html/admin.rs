use askama_axum::IntoResponse;
use axum::extract::{Form, State};
use serde::Deserialize;
use tracing::instrument;

use common::participant::parse_list;
use common::prelude::{authorize_admin, PairingError, SantaError};

use super::index::IndexTemplate;
use crate::http_server::api::v0::santas::compute::draw;
use crate::http_server::api::v0::santas::MatchEntry;
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct AdminForm {
    #[serde(rename = "adminPwd")]
    pub admin_pwd: String,
    /// JSON array of names, or one name per line
    pub participants: String,
}

#[instrument(skip(state, form))]
pub async fn handler(
    State(state): State<ServiceState>,
    Form(form): Form<AdminForm>,
) -> askama_axum::Response {
    let page = match run(&state, &form).await {
        Ok(matching) => IndexTemplate {
            matching,
            ..Default::default()
        },
        Err(e) => {
            if !matches!(e, SantaError::Unauthorized | SantaError::Pairing(_)) {
                tracing::error!("ADMIN: draw failed: {:?}", e);
            }
            IndexTemplate {
                admin_error: Some(admin_message(&e)),
                ..Default::default()
            }
        }
    };

    page.into_response()
}

async fn run(
    state: &ServiceState,
    form: &AdminForm,
) -> Result<Vec<MatchEntry>, SantaError> {
    authorize_admin(&form.admin_pwd, state.passphrase())?;

    let participants: Vec<String> = parse_list(&form.participants)
        .into_iter()
        .map(|p| p.into_inner())
        .collect();
    draw(state, &participants).await
}

fn admin_message(err: &SantaError) -> String {
    match err {
        SantaError::Unauthorized => "Invalid admin password".to_string(),
        SantaError::Pairing(PairingError::TooFewParticipants { .. }) => {
            "Enter at least two different names".to_string()
        }
        SantaError::Pairing(PairingError::Exhausted { .. }) => {
            "No valid pairing found for these names".to_string()
        }
        _ => "Could not compute the draw, please try again".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_message_for_exhausted_draw() {
        let err = SantaError::from(PairingError::Exhausted { attempts: 500 });
        assert_eq!(admin_message(&err), "No valid pairing found for these names");
    }

    #[test]
    fn test_admin_message_for_unauthorized() {
        assert_eq!(
            admin_message(&SantaError::Unauthorized),
            "Invalid admin password"
        );
    }
}
