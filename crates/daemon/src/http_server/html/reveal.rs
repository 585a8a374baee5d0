use askama_axum::IntoResponse;
use axum::extract::{Form, State};
use serde::Deserialize;
use tracing::instrument;

use common::prelude::{check_assignment, Reveal};

use super::index::{IndexTemplate, RevealOutcome};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct RevealForm {
    pub name: String,
    /// The token; the field keeps the name used in share links
    pub password: String,
}

#[instrument(skip(state, form))]
pub async fn handler(
    State(state): State<ServiceState>,
    Form(form): Form<RevealForm>,
) -> askama_axum::Response {
    let outcome = match check_assignment(&form.name, &form.password, state.passphrase()) {
        Reveal::Recipient(name) => RevealOutcome::Recipient(name),
        Reveal::Invalid => RevealOutcome::Invalid,
    };

    IndexTemplate {
        name: form.name,
        token: form.password,
        reveal: Some(outcome),
        ..Default::default()
    }
    .into_response()
}
