use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::Query;
use serde::Deserialize;
use tracing::instrument;

use crate::http_server::api::v0::santas::MatchEntry;

/// The single page: reveal form, admin form, and whichever result applies
#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Pre-filled participant name
    pub name: String,
    /// Pre-filled token
    pub token: String,
    /// Set after a reveal attempt
    pub reveal: Option<RevealOutcome>,
    /// Set after a successful admin draw
    pub matching: Vec<MatchEntry>,
    /// Explicit admin error (bad password, too few names)
    pub admin_error: Option<String>,
}

pub enum RevealOutcome {
    Recipient(String),
    Invalid,
}

/// Share links carry `name` and `password` (the token) as query parameters
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[instrument(skip(query))]
pub async fn handler(Query(query): Query<IndexQuery>) -> askama_axum::Response {
    IndexTemplate {
        name: query.name,
        token: query.password,
        ..Default::default()
    }
    .into_response()
}
