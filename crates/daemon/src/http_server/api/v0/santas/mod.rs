use axum::routing::post;
use axum::Router;
use url::{form_urlencoded, Url};

use crate::ServiceState;

pub mod check;
pub mod compute;

// Re-export for convenience
pub use check::{CheckRequest, CheckResponse};
pub use compute::{ComputeRequest, ComputeResponse, MatchEntry};

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/compute", post(compute::handler))
        .route("/check", post(check::handler))
        .with_state(state)
}

/// Link a giver can open to land on the page with name and token filled in.
///
/// The token is already percent-encoded and goes in verbatim; the name is
/// form-encoded.
pub fn share_link(public_url: &Url, giver: &str, token: &str) -> Url {
    let name: String = form_urlencoded::byte_serialize(giver.as_bytes()).collect();
    let mut link = public_url.clone();
    link.set_query(Some(&format!("name={}&password={}", name, token)));
    link
}
