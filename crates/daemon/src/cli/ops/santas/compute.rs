use wichtel_daemon::http_server::api::client::ApiError;
use wichtel_daemon::http_server::api::v0::santas::{ComputeRequest, ComputeResponse, MatchEntry};

#[async_trait::async_trait]
impl crate::cli::op::Op for ComputeRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response: ComputeResponse = ctx.client.call(self.clone()).await?;
        Ok(format_matching(&response.matching))
    }
}

/// One line per giver; the share link is preferred over the raw token.
pub fn format_matching(matching: &[MatchEntry]) -> String {
    let width = matching
        .iter()
        .map(|m| m.giver.chars().count())
        .max()
        .unwrap_or(0);
    matching
        .iter()
        .map(|m| match &m.link {
            Some(link) => format!("{:<width$}  {}", m.giver, link),
            None => format!("{:<width$}  {}", m.giver, m.token),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
