use wichtel_daemon::http_server::api::client::ApiError;
use wichtel_daemon::http_server::api::v0::santas::{CheckRequest, CheckResponse};

#[async_trait::async_trait]
impl crate::cli::op::Op for CheckRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response: CheckResponse = ctx.client.call(self.clone()).await?;
        Ok(match response.recipient {
            Some(recipient) => format!("{} gives a present to {}", self.name, recipient),
            None => "Invalid name or token".to_string(),
        })
    }
}
