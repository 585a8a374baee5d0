use clap::{Args, Subcommand};

pub mod check;
pub mod compute;
pub mod draw;

use crate::cli::op::Op;
use wichtel_daemon::http_server::api::v0::santas::{CheckRequest, ComputeRequest};

crate::command_enum! {
    (Compute, ComputeRequest),
    (Check, CheckRequest),
    (Draw, draw::Draw),
}

pub type SantasCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Santas {
    #[command(subcommand)]
    pub command: SantasCommand,
}

#[async_trait::async_trait]
impl Op for Santas {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
