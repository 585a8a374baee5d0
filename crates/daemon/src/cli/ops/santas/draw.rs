use clap::Args;

use common::prelude::{compute_santas, Passphrase, SantaError};
use common::participant::parse_list;

use super::compute::format_matching;
use wichtel_daemon::http_server::api::v0::santas::MatchEntry;

/// Run a draw locally without a daemon.
///
/// Tokens are sealed under the given passphrase, so a daemon started with the
/// same passphrase can reveal them later.
#[derive(Args, Debug, Clone)]
pub struct Draw {
    /// Shared passphrase to seal tokens under
    #[arg(long, env = "WICHTEL_PASSWORD", hide_env_values = true)]
    pub passphrase: String,

    /// Participant name; repeat once per participant
    #[arg(long = "participant")]
    pub participants: Vec<String>,

    /// Read participants from a file (JSON array or one name per line)
    #[arg(long, conflicts_with = "participants")]
    pub file: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("failed to read participants: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Santa(#[from] SantaError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Draw {
    type Error = DrawError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let passphrase = Passphrase::new(&self.passphrase);
        let names: Vec<String> = match &self.file {
            Some(path) => parse_list(&std::fs::read_to_string(path)?)
                .into_iter()
                .map(|p| p.into_inner())
                .collect(),
            None => self.participants.clone(),
        };

        let matching: Vec<MatchEntry> = compute_santas(&names, &passphrase)
            .await?
            .into_iter()
            .map(|assignment| MatchEntry {
                giver: assignment.giver.into_inner(),
                token: assignment.token.into_inner(),
                link: None,
            })
            .collect();

        Ok(format_matching(&matching))
    }
}
