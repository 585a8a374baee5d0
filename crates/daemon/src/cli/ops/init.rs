use clap::Args;
use url::Url;

use wichtel_daemon::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Port for the app server (UI + API)
    #[arg(long, default_value_t = 8080)]
    pub app_port: u16,

    /// Public URL used to build share links
    #[arg(long)]
    pub public_url: Option<Url>,

    /// Write daily log files under the config directory
    #[arg(long)]
    pub file_logging: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            app_port: self.app_port,
            public_url: self.public_url.clone(),
            file_logging: self.file_logging,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let mut output = format!(
            "Initialized wichtel directory at: {}\n",
            state.wichtel_dir.display()
        );
        output.push_str(&format!("  config:   {}\n", state.config_path.display()));
        output.push_str(&format!("  app_port: {}", state.config.app_port));
        if let Some(url) = &state.config.public_url {
            output.push_str(&format!("\n  public:   {}", url));
        }
        Ok(output)
    }
}
