use clap::Args;
use url::Url;

use common::prelude::Passphrase;
use wichtel_daemon::state::{AppConfig, AppState, StateError};
use wichtel_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Shared passphrase for sealing tokens and authorizing draws
    #[arg(long, env = "WICHTEL_PASSWORD", hide_env_values = true)]
    pub passphrase: String,

    /// Override app server port (default from config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Public URL for share links (e.g., https://wichtel.example.com)
    #[arg(long)]
    pub public_url: Option<Url>,

    /// Directory for log files (overrides file logging from config)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),

    #[error("daemon failed: {0}")]
    Failed(#[from] wichtel_daemon::process::ServiceError),
}

impl Daemon {
    fn service_config(&self, state: Option<AppState>) -> ServiceConfig {
        let (config, log_dir) = match state {
            Some(state) => {
                let log_dir = state.log_dir();
                (state.config, log_dir)
            }
            None => (AppConfig::default(), None),
        };

        ServiceConfig {
            app_port: self.port.unwrap_or(config.app_port),
            passphrase: Passphrase::new(&self.passphrase),
            public_url: self.public_url.clone().or(config.public_url),
            log_level: self.log_level,
            log_dir: self.log_dir.clone().or(log_dir),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // An uninitialized state directory is fine; flags and defaults cover it
        let state = match AppState::load(ctx.config_path.clone()) {
            Ok(state) => Some(state),
            Err(StateError::NotInitialized) => None,
            Err(e) => return Err(e.into()),
        };

        let config = self.service_config(state);
        spawn_service(&config).await?;
        Ok("daemon ended".to_string())
    }
}
