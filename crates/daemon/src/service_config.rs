use std::path::PathBuf;

use common::prelude::Passphrase;
use url::Url;

#[derive(Debug)]
pub struct Config {
    // http server configuration
    /// Port for the App server (UI + API combined)
    pub app_port: u16,

    // secret configuration
    /// Shared passphrase every token is sealed under; also gates the admin draw
    pub passphrase: Passphrase,

    // url configuration
    /// Public base URL (e.g., "https://wichtel.example.com")
    /// Used for generating share links
    pub public_url: Option<Url>,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}
