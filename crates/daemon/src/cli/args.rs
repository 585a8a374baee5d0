pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "wichtel")]
#[command(about = "Draw secret santa pairings and hand out sealed tokens")]
#[command(version)]
pub struct Args {
    /// Daemon URL (defaults to localhost on the configured app port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the wichtel config directory (defaults to ~/.wichtel)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
