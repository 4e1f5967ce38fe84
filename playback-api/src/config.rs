//! Command-line surface for playback-api
//!
//! Flags mirror the resolution order in playback-common: anything given
//! here wins over environment variables and the TOML config file.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "playback-api", about = "PlayBack backend service", version)]
pub struct Args {
    /// Data folder (database lives here); overrides PLAYBACK_DATA
    #[arg(long)]
    pub data_folder: Option<String>,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "PLAYBACK_BIND")]
    pub bind: String,

    /// Listen port
    #[arg(long, default_value_t = 5728, env = "PLAYBACK_PORT")]
    pub port: u16,

    /// Catalog API client id
    #[arg(long, env = "PLAYBACK_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Catalog API client secret
    #[arg(long, env = "PLAYBACK_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Frontend origin allowed to send credentialed requests
    #[arg(
        long,
        default_value = "http://localhost:5173",
        env = "PLAYBACK_FRONTEND_ORIGIN"
    )]
    pub frontend_origin: String,
}
