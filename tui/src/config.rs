use std::path::PathBuf;

use clap::Parser;
use comms::transport::client::DEFAULT_SERVER_URL;

/// Terminal client for finding and creating DriveChat rooms
#[derive(Parser, Debug)]
#[command(name = "drivechat", version, about)]
pub struct Cli {
    /// Base URL of the DriveChat backend
    #[arg(long, env = "DRIVECHAT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Prefills the username field
    #[arg(long, env = "DRIVECHAT_USERNAME")]
    pub username: Option<String>,

    /// Where logs are written, the terminal itself is taken by the ui
    #[arg(long, env = "DRIVECHAT_LOG_FILE", default_value = "drivechat.log")]
    pub log_file: PathBuf,
}
