use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for pinmap
#[derive(Parser, Debug)]
#[command(
    name = "pinmap",
    version,
    about = "Terminal map for browsing and adding pins on a pin server"
)]
pub struct Cli {
    /// Pin server base URL (overrides `server.base_url` from the config file)
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Config file to use instead of `<state dir>/config.toml`
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file to use instead of `<state dir>/debug.log`
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
