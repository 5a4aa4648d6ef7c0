use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_NO_UPDATE_CHECK, ENV_PORT, ENV_SMS_ACCESS_KEY,
    ENV_SMS_API_URL, ENV_SMS_ENABLED, ENV_SMS_ORIGINATOR,
};

#[derive(Parser)]
#[command(name = "textdesk")]
#[command(version, about = "SMS Support Desk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (writes incoming webhook data to debug folder)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enable or disable outbound SMS delivery
    #[arg(long, global = true, env = ENV_SMS_ENABLED)]
    pub sms_enabled: Option<bool>,

    /// Access key for the SMS gateway
    #[arg(long, global = true, env = ENV_SMS_ACCESS_KEY)]
    pub sms_access_key: Option<String>,

    /// Originator (sender id or number) for outbound SMS
    #[arg(long, global = true, env = ENV_SMS_ORIGINATOR)]
    pub sms_originator: Option<String>,

    /// SMS gateway messages endpoint URL
    #[arg(long, global = true, env = ENV_SMS_API_URL)]
    pub sms_api_url: Option<String>,

    /// Disable update check on startup
    #[arg(long, global = true, env = ENV_NO_UPDATE_CHECK)]
    pub no_update_check: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// System maintenance commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum SystemCommands {
    /// Delete local data directory (database, debug captures). Requires confirmation.
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub sms_enabled: Option<bool>,
    pub sms_access_key: Option<String>,
    pub sms_originator: Option<String>,
    pub sms_api_url: Option<String>,
    pub no_update_check: bool,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        sms_enabled: cli.sms_enabled,
        sms_access_key: cli.sms_access_key,
        sms_originator: cli.sms_originator,
        sms_api_url: cli.sms_api_url,
        no_update_check: cli.no_update_check,
    };
    (config, cli.command)
}
