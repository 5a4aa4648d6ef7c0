use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SMS_API_URL,
    ENV_SMS_ACCESS_KEY, ENV_SMS_ORIGINATOR,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// SMS gateway configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SmsFileConfig {
    pub enabled: Option<bool>,
    pub access_key: Option<String>,
    pub originator: Option<String>,
    pub api_url: Option<String>,
}

/// Update check configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateFileConfig {
    pub enabled: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub sms: Option<SmsFileConfig>,
    pub update: Option<UpdateFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        // Server
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        // SMS
        if let Some(sms) = other.sms {
            let current = self.sms.get_or_insert_with(SmsFileConfig::default);
            if sms.enabled.is_some() {
                tracing::trace!(enabled = ?sms.enabled, "Merging sms.enabled");
                current.enabled = sms.enabled;
            }
            if sms.access_key.is_some() {
                tracing::trace!(access_key = "***", "Merging sms.access_key");
                current.access_key = sms.access_key;
            }
            if sms.originator.is_some() {
                tracing::trace!(originator = ?sms.originator, "Merging sms.originator");
                current.originator = sms.originator;
            }
            if sms.api_url.is_some() {
                tracing::trace!(api_url = ?sms.api_url, "Merging sms.api_url");
                current.api_url = sms.api_url;
            }
        }

        // Update
        if let Some(update) = other.update {
            let current = self.update.get_or_insert_with(UpdateFileConfig::default);
            if update.enabled.is_some() {
                tracing::trace!(enabled = ?update.enabled, "Merging update.enabled");
                current.enabled = update.enabled;
            }
        }

        // Debug
        if other.debug.is_some() {
            tracing::trace!(debug = ?other.debug, "Merging debug");
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// SMS gateway configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Whether outbound messages are actually delivered
    pub enabled: bool,
    /// Gateway access key (empty when delivery is disabled)
    pub access_key: String,
    /// Sender id or number used as the originator on outbound messages
    pub originator: String,
    /// Messages endpoint of the gateway
    pub api_url: String,
}

/// Update check configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    pub enabled: bool,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sms: SmsConfig,
    pub update: UpdateConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.textdesk/textdesk.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.textdesk/textdesk.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Extract file config values with defaults
        let file_server = file_config.server.unwrap_or_default();
        let file_sms = file_config.sms.unwrap_or_default();
        let file_update = file_config.update.unwrap_or_default();

        // 4. Layer configs: defaults -> file config -> CLI/env overrides
        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        // sms config: CLI/env overrides file config, delivery off until credentials are set
        let sms_enabled = cli.sms_enabled.or(file_sms.enabled).unwrap_or(false);
        let sms_access_key = cli
            .sms_access_key
            .clone()
            .or(file_sms.access_key)
            .unwrap_or_default();
        let sms_originator = cli
            .sms_originator
            .clone()
            .or(file_sms.originator)
            .unwrap_or_default();
        let sms_api_url = cli
            .sms_api_url
            .clone()
            .or(file_sms.api_url)
            .unwrap_or_else(|| DEFAULT_SMS_API_URL.to_string());

        // update config: CLI flag overrides file config, default enabled
        let update_enabled = if cli.no_update_check {
            false
        } else {
            file_update.enabled.unwrap_or(true)
        };

        // debug: CLI/env flag takes precedence, then file config, default false
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            sms: SmsConfig {
                enabled: sms_enabled,
                access_key: sms_access_key,
                originator: sms_originator,
                api_url: sms_api_url,
            },
            update: UpdateConfig {
                enabled: update_enabled,
            },
            debug,
        };

        // Validate configuration
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            debug = config.debug,
            sms_enabled = config.sms.enabled,
            sms_api_url = %config.sms.api_url,
            update_enabled = config.update.enabled,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        // Host must not be empty
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port must be non-zero (port 0 would cause bind failure)
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.sms.enabled {
            if self.sms.access_key.is_empty() {
                anyhow::bail!(
                    "Configuration error: sms.access_key is required when sms.enabled is true. \
                     Set via {} env var or sms.access_key in config file.",
                    ENV_SMS_ACCESS_KEY
                );
            }
            if self.sms.originator.is_empty() {
                anyhow::bail!(
                    "Configuration error: sms.originator is required when sms.enabled is true. \
                     Set via {} env var or sms.originator in config file.",
                    ENV_SMS_ORIGINATOR
                );
            }
            if !self.sms.api_url.starts_with("http://")
                && !self.sms.api_url.starts_with("https://")
            {
                anyhow::bail!(
                    "Configuration error: sms.api_url must start with http:// or https://. Got: {}",
                    self.sms.api_url
                );
            }
        } else {
            tracing::warn!(
                "Outbound SMS is disabled. Ticket confirmations and replies will be logged \
                 but not delivered."
            );
        }

        // Security warning: the admin view has no authentication
        if is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                "Binding to all network interfaces. The admin view is unauthenticated and \
                 will be reachable from your network."
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.textdesk/textdesk.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
