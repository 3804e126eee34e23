use std::time::Duration;
use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::logger::LogLevel;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "onevone_server.yaml";

pub type ServerConfigManager = ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer>;

pub fn get_config_manager(path: &str) -> ServerConfigManager {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub log_level: LogLevel,
    pub cleanup: CleanupConfig,
    pub username_policy: UsernamePolicyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            log_level: LogLevel::Info,
            cleanup: CleanupConfig::default(),
            username_policy: UsernamePolicyConfig::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bind_address.trim().is_empty() {
            return Err("bind_address must not be empty".to_string());
        }
        self.cleanup.validate()?;
        self.username_policy.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub check_interval_secs: u64,
    pub session_idle_timeout_secs: u64,
    pub queue_idle_timeout_secs: u64,
}

impl CleanupConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    pub fn queue_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.queue_idle_timeout_secs)
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            session_idle_timeout_secs: 1800,
            queue_idle_timeout_secs: 600,
        }
    }
}

impl Validate for CleanupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.check_interval_secs == 0 {
            return Err("cleanup.check_interval_secs must be positive".to_string());
        }
        if self.session_idle_timeout_secs == 0 {
            return Err("cleanup.session_idle_timeout_secs must be positive".to_string());
        }
        if self.queue_idle_timeout_secs == 0 {
            return Err("cleanup.queue_idle_timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernamePolicyConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub blocked_terms: Vec<String>,
    pub reserved_names: Vec<String>,
}

impl Default for UsernamePolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 24,
            blocked_terms: Vec::new(),
            reserved_names: ["admin", "root", "system", "moderator", "server"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Validate for UsernamePolicyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.min_length == 0 {
            return Err("username_policy.min_length must be at least 1".to_string());
        }
        if self.min_length > self.max_length {
            return Err(format!(
                "username_policy.min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            ));
        }
        Ok(())
    }
}
