//! 同步任务运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 同步任务运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub protocol_name: String,
    pub protocol_version: String,
    pub resource_pool_name: String,
    pub capability_parameter_name: String,
    pub resource_max_concurrency: u32,
    pub delete_stale_resources: bool,
    pub snapshot_path: String,
    pub state_path: Option<String>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let snapshot_path = env::var("NEURON_SNAPSHOT_PATH")
            .map_err(|_| ConfigError::Missing("NEURON_SNAPSHOT_PATH".to_string()))?;
        let protocol_name = env::var("NEURON_PROTOCOL_NAME")
            .unwrap_or_else(|_| "EVS Neuron NAP - CONVERT".to_string());
        let protocol_version =
            env::var("NEURON_PROTOCOL_VERSION").unwrap_or_else(|_| "Production".to_string());
        let resource_pool_name =
            env::var("NEURON_RESOURCE_POOL").unwrap_or_else(|_| "Processors".to_string());
        let capability_parameter_name = env::var("NEURON_CAPABILITY_PARAMETER")
            .unwrap_or_else(|_| "Linked Source".to_string());
        let resource_max_concurrency =
            read_u32_with_default("NEURON_RESOURCE_MAX_CONCURRENCY", 1000)?;
        let delete_stale_resources = read_bool_with_default("NEURON_DELETE_STALE_RESOURCES", true)?;
        let state_path = read_optional("NEURON_STATE_PATH");

        Ok(Self {
            protocol_name,
            protocol_version,
            resource_pool_name,
            capability_parameter_name,
            resource_max_concurrency,
            delete_stale_resources,
            snapshot_path,
            state_path,
        })
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> Result<bool, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
