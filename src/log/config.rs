use crate::log::error::{ModLogError, Result};
use crate::log::strategy::LoggerStrategy;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::collections::HashMap;

/// 默认的日志文件夹
pub const DEFAULT_LOG_FOLDER_PATH: &str = "user/mods/SuntionCore/ModLogs";

/// 默认的日志文件大小上限：1 MiB
pub const DEFAULT_LOG_FILE_MAX_SIZE: u64 = 1024 * 1024;

/// 单个日志器的创建选项
///
/// 未指定的项使用注册表的默认值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// 记录策略
    pub strategy: Option<LoggerStrategy>,
    /// 日志文件夹路径
    pub folder_path: Option<String>,
    /// 日志文件大小上限（字节），0 表示使用默认值
    pub max_size: u64,
}

/// LoggerRegistry 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LoggerRegistryConfig {
    /// 未指定文件夹时使用的路径
    #[default(DEFAULT_LOG_FOLDER_PATH.to_string())]
    pub default_folder_path: String,

    /// `max_size` 为 0 时使用的上限，必须大于 0
    #[default(DEFAULT_LOG_FILE_MAX_SIZE)]
    pub default_max_size: u64,

    /// 未指定策略时使用的策略
    pub default_strategy: LoggerStrategy,

    /// 注册表创建时即创建的日志器
    pub loggers: HashMap<String, LoggerOptions>,
}

impl LoggerRegistryConfig {
    /// 从 JSON 字符串创建配置（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        json5::from_str(json_str).map_err(|e| ModLogError::Config(e.to_string()))
    }

    /// 从 YAML 字符串创建配置
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ModLogError::Config(e.to_string()))
    }

    /// 从 TOML 字符串创建配置
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ModLogError::Config(e.to_string()))
    }
}
