use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 日志级别
///
/// 固定四个级别，不支持自定义级别，也不做级别过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// 一般信息
    Info,
    /// 警告信息
    Warn,
    /// 调试信息
    Debug,
    /// 错误信息
    Error,
}

impl LogLevel {
    /// 写入文件时使用的级别标签
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warning",
            LogLevel::Debug => "Debug",
            LogLevel::Error => "Error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "debug" => Ok(LogLevel::Debug),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
