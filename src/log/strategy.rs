use crate::log::error::{ModLogError, Result};
use crate::log::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ModLogger 记录日志的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoggerStrategy {
    /// 单文件日志: `<name>.log`
    #[default]
    SingleFile,
    /// 多文件日志: 每个级别一个文件
    MultiFile,
}

impl FromStr for LoggerStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "singlefile" | "single" => Ok(LoggerStrategy::SingleFile),
            "multifile" | "multi" => Ok(LoggerStrategy::MultiFile),
            _ => Err(format!("invalid logger strategy: {}", s)),
        }
    }
}

impl fmt::Display for LoggerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerStrategy::SingleFile => f.write_str("SingleFile"),
            LoggerStrategy::MultiFile => f.write_str("MultiFile"),
        }
    }
}

/// 写入流的种类，每种对应一个日志文件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// SingleFile 策略下所有级别共用的流
    SingleFile,
    Info,
    Warning,
    Error,
    Debug,
}

const MULTI_FILE_KINDS: &str = "Info+Warning+Error+Debug";

impl StreamKind {
    /// 根据日志级别和策略解析目标流
    pub fn resolve(level: LogLevel, strategy: LoggerStrategy) -> Self {
        match strategy {
            LoggerStrategy::SingleFile => StreamKind::SingleFile,
            LoggerStrategy::MultiFile => match level {
                LogLevel::Info => StreamKind::Info,
                LogLevel::Warn => StreamKind::Warning,
                LogLevel::Debug => StreamKind::Debug,
                LogLevel::Error => StreamKind::Error,
            },
        }
    }

    /// 流对应的文件名（不含目录）
    ///
    /// 流种类与策略不匹配时返回 `UnsupportedStreamKind`
    pub fn file_name(&self, logger_name: &str, strategy: LoggerStrategy) -> Result<String> {
        match (strategy, self) {
            (LoggerStrategy::SingleFile, StreamKind::SingleFile) => Ok(format!("{}.log", logger_name)),
            (LoggerStrategy::SingleFile, _) => Err(ModLogError::UnsupportedStreamKind {
                param: "kind",
                value: self.to_string(),
                location: "StreamKind::file_name",
                range: "SingleFile",
            }),
            (LoggerStrategy::MultiFile, StreamKind::Info) => Ok(format!("{}.info.log", logger_name)),
            (LoggerStrategy::MultiFile, StreamKind::Warning) => Ok(format!("{}.warn.log", logger_name)),
            (LoggerStrategy::MultiFile, StreamKind::Error) => Ok(format!("{}.error.log", logger_name)),
            (LoggerStrategy::MultiFile, StreamKind::Debug) => Ok(format!("{}.debug.log", logger_name)),
            (LoggerStrategy::MultiFile, StreamKind::SingleFile) => {
                Err(ModLogError::UnsupportedStreamKind {
                    param: "kind",
                    value: self.to_string(),
                    location: "StreamKind::file_name",
                    range: MULTI_FILE_KINDS,
                })
            }
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamKind::SingleFile => "SingleFile",
            StreamKind::Info => "Info",
            StreamKind::Warning => "Warning",
            StreamKind::Error => "Error",
            StreamKind::Debug => "Debug",
        };
        f.write_str(s)
    }
}
