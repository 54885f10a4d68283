//! 模组日志模块
//!
//! 为宿主程序中的各个组件提供独立的本地日志，按名称注册日志器实例，
//! 按级别写入文本文件，并在打开文件时按大小轮转。
//!
//! # 特性
//!
//! - 四个固定级别：Info, Warn, Debug, Error
//! - 两种记录策略：SingleFile（单文件）、MultiFile（每个级别一个文件）
//! - 打开写入流时检查文件大小，超出上限则删除重建
//! - 每次写入立即刷新到磁盘
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use modlog::log::*;
//!
//! fn main() -> Result<()> {
//!     let registry = LoggerRegistry::new(LoggerRegistryConfig::from_json(r#"
//!         {
//!             default_folder_path: "logs",
//!             default_max_size: 1048576,
//!         }
//!     "#)?)?;
//!
//!     let logger = registry.get_or_create("ItemCreator", LoggerStrategy::MultiFile, "logs", 0)?;
//!
//!     logger.info("Application started", None)?;
//!     let err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
//!     let line = logger.error("Connection failed", Some(&ErrorInfo::from_error(&err)))?;
//!     println!("{}", line);
//!
//!     logger.dispose();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod level;
pub mod log_record;
pub mod logger;
pub mod registry;
pub mod rotation;
pub mod stream_manager;
pub mod strategy;

pub use config::{
    LoggerOptions, LoggerRegistryConfig, DEFAULT_LOG_FILE_MAX_SIZE, DEFAULT_LOG_FOLDER_PATH,
};
pub use error::{ModLogError, Result};
pub use global::{get_logger, get_or_create_logger, global_registry, init, logger_count, loggers};
pub use level::LogLevel;
pub use log_record::{ErrorInfo, LogRecord};
pub use logger::ModLogger;
pub use registry::{LoggerInfo, LoggerRegistry};
pub use rotation::RotationPolicy;
pub use stream_manager::{LogWriter, StreamManager};
pub use strategy::{LoggerStrategy, StreamKind};
