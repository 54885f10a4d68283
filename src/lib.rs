//! ModLog - 组件级本地日志库
//!
//! 为宿主程序中的各个组件（模组）提供独立于宿主日志系统的本地文件日志。
//!
//! ## 模块
//!
//! - **log**: 日志器注册表、按级别的文件写入流管理、按大小轮转
//! - **fs**: 文件尺寸探测与格式化
//!
//! ## 设计理念
//!
//! - 🔒 **线程安全**: 注册表和每个日志器各自持有独立的锁
//! - 💾 **持久优先**: 每条日志写入后立即刷新
//! - 🧪 **可隔离**: 注册表是普通对象，测试中可以各自创建

pub mod fs;
pub mod log;

// 重新导出主要的公共 API
pub use fs::{calc_file_size, format_file_size, ByteSizeProbe, FsByteSizeProbe};

pub use log::{
    ErrorInfo, LogLevel, LoggerInfo, LoggerOptions, LoggerRegistry, LoggerRegistryConfig,
    LoggerStrategy, ModLogError, ModLogger, StreamKind,
};
