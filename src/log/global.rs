//! 全局默认注册表
//!
//! 为不方便传递 [`LoggerRegistry`] 的宿主代码提供便捷函数。
//! 需要隔离状态的场景（例如测试）应直接创建独立的注册表。

use crate::log::config::LoggerRegistryConfig;
use crate::log::error::Result;
use crate::log::logger::ModLogger;
use crate::log::registry::{LoggerInfo, LoggerRegistry};
use crate::log::strategy::LoggerStrategy;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

static GLOBAL_REGISTRY: Lazy<RwLock<LoggerRegistry>> =
    Lazy::new(|| RwLock::new(LoggerRegistry::default()));

/// 使用配置重新初始化全局注册表
///
/// 旧注册表中的日志器会被销毁
pub fn init(config: LoggerRegistryConfig) -> Result<()> {
    let registry = LoggerRegistry::new(config)?;
    let old = {
        let mut global = GLOBAL_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *global, registry)
    };
    old.dispose_all();
    Ok(())
}

/// 获取全局注册表
pub fn global_registry() -> LoggerRegistry {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// 获取或创建日志器（全局）
pub fn get_or_create_logger(
    name: &str,
    strategy: LoggerStrategy,
    folder_path: impl AsRef<Path>,
    max_size: u64,
) -> Result<Arc<ModLogger>> {
    global_registry().get_or_create(name, strategy, folder_path, max_size)
}

/// 获取指定名称的日志器（全局）
pub fn get_logger(name: &str) -> Option<Arc<ModLogger>> {
    global_registry().get(name)
}

/// 注册的日志器数量（全局）
pub fn logger_count() -> usize {
    global_registry().count()
}

/// 所有日志器的描述信息（全局）
pub fn loggers() -> Vec<LoggerInfo> {
    global_registry().describe()
}
