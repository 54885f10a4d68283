use crate::fs::{ByteSizeProbe, FsByteSizeProbe};
use crate::log::config::{LoggerOptions, LoggerRegistryConfig};
use crate::log::error::{ModLogError, Result};
use crate::log::logger::ModLogger;
use crate::log::strategy::LoggerStrategy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 已注册日志器的描述信息，供宿主程序诊断使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerInfo {
    pub name: String,
    pub folder_path: PathBuf,
    pub strategy: LoggerStrategy,
    pub max_size: u64,
}

/// 注册表的共享状态，日志器通过弱引用在销毁时移除自身
pub(crate) struct RegistryShared {
    loggers: Mutex<HashMap<String, Arc<ModLogger>>>,
    default_folder_path: PathBuf,
    default_strategy: LoggerStrategy,
    default_max_size: AtomicU64,
    probe: Arc<dyn ByteSizeProbe>,
}

impl RegistryShared {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<ModLogger>>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 只有注册表中的实例就是 `logger` 本身时才移除
    pub(crate) fn remove_instance(&self, name: &str, logger: &ModLogger) {
        let mut loggers = self.lock();
        if let Some(current) = loggers.get(name) {
            if std::ptr::eq(Arc::as_ptr(current), logger) {
                loggers.remove(name);
            }
        }
    }
}

/// 日志器注册表
///
/// 维护名称到 [`ModLogger`] 的映射，保证同一名称同一时刻最多只有一个实例。
/// 注册表锁只保护映射的查找/修改和文件夹校验，不会在持锁时写日志文件。
///
/// # 示例
///
/// ```no_run
/// use modlog::log::{LoggerRegistry, LoggerStrategy};
///
/// let registry = LoggerRegistry::default();
/// let logger = registry
///     .get_or_create("RaidRecord", LoggerStrategy::SingleFile, "logs", 0)
///     .unwrap();
/// println!("{}", logger.info("日志初始化完毕", None).unwrap());
/// ```
#[derive(Clone)]
pub struct LoggerRegistry {
    shared: Arc<RegistryShared>,
}

impl LoggerRegistry {
    /// 从配置创建注册表，并创建配置中预定义的日志器
    pub fn new(config: LoggerRegistryConfig) -> Result<Self> {
        Self::with_probe(config, Arc::new(FsByteSizeProbe))
    }

    /// 使用自定义的文件尺寸探测器创建注册表
    pub fn with_probe(config: LoggerRegistryConfig, probe: Arc<dyn ByteSizeProbe>) -> Result<Self> {
        validate_max_size(config.default_max_size)?;
        let registry = Self::from_parts(&config, probe);
        for (name, options) in &config.loggers {
            registry.get_or_create_with(name, options)?;
        }
        Ok(registry)
    }

    fn from_parts(config: &LoggerRegistryConfig, probe: Arc<dyn ByteSizeProbe>) -> Self {
        Self {
            shared: Arc::new(RegistryShared {
                loggers: Mutex::new(HashMap::new()),
                default_folder_path: PathBuf::from(&config.default_folder_path),
                default_strategy: config.default_strategy,
                default_max_size: AtomicU64::new(config.default_max_size),
                probe,
            }),
        }
    }

    /// 获取指定名称的日志器，不存在时创建
    ///
    /// 查找和创建是两个独立的临界区：两个线程同时创建同一个新名称时，
    /// 后插入的一方会得到 `NameAlreadyExists`，需要重新查找。
    /// `max_size` 为 0 时使用注册表的默认上限。
    pub fn get_or_create(
        &self,
        name: &str,
        strategy: LoggerStrategy,
        folder_path: impl AsRef<Path>,
        max_size: u64,
    ) -> Result<Arc<ModLogger>> {
        if let Some(logger) = self.get(name) {
            return Ok(logger);
        }
        self.create(name, strategy, folder_path, max_size)
    }

    /// 按选项获取或创建日志器，未指定的项使用注册表默认值
    pub fn get_or_create_with(&self, name: &str, options: &LoggerOptions) -> Result<Arc<ModLogger>> {
        let strategy = options.strategy.unwrap_or(self.shared.default_strategy);
        let folder_path = options
            .folder_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.shared.default_folder_path.clone());
        self.get_or_create(name, strategy, folder_path, options.max_size)
    }

    /// 创建并注册新的日志器
    ///
    /// 名称已存在时返回 `NameAlreadyExists`；路径是文件时返回 `PathIsFile`；
    /// 文件夹不存在时自动创建
    pub fn create(
        &self,
        name: &str,
        strategy: LoggerStrategy,
        folder_path: impl AsRef<Path>,
        max_size: u64,
    ) -> Result<Arc<ModLogger>> {
        let mut loggers = self.shared.lock();
        if loggers.contains_key(name) {
            return Err(ModLogError::NameAlreadyExists {
                name: name.to_string(),
            });
        }

        let folder_path = prepare_folder(folder_path.as_ref())?;
        let max_size = if max_size == 0 {
            self.default_max_size()
        } else {
            max_size
        };

        let logger = Arc::new(ModLogger::new(
            name.to_string(),
            folder_path,
            strategy,
            max_size,
            Arc::clone(&self.shared.probe),
            Arc::downgrade(&self.shared),
        ));
        loggers.insert(name.to_string(), Arc::clone(&logger));

        tracing::debug!(
            logger = %name,
            folder = %logger.folder_path().display(),
            strategy = %strategy,
            max_size,
            "mod logger created"
        );
        Ok(logger)
    }

    /// 获取指定名称的日志器，不会创建
    pub fn get(&self, name: &str) -> Option<Arc<ModLogger>> {
        self.shared.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shared.lock().contains_key(name)
    }

    /// 注册的日志器数量
    pub fn count(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.shared.lock().keys().cloned().collect()
    }

    /// 当前所有日志器的快照
    pub fn snapshot(&self) -> Vec<(String, Arc<ModLogger>)> {
        self.shared
            .lock()
            .iter()
            .map(|(name, logger)| (name.clone(), Arc::clone(logger)))
            .collect()
    }

    /// 当前所有日志器的描述信息
    pub fn describe(&self) -> Vec<LoggerInfo> {
        self.shared
            .lock()
            .values()
            .map(|logger| logger.describe())
            .collect()
    }

    /// 销毁并移除指定名称的日志器，名称不存在时返回 false
    ///
    /// 由实例自身的销毁流程移除注册项，保证写入流关闭前名称不会被复用
    pub fn remove(&self, name: &str) -> bool {
        match self.get(name) {
            Some(logger) => {
                logger.dispose();
                true
            }
            None => false,
        }
    }

    /// 销毁所有已注册的日志器
    pub fn dispose_all(&self) {
        // 日志器销毁时会获取注册表锁，这里不能持锁
        let loggers: Vec<Arc<ModLogger>> = self.shared.lock().values().cloned().collect();
        for logger in loggers {
            logger.dispose();
        }
    }

    /// `max_size` 为 0 时使用的默认上限
    pub fn default_max_size(&self) -> u64 {
        self.shared.default_max_size.load(Ordering::Relaxed)
    }

    /// 修改默认上限，只影响之后创建的日志器
    ///
    /// 上限为 0 时返回 `Config` 错误并保留原值
    pub fn set_default_max_size(&self, max_size: u64) -> Result<()> {
        validate_max_size(max_size)?;
        self.shared.default_max_size.store(max_size, Ordering::Relaxed);
        Ok(())
    }

    pub fn default_folder_path(&self) -> &Path {
        &self.shared.default_folder_path
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::from_parts(&LoggerRegistryConfig::default(), Arc::new(FsByteSizeProbe))
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .field("default_folder_path", &self.shared.default_folder_path)
            .field("default_max_size", &self.default_max_size())
            .finish()
    }
}

fn validate_max_size(max_size: u64) -> Result<()> {
    if max_size == 0 {
        return Err(ModLogError::Config("default_max_size 必须大于 0".to_string()));
    }
    Ok(())
}

/// 校验日志文件夹：路径是文件时报错，不存在时创建，返回绝对路径
fn prepare_folder(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Err(ModLogError::PathIsFile {
            path: path.to_path_buf(),
        });
    }
    std::fs::create_dir_all(path).map_err(|e| ModLogError::io(path, e))?;
    dunce::canonicalize(path).map_err(|e| ModLogError::io(path, e))
}
