use crate::fs::ByteSizeProbe;
use crate::log::error::Result;
use crate::log::level::LogLevel;
use crate::log::log_record::{ErrorInfo, LogRecord};
use crate::log::registry::{LoggerInfo, RegistryShared};
use crate::log::rotation::RotationPolicy;
use crate::log::stream_manager::StreamManager;
use crate::log::strategy::{LoggerStrategy, StreamKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// 模组日志器
///
/// 在指定文件夹下记录独立于宿主程序的详细日志，方便测试和调试。
/// 只能通过 [`LoggerRegistry`](crate::log::LoggerRegistry) 创建。
///
/// 每次写入都持有实例锁，流的解析、轮转检查、写入和刷新作为一个整体执行；
/// 不同实例之间互不阻塞。
///
/// 写入流在首次使用时打开，直到 [`dispose`](Self::dispose) 或实例被释放时才关闭。
pub struct ModLogger {
    name: String,
    folder_path: PathBuf,
    strategy: LoggerStrategy,
    max_size: u64,
    disposed: AtomicBool,
    streams: Mutex<StreamManager>,
    registry: Weak<RegistryShared>,
}

impl ModLogger {
    pub(crate) fn new(
        name: String,
        folder_path: PathBuf,
        strategy: LoggerStrategy,
        max_size: u64,
        probe: Arc<dyn ByteSizeProbe>,
        registry: Weak<RegistryShared>,
    ) -> Self {
        let streams = StreamManager::new(
            name.clone(),
            folder_path.clone(),
            strategy,
            RotationPolicy::new(max_size),
            probe,
        );
        Self {
            name,
            folder_path,
            strategy,
            max_size,
            disposed: AtomicBool::new(false),
            streams: Mutex::new(streams),
            registry,
        }
    }

    /// 日志器名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 日志文件夹的绝对路径
    pub fn folder_path(&self) -> &Path {
        &self.folder_path
    }

    pub fn strategy(&self) -> LoggerStrategy {
        self.strategy
    }

    /// 日志文件大小上限（字节），超出后在下次打开时删除原文件
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn describe(&self) -> LoggerInfo {
        LoggerInfo {
            name: self.name.clone(),
            folder_path: self.folder_path.clone(),
            strategy: self.strategy,
            max_size: self.max_size,
        }
    }

    /// 指定流对应的日志文件路径
    pub fn log_path(&self, kind: StreamKind) -> Result<PathBuf> {
        self.lock_streams().path_for(kind)
    }

    /// 指定流的写入器是否已经打开
    pub fn is_stream_ready(&self, kind: StreamKind) -> bool {
        self.lock_streams().is_open(kind)
    }

    /// 记录一条 Info 日志，返回使用日志器名称修饰的条目
    pub fn info(&self, message: &str, error: Option<&ErrorInfo>) -> Result<String> {
        self.log(LogLevel::Info, message, error)
    }

    /// 记录一条 Warning 日志，返回使用日志器名称修饰的条目
    pub fn warn(&self, message: &str, error: Option<&ErrorInfo>) -> Result<String> {
        self.log(LogLevel::Warn, message, error)
    }

    /// 记录一条 Debug 日志，返回使用日志器名称修饰的条目
    ///
    /// Debug 消息在错误后缀之前会多一个换行
    pub fn debug(&self, message: &str, error: Option<&ErrorInfo>) -> Result<String> {
        self.log(LogLevel::Debug, message, error)
    }

    /// 记录一条 Error 日志，返回使用日志器名称修饰的条目
    pub fn error(&self, message: &str, error: Option<&ErrorInfo>) -> Result<String> {
        self.log(LogLevel::Error, message, error)
    }

    /// 记录日志
    ///
    /// 写入文件的行包含时间和级别；返回值只有 `[<name>] <消息><错误后缀>`，
    /// 便于调用方再交给自己的日志系统输出。
    /// 已销毁的实例直接返回提示字符串，不做任何 IO。
    pub fn log(&self, level: LogLevel, message: &str, error: Option<&ErrorInfo>) -> Result<String> {
        if self.is_disposed() {
            return Ok(self.disposed_message());
        }

        let mut streams = self.lock_streams();
        // 等锁期间可能已被销毁
        if self.is_disposed() {
            return Ok(self.disposed_message());
        }

        let record = LogRecord::new(level, message, error);
        let body = record.body();
        let kind = StreamKind::resolve(level, self.strategy);
        streams.writer(kind)?.write_line(&record.render_line(&body))?;

        Ok(format!("[{}] {}", self.name, body))
    }

    /// 销毁实例
    ///
    /// 关闭所有写入流并从注册表移除自身，重复调用无副作用
    pub fn dispose(&self) {
        let mut streams = self.lock_streams();
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        streams.close_all();

        if let Some(registry) = self.registry.upgrade() {
            registry.remove_instance(&self.name, self);
        }
        tracing::debug!(logger = %self.name, "mod logger disposed");
    }

    fn disposed_message(&self) -> String {
        format!("ModLogger({})已销毁", self.name)
    }

    fn lock_streams(&self) -> MutexGuard<'_, StreamManager> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ModLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModLogger")
            .field("name", &self.name)
            .field("folder_path", &self.folder_path)
            .field("strategy", &self.strategy)
            .field("max_size", &self.max_size)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::log::{ErrorInfo, LoggerRegistry, LoggerStrategy, ModLogError, StreamKind};
    use regex_lite::Regex;
    use std::fs;
    use tempfile::TempDir;

    const MIB: u64 = 1024 * 1024;

    fn read(path: impl AsRef<std::path::Path>) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_error_scenario_multi_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("X", LoggerStrategy::MultiFile, temp_dir.path(), MIB)?;

        let error = ErrorInfo::new("InvalidOperation", "bad state", "at X::run");
        let rendered = logger.error("boom", Some(&error))?;
        assert_eq!(rendered, "[X] boomInvalidOperation(bad state, at X::run)");

        let contents = read(temp_dir.path().join("X.error.log"));
        let pattern = Regex::new(
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} - Error - boomInvalidOperation\(bad state, at X::run\)\n$",
        )?;
        assert!(pattern.is_match(&contents), "unexpected contents: {contents:?}");

        for file in ["X.info.log", "X.warn.log", "X.debug.log", "X.log"] {
            assert!(!temp_dir.path().join(file).exists(), "{file} should not exist");
        }
        Ok(())
    }

    #[test]
    fn test_single_file_keeps_call_order() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("single", LoggerStrategy::SingleFile, temp_dir.path(), 0)?;

        logger.info("one", None)?;
        logger.warn("two", None)?;
        logger.error("three", None)?;
        logger.info("four", None)?;

        let contents = read(temp_dir.path().join("single.log"));
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(" - Info - one"));
        assert!(lines[1].ends_with(" - Warning - two"));
        assert!(lines[2].ends_with(" - Error - three"));
        assert!(lines[3].ends_with(" - Info - four"));

        let entries = fs::read_dir(temp_dir.path())?.count();
        assert_eq!(entries, 1);
        Ok(())
    }

    #[test]
    fn test_multi_file_routes_by_level() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("multi", LoggerStrategy::MultiFile, temp_dir.path(), 0)?;

        logger.info("i", None)?;
        logger.warn("w", None)?;
        logger.error("e", None)?;
        logger.debug("d", None)?;
        logger.info("i2", None)?;

        let info = read(temp_dir.path().join("multi.info.log"));
        let warn = read(temp_dir.path().join("multi.warn.log"));
        let error = read(temp_dir.path().join("multi.error.log"));
        let debug = read(temp_dir.path().join("multi.debug.log"));

        assert_eq!(info.lines().count(), 2);
        assert!(info.contains(" - Info - i\n") && info.contains(" - Info - i2\n"));
        assert_eq!(warn.lines().count(), 1);
        assert!(warn.contains(" - Warning - w"));
        assert_eq!(error.lines().count(), 1);
        assert!(error.contains(" - Error - e"));
        assert!(debug.contains(" - Debug - d\n\n"));
        assert!(!temp_dir.path().join("multi.log").exists());
        Ok(())
    }

    #[test]
    fn test_debug_differs_only_by_line_break() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("diff", LoggerStrategy::SingleFile, temp_dir.path(), 0)?;

        let info = logger.info("same text", None)?;
        let debug = logger.debug("same text", None)?;
        assert_eq!(info, "[diff] same text");
        assert_eq!(debug, "[diff] same text\n");

        let contents = read(temp_dir.path().join("diff.log"));
        let (info_line, debug_line) = contents.split_once('\n').unwrap();
        let info_body = info_line.split_once(" - Info - ").unwrap().1;
        let debug_body = debug_line.split_once(" - Debug - ").unwrap().1;
        assert_eq!(format!("{info_body}\n\n"), debug_body);
        Ok(())
    }

    #[test]
    fn test_dispose_returns_sentinel_without_io() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("gone", LoggerStrategy::SingleFile, temp_dir.path(), 0)?;
        let path = temp_dir.path().join("gone.log");

        logger.info("before", None)?;
        let size = fs::metadata(&path)?.len();

        logger.dispose();
        assert!(logger.is_disposed());
        assert!(!logger.is_stream_ready(StreamKind::SingleFile));
        assert!(registry.get("gone").is_none());

        let error = ErrorInfo::new("E", "m", "s");
        assert_eq!(logger.info("after", None)?, "ModLogger(gone)已销毁");
        assert_eq!(logger.error("after", Some(&error))?, "ModLogger(gone)已销毁");
        assert_eq!(fs::metadata(&path)?.len(), size);

        logger.dispose();
        assert!(logger.is_disposed());
        assert_eq!(registry.count(), 0);
        Ok(())
    }

    #[test]
    fn test_disposed_logger_does_not_recreate_files() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("nofile", LoggerStrategy::MultiFile, temp_dir.path(), 0)?;

        logger.dispose();
        logger.warn("ignored", None)?;
        assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_rotation_after_recreate() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let path = temp_dir.path().join("rot.log");

        let logger = registry.get_or_create("rot", LoggerStrategy::SingleFile, temp_dir.path(), 100)?;
        let mut i = 0;
        while !path.exists() || fs::metadata(&path)?.len() <= 100 {
            logger.info(&format!("pre-rotation line {i}"), None)?;
            i += 1;
        }
        let size_before = fs::metadata(&path)?.len();
        logger.dispose();

        let logger = registry.get_or_create("rot", LoggerStrategy::SingleFile, temp_dir.path(), 100)?;
        logger.info("post-rotation line", None)?;

        let size_after = fs::metadata(&path)?.len();
        assert!(size_after < size_before);
        let contents = read(&path);
        assert!(!contents.contains("pre-rotation"));
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("post-rotation line"));
        Ok(())
    }

    #[test]
    fn test_no_rotation_under_threshold() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();

        let logger = registry.get_or_create("keep", LoggerStrategy::SingleFile, temp_dir.path(), MIB)?;
        logger.info("first session", None)?;
        logger.dispose();

        let logger = registry.get_or_create("keep", LoggerStrategy::SingleFile, temp_dir.path(), MIB)?;
        logger.info("second session", None)?;

        let contents = read(temp_dir.path().join("keep.log"));
        assert_eq!(contents.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_stream_readiness() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("ready", LoggerStrategy::MultiFile, temp_dir.path(), 0)?;

        assert!(!logger.is_stream_ready(StreamKind::Warning));
        logger.warn("w", None)?;
        assert!(logger.is_stream_ready(StreamKind::Warning));
        assert!(!logger.is_stream_ready(StreamKind::Info));
        Ok(())
    }

    #[test]
    fn test_log_path_unsupported_kind() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = LoggerRegistry::default();
        let logger = registry.get_or_create("paths", LoggerStrategy::SingleFile, temp_dir.path(), 0)?;

        assert_eq!(
            logger.log_path(StreamKind::SingleFile)?,
            logger.folder_path().join("paths.log")
        );
        assert!(matches!(
            logger.log_path(StreamKind::Debug),
            Err(ModLogError::UnsupportedStreamKind { .. })
        ));
        Ok(())
    }
}
