use crate::fs::ByteSizeProbe;
use crate::log::error::{ModLogError, Result};
use crate::log::rotation::RotationPolicy;
use crate::log::strategy::{LoggerStrategy, StreamKind};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const WRITER_BUFFER_SIZE: usize = 1024;

/// 已打开的日志文件写入流
pub struct LogWriter {
    path: PathBuf,
    inner: BufWriter<File>,
}

impl LogWriter {
    fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ModLogError::io(&path, e))?;
        Ok(Self {
            path,
            inner: BufWriter::with_capacity(WRITER_BUFFER_SIZE, file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入一行并立即刷新到磁盘
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner
            .write_all(line.as_bytes())
            .and_then(|_| self.inner.write_all(b"\n"))
            .and_then(|_| self.inner.flush())
            .map_err(|e| ModLogError::io(&self.path, e))
    }

    fn close(mut self) -> std::io::Result<()> {
        self.inner.flush()?;
        self.inner.get_ref().sync_all()
    }
}

/// 单个 ModLogger 的写入流管理器
///
/// 每种流在首次使用时创建并缓存，直到 `close_all` 才关闭
pub struct StreamManager {
    logger_name: String,
    folder_path: PathBuf,
    strategy: LoggerStrategy,
    rotation: RotationPolicy,
    probe: Arc<dyn ByteSizeProbe>,
    writers: HashMap<StreamKind, LogWriter>,
}

impl StreamManager {
    pub fn new(
        logger_name: impl Into<String>,
        folder_path: impl Into<PathBuf>,
        strategy: LoggerStrategy,
        rotation: RotationPolicy,
        probe: Arc<dyn ByteSizeProbe>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            folder_path: folder_path.into(),
            strategy,
            rotation,
            probe,
            writers: HashMap::new(),
        }
    }

    /// 流对应的日志文件路径
    pub fn path_for(&self, kind: StreamKind) -> Result<PathBuf> {
        stream_path(&self.folder_path, &self.logger_name, self.strategy, kind)
    }

    /// 获取写入流，不存在时先执行轮转检查再创建
    pub fn writer(&mut self, kind: StreamKind) -> Result<&mut LogWriter> {
        match self.writers.entry(kind) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = stream_path(&self.folder_path, &self.logger_name, self.strategy, kind)?;
                self.rotation.apply(&path, self.probe.as_ref())?;
                let writer = LogWriter::open(path)?;
                tracing::debug!(
                    logger = %self.logger_name,
                    kind = %kind,
                    path = %writer.path().display(),
                    "opened log stream"
                );
                Ok(entry.insert(writer))
            }
        }
    }

    pub fn is_open(&self, kind: StreamKind) -> bool {
        self.writers.contains_key(&kind)
    }

    pub fn open_count(&self) -> usize {
        self.writers.len()
    }

    /// 刷新并关闭所有写入流，单个流的失败会被忽略
    pub fn close_all(&mut self) {
        for (kind, writer) in self.writers.drain() {
            let path = writer.path.clone();
            if let Err(e) = writer.close() {
                tracing::warn!(
                    logger = %self.logger_name,
                    kind = %kind,
                    path = %path.display(),
                    error = %e,
                    "failed to close log stream"
                );
            }
        }
    }
}

fn stream_path(
    folder_path: &Path,
    logger_name: &str,
    strategy: LoggerStrategy,
    kind: StreamKind,
) -> Result<PathBuf> {
    Ok(folder_path.join(kind.file_name(logger_name, strategy)?))
}

impl Drop for StreamManager {
    fn drop(&mut self) {
        self.close_all();
    }
}
