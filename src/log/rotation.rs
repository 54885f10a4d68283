use crate::fs::ByteSizeProbe;
use crate::log::error::{ModLogError, Result};
use std::path::Path;

/// 按大小轮转的策略
///
/// 只在写入流打开时检查：文件超过上限则先删除再重新创建。
/// 流一旦打开，在关闭前不会再次检查，文件可以在一次会话内超过上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_size: u64,
}

impl RotationPolicy {
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// 在打开写入流前调用，返回是否删除了旧文件
    pub fn apply(&self, path: &Path, probe: &dyn ByteSizeProbe) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        let size = probe.byte_size(path)?;
        if size <= self.max_size {
            return Ok(false);
        }

        std::fs::remove_file(path).map_err(|e| ModLogError::io(path, e))?;
        tracing::debug!(
            path = %path.display(),
            size,
            max_size = self.max_size,
            "rotated oversized log file"
        );
        Ok(true)
    }
}
