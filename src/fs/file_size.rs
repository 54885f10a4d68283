//! 文件尺寸工具
//!
//! 提供文件字节数探测（供日志轮转使用）以及可读尺寸格式化

use crate::log::error::{ModLogError, Result};
use std::path::Path;

/// 尺寸单位，按 1024 进位
const SIZE_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// 文件字节数探测器
///
/// 日志轮转策略通过该 trait 查询文件当前大小，便于在测试中替换实现
pub trait ByteSizeProbe: Send + Sync {
    /// 返回文件的字节数，失败时携带路径和底层原因
    fn byte_size(&self, path: &Path) -> Result<u64>;
}

/// 基于文件系统元数据的探测器
#[derive(Debug, Clone, Copy, Default)]
pub struct FsByteSizeProbe;

impl ByteSizeProbe for FsByteSizeProbe {
    fn byte_size(&self, path: &Path) -> Result<u64> {
        calc_file_size(path)
    }
}

/// 计算文件的字节数
pub fn calc_file_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| ModLogError::SizeProbe {
            path: path.to_path_buf(),
            source,
        })
}

/// 将文件尺寸格式化为可读字符串
///
/// 文件不存在或为空时返回 `0 B`
///
/// # 示例
///
/// ```no_run
/// use modlog::fs::format_file_size;
///
/// let size = format_file_size("logs/app.log", 2).unwrap();
/// println!("{}", size); // 例如 "1.50 KB"
/// ```
pub fn format_file_size(path: impl AsRef<Path>, decimal_places: usize) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(format_bytes(0, decimal_places));
    }
    Ok(format_bytes(calc_file_size(path)?, decimal_places))
}

/// 将字节数格式化为可读字符串
pub fn format_bytes(bytes: u64, decimal_places: usize) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut magnitude = 0;
    let mut adjusted = bytes as f64;
    while adjusted >= 1024.0 && magnitude < SIZE_UNITS.len() - 1 {
        adjusted /= 1024.0;
        magnitude += 1;
    }

    format!("{:.*} {}", decimal_places, adjusted, SIZE_UNITS[magnitude])
}
