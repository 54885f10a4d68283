//! 文件系统工具模块
//!
//! 提供文件尺寸探测与格式化

pub mod file_size;

pub use file_size::{calc_file_size, format_bytes, format_file_size, ByteSizeProbe, FsByteSizeProbe};
