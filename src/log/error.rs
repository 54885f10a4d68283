use std::path::PathBuf;
use thiserror::Error;

/// 日志模块统一错误类型
#[derive(Error, Debug)]
pub enum ModLogError {
    #[error("ModLogger 已存在 '{name}' 名称的实例, 无法重新注册")]
    NameAlreadyExists { name: String },

    #[error("传入的路径不是文件夹路径, 而是一个文件: \"{}\"", .path.display())]
    PathIsFile { path: PathBuf },

    #[error("{location} 位置的参数 {param}(当前值: {value}) 超出范围, 应该在 {range}")]
    UnsupportedStreamKind {
        param: &'static str,
        value: String,
        location: &'static str,
        range: &'static str,
    },

    #[error("获取文件({}) 尺寸时出错: {source}", .path.display())]
    SizeProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO 错误 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置错误: {0}")]
    Config(String),
}

impl ModLogError {
    /// 是否为配置类错误（重名、路径为文件）
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ModLogError::NameAlreadyExists { .. } | ModLogError::PathIsFile { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModLogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModLogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configuration() {
        assert!(ModLogError::NameAlreadyExists { name: "a".into() }.is_configuration());
        assert!(ModLogError::PathIsFile { path: "/tmp/a".into() }.is_configuration());
        assert!(!ModLogError::Config("bad".into()).is_configuration());
    }

    #[test]
    fn test_unsupported_stream_kind_message() {
        let err = ModLogError::UnsupportedStreamKind {
            param: "kind",
            value: "SingleFile".to_string(),
            location: "StreamManager::writer",
            range: "Info+Warning+Error+Debug",
        };
        let msg = err.to_string();
        assert!(msg.contains("kind"));
        assert!(msg.contains("SingleFile"));
        assert!(msg.contains("StreamManager::writer"));
        assert!(msg.contains("Info+Warning+Error+Debug"));
    }
}
