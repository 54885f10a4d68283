use crate::log::level::LogLevel;
use chrono::{DateTime, Local};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// 附加在日志上的错误信息
///
/// 渲染为 `<类型名>(<消息>, <堆栈>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub type_name: String,
    pub message: String,
    pub stack_trace: String,
}

impl ErrorInfo {
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
        stack_trace: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }

    /// 从任意错误值构造
    ///
    /// 类型名取 `E` 的最后一段路径；只有在 `RUST_BACKTRACE` 开启时才记录堆栈
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        let backtrace = Backtrace::capture();
        let stack_trace = match backtrace.status() {
            BacktraceStatus::Captured => backtrace.to_string(),
            _ => String::new(),
        };
        Self {
            type_name: short_type_name::<E>().to_string(),
            message: err.to_string(),
            stack_trace,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.type_name, self.message, self.stack_trace)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    // 泛型参数里也可能有 "::"，只截取参数之前的部分
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// 日志记录
///
/// 只在一次写入中存在，渲染成一行文本后即丢弃
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub message: &'a str,
    pub error: Option<&'a ErrorInfo>,
    pub timestamp: DateTime<Local>,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: LogLevel, message: &'a str, error: Option<&'a ErrorInfo>) -> Self {
        Self {
            level,
            message,
            error,
            timestamp: Local::now(),
        }
    }

    /// 消息正文：Debug 级别在消息后多一个换行，随后拼接错误后缀
    pub fn body(&self) -> String {
        let mut body = String::with_capacity(self.message.len() + 1);
        body.push_str(self.message);
        if self.level == LogLevel::Debug {
            body.push('\n');
        }
        if let Some(error) = self.error {
            body.push_str(&error.to_string());
        }
        body
    }

    /// 写入文件的一行（不含行尾换行）
    pub fn render_line(&self, body: &str) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.label(),
            body
        )
    }
}
