//! 日志系统配置常量

use crate::LogLevel;

/// 环形缓冲区保存的最大日志条目数
pub const GLOBAL_LOG_BUFFER_SIZE: usize = 64;

/// 单条日志消息的最大字节数（超出部分被截断）
pub const MAX_LOG_MESSAGE_LENGTH: usize = 256;

/// 默认的全局日志级别（低于此级别的日志不会进入缓冲区）
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// 默认的控制台输出级别
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Warning;
