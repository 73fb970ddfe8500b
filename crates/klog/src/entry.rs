//! 日志条目

use alloc::string::String;
use core::fmt::{self, Write};

use crate::{LogLevel, MAX_LOG_MESSAGE_LENGTH};

/// 一条已格式化的日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    seq: usize,
    level: LogLevel,
    message: String,
}

impl LogEntry {
    /// 由格式化参数构造，消息超过 [`MAX_LOG_MESSAGE_LENGTH`] 时在字符边界截断
    pub fn from_args(seq: usize, level: LogLevel, args: fmt::Arguments) -> Self {
        let mut writer = TruncatingWriter {
            buf: String::new(),
            limit: MAX_LOG_MESSAGE_LENGTH,
        };
        // TruncatingWriter 从不返回错误
        let _ = writer.write_fmt(args);
        Self {
            seq,
            level,
            message: writer.buf,
        }
    }

    /// 全局序号（单调递增）
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// 日志级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 消息文本
    pub fn message(&self) -> &str {
        &self.message
    }
}

struct TruncatingWriter {
    buf: String,
    limit: usize,
}

impl Write for TruncatingWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
        }
        Ok(())
    }
}
