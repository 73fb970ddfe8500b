//! 日志系统核心实现
//!
//! 该模块将所有日志状态和逻辑封装到一个单独的 `LogCore` 结构体中，
//! 全局单例之外也可以独立实例化用于测试。

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use sync::SpinLock;

use crate::entry::LogEntry;
use crate::level::LogLevel;

/// 核心日志系统
///
/// 封装了有界环形缓冲区和过滤状态。缓冲区满时丢弃最旧的条目并计数。
pub struct LogCore {
    /// 最近的日志条目
    buffer: SpinLock<VecDeque<LogEntry>>,

    /// 缓冲区容量（条目数）
    capacity: usize,

    /// 全局日志级别阈值（控制日志是否缓冲）
    global_level: AtomicU8,

    /// 控制台输出级别阈值（控制是否立即打印）
    console_level: AtomicU8,

    /// 下一条日志的序号
    next_seq: AtomicUsize,

    /// 因溢出而丢弃的条目数
    dropped: AtomicUsize,
}

impl LogCore {
    /// 创建新的 LogCore 实例
    ///
    /// 这是一个 `const fn`，可以直接用于 `static` 初始化。
    ///
    /// # 参数
    ///
    /// * `global_level` - 日志被缓冲的最低级别
    /// * `console_level` - 日志被打印到控制台的最低级别
    /// * `capacity` - 缓冲区能保存的条目数
    pub const fn new(global_level: LogLevel, console_level: LogLevel, capacity: usize) -> Self {
        Self {
            buffer: SpinLock::new(VecDeque::new()),
            capacity,
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
            next_seq: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        }
    }

    /// 核心日志记录实现
    ///
    /// 1. 按全局级别过滤
    /// 2. 构造日志条目并写入缓冲区（满则丢弃最旧条目）
    /// 3. 满足控制台级别时输出到已注册的 [`crate::LogOutput`]
    pub fn _log(&self, level: LogLevel, args: fmt::Arguments) {
        if !self.is_level_enabled(level) {
            return;
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let entry = LogEntry::from_args(seq, level, args);

        let console_line = if self.is_console_level(level) {
            Some(format_log_entry(&entry))
        } else {
            None
        };

        {
            let mut buffer = self.buffer.lock();
            if self.capacity == 0 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            } else {
                if buffer.len() >= self.capacity {
                    buffer.pop_front();
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                buffer.push_back(entry);
            }
        }

        // 在释放缓冲区锁之后输出，避免输出端再次记录日志时死锁
        if let Some(line) = console_line {
            if let Some(output) = crate::get_log_output() {
                output.write_str(&line);
                output.write_str("\n");
            }
        }
    }

    /// 从缓冲区读取（并移除）最旧的日志条目
    pub fn _read_log(&self) -> Option<LogEntry> {
        self.buffer.lock().pop_front()
    }

    /// 按位置查看日志条目，不移除
    pub fn _peek_log(&self, index: usize) -> Option<LogEntry> {
        self.buffer.lock().get(index).cloned()
    }

    /// 返回未读日志条目的数量
    pub fn _log_len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// 返回由于缓冲区溢出而丢弃的日志计数
    pub fn _log_dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// 设置全局日志级别阈值
    pub fn _set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// 获取当前全局日志级别
    pub fn _get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Acquire))
    }

    /// 设置控制台输出级别阈值
    pub fn _set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// 获取当前控制台输出级别
    pub fn _get_console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    // ========== 内部辅助函数 ==========

    /// 检查日志级别是否启用 (全局过滤器)
    #[inline(always)]
    pub(crate) fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Acquire)
    }

    /// 检查日志是否应该打印到控制台
    #[inline(always)]
    fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Acquire)
    }
}

/// 格式化日志条目为单行字符串
///
/// # 格式
/// ```text
/// [LEVEL] [seq] message
/// ```
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} [{:6}] {}",
        entry.level().as_str(),
        entry.seq(),
        entry.message()
    )
}
