//! 内核日志子系统
//!
//! 该模块提供一个**类似 Linux 内核风格的日志系统**：所有日志进入有界环形缓冲区，
//! 达到控制台级别的日志同时写入诊断输出端。
//!
//! # 组件
//!
//! - [`LogLevel`] - 日志级别定义（从 Emergency 到 Debug）
//! - [`LogEntry`] - 日志条目
//! - [`LogCore`] - 核心日志实现
//! - [`KernelLogger`] - `log` facade 的桥接，库 crate 通过 `log::info!` 等宏记录的日志也会进入缓冲区
//! - `pr_info!` 等宏 - 面向内核代码的日志宏
//!
//! # 架构解耦
//!
//! 诊断输出端通过 [`LogOutput`] trait 抽象，使用方需要在启动时通过
//! [`register_log_output`] 注册实现。未注册时日志仅写入缓冲区。

#![no_std]

extern crate alloc;

mod config;
mod entry;
mod level;
mod log_core;
pub mod macros;

pub use config::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH,
};
pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::{LogCore, format_log_entry};

use core::sync::atomic::{AtomicPtr, Ordering};

// ========== Trait 定义 ==========

/// 日志输出 trait
///
/// 实现此 trait 以提供日志的诊断输出能力（如 VGA 文本终端或串口）。
pub trait LogOutput: Send + Sync {
    /// 输出字符串
    fn write_str(&self, s: &str);
}

// ========== 全局注册机制 ==========

/// 存储 LogOutput trait object 的胖指针
struct LogOutputPtr {
    data: AtomicPtr<()>,
    vtable: AtomicPtr<()>,
}

impl LogOutputPtr {
    const fn new() -> Self {
        Self {
            data: AtomicPtr::new(core::ptr::null_mut()),
            vtable: AtomicPtr::new(core::ptr::null_mut()),
        }
    }
}

static LOG_OUTPUT: LogOutputPtr = LogOutputPtr::new();

/// 注册日志输出
///
/// # Safety
///
/// - output 必须具有 'static 生命周期
/// - 不能与日志记录并发调用
pub unsafe fn register_log_output(output: &'static dyn LogOutput) {
    let ptr: *const dyn LogOutput = output;
    let (data, vtable) = unsafe { core::mem::transmute::<_, (*mut (), *mut ())>(ptr) };
    LOG_OUTPUT.data.store(data, Ordering::Release);
    LOG_OUTPUT.vtable.store(vtable, Ordering::Release);
}

/// 获取已注册的日志输出
pub(crate) fn get_log_output() -> Option<&'static dyn LogOutput> {
    let data = LOG_OUTPUT.data.load(Ordering::Acquire);
    let vtable = LOG_OUTPUT.vtable.load(Ordering::Acquire);
    if data.is_null() || vtable.is_null() {
        return None;
    }
    // Safety: 指针由 register_log_output 设置，保证有效
    Some(unsafe {
        core::mem::transmute::<(*mut (), *mut ()), &'static dyn LogOutput>((data, vtable))
    })
}

// ========== 全局单例 ==========

/// 全局日志系统实例
static GLOBAL_LOG: LogCore = LogCore::new(
    DEFAULT_LOG_LEVEL,
    DEFAULT_CONSOLE_LEVEL,
    GLOBAL_LOG_BUFFER_SIZE,
);

/// `log` facade 的实现，把记录转发给全局 [`LogCore`]
pub struct KernelLogger;

static KERNEL_LOGGER: KernelLogger = KernelLogger;

impl log::Log for KernelLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        GLOBAL_LOG.is_level_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            GLOBAL_LOG._log(
                record.level().into(),
                format_args!("{}: {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

/// 安装 [`KernelLogger`] 为 `log` facade 的全局 logger
///
/// 重复调用是安全的：第二次起 `log::set_logger` 会失败，此时只更新级别。
pub fn init_logger() {
    let _ = log::set_logger(&KERNEL_LOGGER);
    log::set_max_level(get_global_level().into());
}

// ========== 公共 API (精简封装) ==========

/// 核心日志实现（由宏调用）
#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments) {
    GLOBAL_LOG._log(level, args);
}

/// 检查日志级别是否启用（由宏调用）
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

/// 从缓冲区读取下一个日志条目
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG._read_log()
}

/// 非破坏性读取：按位置查看日志条目
pub fn peek_log(index: usize) -> Option<LogEntry> {
    GLOBAL_LOG._peek_log(index)
}

/// 返回未读日志条目的数量
pub fn log_len() -> usize {
    GLOBAL_LOG._log_len()
}

/// 返回已丢弃日志的计数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG._log_dropped_count()
}

/// 设置全局日志级别阈值
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG._set_global_level(level);
    log::set_max_level(level.into());
}

/// 获取当前全局日志级别
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG._get_global_level()
}

/// 设置控制台输出级别阈值
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG._set_console_level(level);
}

/// 获取当前控制台输出级别
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG._get_console_level()
}
