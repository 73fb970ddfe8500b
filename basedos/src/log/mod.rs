//! 内核日志子系统
//!
//! 该模块重新导出 klog crate 的功能，并负责在启动时注册诊断输出端。

pub use klog::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, KernelLogger, LogEntry,
    LogLevel, LogOutput, MAX_LOG_MESSAGE_LENGTH, format_log_entry, get_console_level,
    get_global_level, log_dropped_count, log_len, peek_log, read_log, set_console_level,
    set_global_level,
};
pub use klog::{pr_debug, pr_err, pr_info, pr_warn};

/// 初始化日志系统
///
/// 注册诊断输出端并把 [`KernelLogger`] 装为 `log` facade 的全局 logger。
/// 必须在单线程的启动阶段、使用日志宏之前调用。
pub fn init(output: &'static dyn LogOutput) {
    // Safety: output 为 'static，且启动阶段没有并发的日志记录
    unsafe {
        klog::register_log_output(output);
    }
    klog::init_logger();
}
