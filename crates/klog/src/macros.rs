//! 面向内核代码的日志宏
//!
//! 级别检查发生在格式化之前，被过滤的日志不会产生格式化开销。

/// 通用日志宏
#[macro_export]
macro_rules! pr_log {
    ($level:expr, $($arg:tt)*) => {
        if $crate::is_level_enabled($level) {
            $crate::log_impl($level, format_args!($($arg)*));
        }
    };
}

/// 记录 Error 级别日志
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => {
        $crate::pr_log!($crate::LogLevel::Error, $($arg)*)
    };
}

/// 记录 Warning 级别日志
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => {
        $crate::pr_log!($crate::LogLevel::Warning, $($arg)*)
    };
}

/// 记录 Info 级别日志
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => {
        $crate::pr_log!($crate::LogLevel::Info, $($arg)*)
    };
}

/// 记录 Debug 级别日志
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => {
        $crate::pr_log!($crate::LogLevel::Debug, $($arg)*)
    };
}
