//! 系统调用接口
//!
//! 所有调用都返回整数，失败统一返回 `-1`；具体的 [`vfs::FsError`] 只记录在调试日志中。

mod fs;

pub use fs::{sys_close, sys_lseek, sys_mount, sys_open, sys_read, sys_write};
