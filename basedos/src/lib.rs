//! BasedOS 内核的文件系统部分
//!
//! 启动代码按顺序调用 [`log::init`] 和 [`fs::init`]，之后 shell 等调用方通过
//! [`syscall`] 中的整数接口访问文件系统。

#![no_std]

extern crate alloc;

pub mod config;
pub mod fs;
pub mod log;
pub mod selftest;
pub mod syscall;
