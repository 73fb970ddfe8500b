//! 与用户空间共用定义和声明
//!
//! 包含打开标志、seek 起点等常量，确保内核和 shell 等调用方的一致性

#![no_std]
#![allow(dead_code)]
// uapi 中包含大量 ABI 常量定义；逐项补 `///` 噪声较大。
#![allow(missing_docs)]

pub mod fcntl;
