//! 同步原语
//!
//! 向其它内核模块提供基本的锁原语。
//!
//! 自旋锁不屏蔽中断：中断处理程序不得访问被这些锁保护的数据。

#![no_std]

mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::*;
pub use spin_lock::*;
