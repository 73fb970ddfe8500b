//! # 文件系统模块 (FS)
//!
//! 本模块提供具体的文件系统实现，通过实现 VFS 的 `FileSystemType` 和 `Inode` trait
//! 与虚拟文件系统层集成。
//!
//! ## 支持的文件系统
//!
//! - **[memfs](memfs)**: 内存文件系统（纯内存，不持久化）

#![no_std]
#![doc = "文件系统实现"]

extern crate alloc;

pub mod memfs;

pub use memfs::{MEMFS_NAME, MemFs, MemfsInode};
