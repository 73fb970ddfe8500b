//! 内核虚拟文件系统层
//!
//! 此 crate 提供与后端无关的文件系统抽象，包括：
//!
//! - [`Inode`] trait - 后端存储接口，附带能力表 [`Capabilities`]
//! - [`Node`] - 按能力分发的节点视图
//! - [`FsRegistry`] / [`MountTable`] - 文件系统类型注册与根挂载
//! - 路径解析引擎（[`path`]）
//! - [`FDTable`] / [`File`] - 文件描述符表与打开的文件
//! - [`Vfs`] - 把以上部件打包的文件系统上下文

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod path;

mod fd_table;
mod file;
mod file_system;
mod inode;
mod mount;
mod node;
mod vfs;

#[cfg(test)]
mod tests;

// Re-export error
pub use error::FsError;

// Re-export inode
pub use inode::{Capabilities, DirEntry, FileMode, Inode, InodeMetadata, InodeType};

// Re-export node
pub use node::Node;

// Re-export file_system
pub use file_system::{FileSystemType, FsRegistry};

// Re-export mount
pub use mount::{MountInfo, MountTable};

// Re-export path
pub use path::{resolve, resolve_parent, split_path};

// Re-export fd_table / file
pub use fd_table::FDTable;
pub use file::File;

// Re-export vfs
pub use vfs::Vfs;

// Re-export uapi types for convenience
pub use uapi::fcntl::{AccessMode, OpenFlags, SeekWhence};
