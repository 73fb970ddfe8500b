//! Memfs - 内存文件系统
//!
//! 该模块提供一个**完全驻留在内存中的文件系统**：所有 inode 存放在一个以下标寻址的
//! arena 中，父子关系和兄弟链表都用下标表示。数据不会持久化，重启即丢失。

mod inode;
mod memfs;

pub use inode::MemfsInode;
pub use memfs::{MEMFS_NAME, MemFs};
