//! # 文件系统模块 (FS)
//!
//! 本模块 re-export fs crate 的内容，持有内核唯一的 [`Vfs`] 实例，并提供启动时的初始化。

// Re-export fs crate (使用 :: 前缀引用外部 crate，避免与本模块名冲突)
pub use ::fs::*;

use lazy_static::lazy_static;
use vfs::{FsError, Vfs};

use crate::config::{MEMFS_MAX_BYTES, ROOT_DEVICE, ROOT_FS_TYPE};
use crate::log::{pr_err, pr_info};

lazy_static! {
    /// 内核的文件系统上下文
    pub static ref VFS: Vfs = Vfs::new();
}

/// 在 `vfs` 上注册 memfs 并把它挂载为根文件系统
///
/// memfs 已注册时不会重复注册。
pub fn init_fs(vfs: &Vfs) -> Result<(), FsError> {
    if vfs.registry().lookup(ROOT_FS_TYPE).is_none() {
        vfs.register_filesystem(MemFs::new(MEMFS_MAX_BYTES))?;
        pr_info!("[Memfs] Registered memfs (max {} bytes)", MEMFS_MAX_BYTES);
    }

    if let Err(e) = vfs.mount(ROOT_DEVICE, "/", ROOT_FS_TYPE) {
        pr_err!("[Memfs] Failed to mount root filesystem: {}", e);
        return Err(e);
    }
    pr_info!("[Memfs] Mounted {} ({}) at /", ROOT_FS_TYPE, ROOT_DEVICE);
    Ok(())
}

/// 初始化内核的根文件系统
pub fn init() -> Result<(), FsError> {
    init_fs(&VFS)
}
