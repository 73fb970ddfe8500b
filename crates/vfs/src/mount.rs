//! 挂载表
//!
//! 目前只支持挂载到文件系统根 `/`。挂载会把根引用整体替换为后端返回的新节点。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use sync::SpinLock;

use crate::{FileSystemType, FsError, FsRegistry, Node};

/// 挂载点信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    /// 设备名称
    pub device: String,
    /// 挂载路径
    pub mount_path: String,
    /// 文件系统类型
    pub fs_type: String,
}

struct MountPoint {
    info: MountInfo,
    fs: Arc<dyn FileSystemType>,
    root: Node,
}

/// 挂载表
pub struct MountTable {
    root: SpinLock<Option<MountPoint>>,
}

impl MountTable {
    /// 创建空挂载表（尚无根文件系统）
    pub const fn new() -> Self {
        Self {
            root: SpinLock::new(None),
        }
    }

    /// 挂载 `fs_type` 类型的文件系统到 `mount_path`
    ///
    /// 检查顺序：类型未注册返回 [`FsError::NotFound`]；挂载点不是 `/` 返回
    /// [`FsError::UnsupportedOperation`]；后端 mount 失败返回 [`FsError::MountFailed`]。
    pub fn mount(
        &self,
        registry: &FsRegistry,
        device: &str,
        mount_path: &str,
        fs_type: &str,
    ) -> Result<(), FsError> {
        let fs = registry.lookup(fs_type).ok_or_else(|| {
            log::warn!("vfs: unknown filesystem type '{}'", fs_type);
            FsError::NotFound
        })?;

        if mount_path != "/" {
            log::warn!("vfs: cannot mount at '{}', only '/' is supported", mount_path);
            return Err(FsError::UnsupportedOperation);
        }

        let root = fs.mount(device).map_err(|e| {
            log::warn!("vfs: {} mount of '{}' failed: {}", fs_type, device, e);
            FsError::MountFailed
        })?;
        if !root.is_dir() {
            log::warn!("vfs: {} returned a non-directory root", fs_type);
            return Err(FsError::MountFailed);
        }

        let mount_point = MountPoint {
            info: MountInfo {
                device: String::from(device),
                mount_path: String::from(mount_path),
                fs_type: String::from(fs_type),
            },
            fs,
            root,
        };

        if self.root.lock().replace(mount_point).is_some() {
            log::info!("vfs: replaced root filesystem with {} ({})", fs_type, device);
        } else {
            log::info!("vfs: mounted {} ({}) at /", fs_type, device);
        }
        Ok(())
    }

    /// 卸载 `mount_path` 上的文件系统
    pub fn umount(&self, mount_path: &str) -> Result<(), FsError> {
        if mount_path != "/" {
            return Err(FsError::UnsupportedOperation);
        }
        let mount_point = self.root.lock().take().ok_or(FsError::NotFound)?;
        mount_point.fs.unmount(&mount_point.root);
        log::info!("vfs: unmounted {} from /", mount_point.info.fs_type);
        Ok(())
    }

    /// 当前根节点
    pub fn root(&self) -> Result<Node, FsError> {
        self.root
            .lock()
            .as_ref()
            .map(|mp| mp.root.clone())
            .ok_or(FsError::NotFound)
    }

    /// 列出挂载点
    pub fn list_mounts(&self) -> Vec<MountInfo> {
        self.root
            .lock()
            .iter()
            .map(|mp| mp.info.clone())
            .collect()
    }
}

impl Default for MountTable {
    fn default() -> Self {
        Self::new()
    }
}
