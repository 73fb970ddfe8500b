//! 文件系统上下文
//!
//! [`Vfs`] 把文件系统类型注册表、挂载表和文件描述符表打包成一个值。
//! 内核在启动时创建一个实例；测试可以各自创建互不干扰的实例。

use alloc::sync::Arc;
use alloc::vec::Vec;
use uapi::fcntl::{OpenFlags, SeekWhence};

use crate::config::VfsConfig;
use crate::path::{resolve, resolve_parent};
use crate::{
    DirEntry, FDTable, File, FileSystemType, FsError, FsRegistry, InodeType, MountInfo,
    MountTable, Node,
};

/// 文件系统上下文
pub struct Vfs {
    config: VfsConfig,
    registry: FsRegistry,
    mounts: MountTable,
    fd_table: FDTable,
}

impl Vfs {
    /// 使用默认容量创建
    pub fn new() -> Self {
        Self::with_config(VfsConfig::default())
    }

    /// 使用指定容量创建
    pub fn with_config(config: VfsConfig) -> Self {
        Self {
            config,
            registry: FsRegistry::new(config.max_filesystems),
            mounts: MountTable::new(),
            fd_table: FDTable::new(config.max_fds),
        }
    }

    /// 容量配置
    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    /// 文件系统类型注册表
    pub fn registry(&self) -> &FsRegistry {
        &self.registry
    }

    /// 文件描述符表
    pub fn fd_table(&self) -> &FDTable {
        &self.fd_table
    }

    /// 注册文件系统类型
    pub fn register_filesystem(&self, fs_type: Arc<dyn FileSystemType>) -> Result<(), FsError> {
        self.registry.register(fs_type)
    }

    /// 挂载文件系统（只支持 `/`）
    pub fn mount(&self, device: &str, mount_path: &str, fs_type: &str) -> Result<(), FsError> {
        self.mounts.mount(&self.registry, device, mount_path, fs_type)
    }

    /// 卸载文件系统（只支持 `/`）
    pub fn umount(&self, mount_path: &str) -> Result<(), FsError> {
        self.mounts.umount(mount_path)
    }

    /// 当前挂载点
    pub fn mounts(&self) -> Vec<MountInfo> {
        self.mounts.list_mounts()
    }

    /// 根节点；尚未挂载时返回 [`FsError::NotFound`]
    pub fn root(&self) -> Result<Node, FsError> {
        self.mounts.root()
    }

    /// 解析路径为节点
    pub fn lookup(&self, path: &str) -> Result<Node, FsError> {
        resolve(&self.root()?, path, OpenFlags::O_RDONLY)
    }

    /// 打开文件，返回最小的空闲文件描述符
    pub fn open(&self, path: &str, flags: OpenFlags) -> Result<usize, FsError> {
        if flags.access_mode().is_none() {
            return Err(FsError::InvalidArgument);
        }
        if !self.fd_table.has_free_slot() {
            log::warn!(
                "vfs: descriptor table exhausted ({} slots), cannot open '{}'",
                self.fd_table.capacity(),
                path
            );
            return Err(FsError::DescriptorsExhausted);
        }

        let node = resolve(&self.root()?, path, flags)?;
        if flags.contains(OpenFlags::O_TRUNC)
            && flags.writable()
            && node.node_type() == InodeType::File
        {
            node.truncate(0)?;
        }

        let file = Arc::new(File::new(node, flags));
        let fd = self.fd_table.alloc(file.clone())?;
        file.node().open(flags);
        log::debug!("vfs: open '{}' -> fd {}", path, fd);
        Ok(fd)
    }

    /// 关闭文件描述符
    pub fn close(&self, fd: usize) -> Result<(), FsError> {
        let file = self.fd_table.close(fd)?;
        file.node().close();
        log::debug!("vfs: close fd {}", fd);
        Ok(())
    }

    /// 从文件描述符读取
    pub fn read(&self, fd: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        self.fd_table.get(fd)?.read(buf)
    }

    /// 向文件描述符写入
    pub fn write(&self, fd: usize, buf: &[u8]) -> Result<usize, FsError> {
        self.fd_table.get(fd)?.write(buf)
    }

    /// 移动文件描述符的游标
    pub fn lseek(&self, fd: usize, offset: isize, whence: SeekWhence) -> Result<usize, FsError> {
        self.fd_table.get(fd)?.lseek(offset, whence)
    }

    /// 列出目录的全部目录项
    ///
    /// 按下标逐个读取直到返回 `None`；枚举期间不应修改该目录。
    pub fn readdir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let dir = self.lookup(path)?;
        if !dir.is_dir() {
            return Err(FsError::NotDirectory);
        }
        let mut entries = Vec::new();
        while let Some(entry) = dir.readdir(entries.len())? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// 创建目录
    pub fn mkdir(&self, path: &str) -> Result<Node, FsError> {
        let (parent, name) = resolve_parent(&self.root()?, path)?;
        let dir = parent.create(&name, InodeType::Directory)?;
        log::debug!("vfs: mkdir '{}'", path);
        Ok(dir)
    }

    /// 删除普通文件
    pub fn unlink(&self, path: &str) -> Result<(), FsError> {
        let (parent, name) = resolve_parent(&self.root()?, path)?;
        parent.unlink(&name)?;
        log::debug!("vfs: unlink '{}'", path);
        Ok(())
    }

    /// 删除空目录
    pub fn rmdir(&self, path: &str) -> Result<(), FsError> {
        let (parent, name) = resolve_parent(&self.root()?, path)?;
        parent.rmdir(&name)?;
        log::debug!("vfs: rmdir '{}'", path);
        Ok(())
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}
