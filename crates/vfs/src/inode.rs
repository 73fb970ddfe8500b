//! Inode 抽象层 - 后端存储接口
//!
//! 每个文件系统后端为自己的文件/目录实现 [`Inode`]。接口以“显式 offset”的随机访问为主，
//! 打开状态（cursor、flags）由 [`crate::File`] 维护。
//!
//! 后端通过 [`Inode::capabilities`] 声明自己支持哪些操作。调用方应经由
//! [`crate::Node`] 分发：缺少能力位的操作按“不支持”处理，而不是调用默认实现。

use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use uapi::fcntl::OpenFlags;

use crate::FsError;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 字符设备
    CharDevice,
    /// 块设备
    BlockDevice,
    /// 管道
    Pipe,
    /// 符号链接
    Symlink,
    /// 挂载点
    Mountpoint,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 权限位（与 POSIX 兼容；目前只记录，不做检查）
    pub struct FileMode: u32 {
        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 用户执行
        const S_IXUSR  = 0o100;
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组写
        const S_IWGRP  = 0o020;
        /// 组执行
        const S_IXGRP  = 0o010;
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他写
        const S_IWOTH  = 0o002;
        /// 其他执行
        const S_IXOTH  = 0o001;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 节点能力表
    pub struct Capabilities: u32 {
        /// read_at
        const READ     = 1 << 0;
        /// write_at
        const WRITE    = 1 << 1;
        /// open 钩子
        const OPEN     = 1 << 2;
        /// close 钩子
        const CLOSE    = 1 << 3;
        /// 按下标枚举目录项
        const READDIR  = 1 << 4;
        /// 按名字查找子项
        const FINDDIR  = 1 << 5;
        /// 创建子项
        const CREATE   = 1 << 6;
        /// 删除子项
        const REMOVE   = 1 << 7;
        /// 截断
        const TRUNCATE = 1 << 8;
    }
}

/// 目录项（readdir 返回，每次调用都是独立的值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Inode 编号
    pub inode_no: usize,
    /// 文件名
    pub name: String,
}

/// 文件元数据
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// Inode 编号
    pub inode_no: usize,
    /// 节点类型
    pub inode_type: InodeType,
    /// 权限位
    pub mode: FileMode,
    /// 用户 ID
    pub uid: u32,
    /// 组 ID
    pub gid: u32,
    /// 文件大小（字节）
    pub size: usize,
}

/// 文件系统底层存储接口
///
/// 除 `metadata`、`capabilities` 外的方法都有“不支持”的默认实现，
/// 后端只需覆盖能力表中声明的那些。
pub trait Inode: Send + Sync + Any {
    /// 获取文件元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 该节点支持的操作
    fn capabilities(&self) -> Capabilities;

    /// 从指定偏移量读取数据，返回实际读取的字节数
    fn read_at(&self, _offset: usize, _buf: &mut [u8]) -> Result<usize, FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 向指定偏移量写入数据，必要时扩展文件
    fn write_at(&self, _offset: usize, _buf: &[u8]) -> Result<usize, FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 打开时的副作用钩子
    fn open(&self, _flags: OpenFlags) {}

    /// 关闭时的副作用钩子
    fn close(&self) {}

    /// 返回第 `index` 个目录项，越界返回 `None`
    fn readdir(&self, _index: usize) -> Result<Option<DirEntry>, FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 在目录中查找子项
    fn lookup(&self, _name: &str) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 在目录中创建子项（`File` 或 `Directory`）
    fn create(&self, _name: &str, _inode_type: InodeType) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 删除普通文件
    fn unlink(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 删除空目录
    fn rmdir(&self, _name: &str) -> Result<(), FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 截断文件到指定大小
    fn truncate(&self, _size: usize) -> Result<(), FsError> {
        Err(FsError::UnsupportedOperation)
    }

    /// 向下转型为 &dyn Any，用于支持 downcast
    fn as_any(&self) -> &dyn Any;
}
