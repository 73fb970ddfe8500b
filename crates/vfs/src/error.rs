//! VFS 错误类型
//!
//! 所有可失败的操作都返回 `Result<_, FsError>`；只有系统调用边界才把它折叠为 `-1`。

use core::fmt;

/// VFS 错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 路径/目录相关
    /// 路径组件不存在，或文件系统类型未注册
    NotFound,
    /// 同名目录项已存在
    AlreadyExists,
    /// 路径组件超过 255 字节
    ComponentTooLong,
    /// 不是目录
    NotDirectory,
    /// 是目录
    IsDirectory,
    /// 目录非空
    DirectoryNotEmpty,

    // 文件描述符相关
    /// 文件描述符表已满
    DescriptorsExhausted,
    /// 无效的文件描述符
    InvalidDescriptor,
    /// 打开模式与读写方向不符
    PermissionDenied,

    // 参数相关
    /// 无效参数（未知的 whence、负的文件位置等）
    InvalidArgument,
    /// 操作不支持（相对路径、非根挂载点、节点缺少对应能力）
    UnsupportedOperation,

    // 文件系统相关
    /// 后端 mount 未能给出根节点
    MountFailed,
    /// 文件系统类型注册表已满
    FullRegistry,
    /// 内存不足或超出文件系统容量
    NoSpace,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::NotFound => "no such file, directory or filesystem type",
            FsError::AlreadyExists => "entry already exists",
            FsError::ComponentTooLong => "path component too long",
            FsError::NotDirectory => "not a directory",
            FsError::IsDirectory => "is a directory",
            FsError::DirectoryNotEmpty => "directory not empty",
            FsError::DescriptorsExhausted => "too many open files",
            FsError::InvalidDescriptor => "bad file descriptor",
            FsError::PermissionDenied => "access mode does not permit operation",
            FsError::InvalidArgument => "invalid argument",
            FsError::UnsupportedOperation => "operation not supported",
            FsError::MountFailed => "mount failed",
            FsError::FullRegistry => "filesystem registry full",
            FsError::NoSpace => "no space left",
        };
        f.write_str(msg)
    }
}
