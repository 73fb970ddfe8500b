//! VFS 配置

/// 单个路径组件（文件名）的最大字节数
pub const MAX_NAME_LEN: usize = 255;

/// 文件描述符表的默认容量
pub const DEFAULT_MAX_FDS: usize = 64;

/// 文件系统类型注册表的容量
pub const MAX_FILESYSTEMS: usize = 8;

/// [`crate::Vfs`] 实例的容量配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsConfig {
    /// 文件描述符表容量
    pub max_fds: usize,
    /// 可注册的文件系统类型数
    pub max_filesystems: usize,
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            max_fds: DEFAULT_MAX_FDS,
            max_filesystems: MAX_FILESYSTEMS,
        }
    }
}
