//! 内核配置

/// 根文件系统的设备名（memfs 不使用它）
pub const ROOT_DEVICE: &str = "memdisk";

/// 根文件系统类型
pub const ROOT_FS_TYPE: &str = ::fs::MEMFS_NAME;

/// memfs 文件内容的字节上限
pub const MEMFS_MAX_BYTES: usize = 4 * 1024 * 1024;
