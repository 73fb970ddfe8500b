//! Memfs 文件系统实现

use alloc::sync::Arc;

use sync::SpinLock;
use vfs::{FileSystemType, FsError, InodeType, Node};

use super::inode::{InodeTable, MemfsInode, ROOT_INDEX};

/// 注册到 VFS 时使用的类型名
pub const MEMFS_NAME: &str = "memfs";

/// Memfs 文件系统
///
/// 根目录在创建时分配，和文件系统实例同生命周期。每次 mount 都返回同一棵树的
/// 新根视图，设备名被忽略。
pub struct MemFs {
    table: Arc<SpinLock<InodeTable>>,
}

impl MemFs {
    /// 创建新的 memfs 文件系统
    ///
    /// # 参数
    ///
    /// - `max_bytes`: 文件内容的总字节上限，0 表示无限制
    pub fn new(max_bytes: usize) -> Arc<Self> {
        Arc::new(Self {
            table: Arc::new(SpinLock::new(InodeTable::new(max_bytes))),
        })
    }

    /// 根目录 inode
    pub fn root_inode(&self) -> Result<Arc<MemfsInode>, FsError> {
        let inode_no = self.table.lock().root_inode_no()?;
        Ok(MemfsInode::new(
            self.table.clone(),
            ROOT_INDEX,
            inode_no,
            InodeType::Directory,
        ))
    }

    /// 文件内容已使用的字节数
    pub fn used_bytes(&self) -> usize {
        self.table.lock().used_bytes()
    }

    /// 内容字节上限（0 表示无限制）
    pub fn max_bytes(&self) -> usize {
        self.table.lock().max_bytes()
    }

    /// 存活的 inode 数（含根目录）
    pub fn inode_count(&self) -> usize {
        self.table.lock().inode_count()
    }
}

impl FileSystemType for MemFs {
    fn name(&self) -> &str {
        MEMFS_NAME
    }

    fn mount(&self, device: &str) -> Result<Node, FsError> {
        log::debug!("memfs: mount (device '{}' ignored)", device);
        Node::new("/", self.root_inode()?)
    }
}
