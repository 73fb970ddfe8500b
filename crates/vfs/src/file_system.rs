//! 文件系统类型与注册表

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use sync::SpinLock;

use crate::{FsError, Node};

/// 文件系统类型
///
/// 每个后端实现一次，并在启动时注册到 [`FsRegistry`]。
pub trait FileSystemType: Send + Sync {
    /// 文件系统类型名称（挂载时按精确字符串匹配）
    fn name(&self) -> &str;

    /// 挂载 `device`，返回根节点视图
    fn mount(&self, device: &str) -> Result<Node, FsError>;

    /// 卸载钩子（可选）
    fn unmount(&self, _root: &Node) {}
}

/// 固定容量的文件系统类型注册表
///
/// 同名类型允许重复注册：旧条目不会被移除，但查找时从最新的条目开始，
/// 因此后注册的同名类型会遮蔽先前的。
pub struct FsRegistry {
    entries: SpinLock<Vec<Arc<dyn FileSystemType>>>,
    capacity: usize,
}

impl FsRegistry {
    /// 创建容量为 `capacity` 的注册表
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: SpinLock::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// 注册文件系统类型
    ///
    /// 注册表已满时返回 [`FsError::FullRegistry`]，已有条目不受影响。
    pub fn register(&self, fs_type: Arc<dyn FileSystemType>) -> Result<(), FsError> {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            log::warn!(
                "vfs: registry full ({} slots), rejecting '{}'",
                self.capacity,
                fs_type.name()
            );
            return Err(FsError::FullRegistry);
        }
        if entries.iter().any(|e| e.name() == fs_type.name()) {
            log::info!("vfs: filesystem type '{}' shadows an earlier registration", fs_type.name());
        } else {
            log::info!("vfs: registered filesystem type '{}'", fs_type.name());
        }
        entries.push(fs_type);
        Ok(())
    }

    /// 按名字查找文件系统类型
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn FileSystemType>> {
        self.entries
            .lock()
            .iter()
            .rev()
            .find(|e| e.name() == name)
            .cloned()
    }

    /// 已注册的类型名（按注册顺序）
    pub fn names(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| String::from(e.name()))
            .collect()
    }

    /// 已占用的槽位数
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 总槽位数
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
