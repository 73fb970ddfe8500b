//! 文件描述符表
//!
//! 固定容量，`alloc()` 总是分配最小的空闲 fd。槽位数组按需增长，
//! 但不会超过 `max_fds`。

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use sync::SpinLock;

use crate::{File, FsError};

/// 文件描述符表
pub struct FDTable {
    /// 文件描述符数组
    files: SpinLock<Vec<Option<Arc<File>>>>,
    /// 最大文件描述符数量
    max_fds: usize,
}

impl fmt::Debug for FDTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.files.lock();
        let used = files.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("FDTable")
            .field("max_fds", &self.max_fds)
            .field("slots", &files.len())
            .field("used", &used)
            .finish()
    }
}

impl FDTable {
    /// 创建容量为 `max_fds` 的文件描述符表
    pub fn new(max_fds: usize) -> Self {
        Self {
            files: SpinLock::new(Vec::new()),
            max_fds,
        }
    }

    /// 是否还有空闲槽位
    pub fn has_free_slot(&self) -> bool {
        let files = self.files.lock();
        files.len() < self.max_fds || files.iter().any(|slot| slot.is_none())
    }

    /// 分配一个新的文件描述符
    pub fn alloc(&self, file: Arc<File>) -> Result<usize, FsError> {
        let mut files = self.files.lock();

        // 查找最小可用 FD
        for (fd, slot) in files.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(file);
                return Ok(fd);
            }
        }

        let fd = files.len();
        if fd >= self.max_fds {
            return Err(FsError::DescriptorsExhausted);
        }

        files.push(Some(file));
        Ok(fd)
    }

    /// 获取文件对象
    pub fn get(&self, fd: usize) -> Result<Arc<File>, FsError> {
        let files = self.files.lock();
        files
            .get(fd)
            .and_then(|f| f.clone())
            .ok_or(FsError::InvalidDescriptor)
    }

    /// 关闭文件描述符，返回被移出的文件
    pub fn close(&self, fd: usize) -> Result<Arc<File>, FsError> {
        let mut files = self.files.lock();
        files
            .get_mut(fd)
            .and_then(Option::take)
            .ok_or(FsError::InvalidDescriptor)
    }

    /// 取走并清空所有已打开的文件描述符
    pub fn take_all(&self) -> Vec<(usize, Arc<File>)> {
        let mut files = self.files.lock();
        files
            .iter_mut()
            .enumerate()
            .filter_map(|(fd, slot)| slot.take().map(|file| (fd, file)))
            .collect()
    }

    /// 已占用的文件描述符数
    pub fn used(&self) -> usize {
        self.files.lock().iter().filter(|slot| slot.is_some()).count()
    }

    /// 容量
    pub fn capacity(&self) -> usize {
        self.max_fds
    }
}
