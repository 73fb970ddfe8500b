//! Memfs inode 存储
//!
//! `InodeTable` 是 arena：每个槽位保存一条 inode 记录，目录通过 `first_child`
//! 和子项的 `next_sibling` 串成单链表，新建的子项总是挂在链表尾部，
//! 因此 readdir 的顺序就是创建顺序。
//!
//! 删除会把槽位放回空闲链表。槽位被复用时会分配新的 inode 编号，
//! 仍然指向旧编号的 [`MemfsInode`] 视图随后的操作都返回 [`FsError::NotFound`]。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use sync::SpinLock;
use vfs::config::MAX_NAME_LEN;
use vfs::{Capabilities, DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType};

/// 根目录所在的槽位
pub(super) const ROOT_INDEX: usize = 0;

const FILE_MODE: u32 = 0o644;
const DIR_MODE: u32 = 0o755;

enum InodeKind {
    File { data: Vec<u8> },
    Directory { first_child: Option<usize> },
}

struct InodeRecord {
    inode_no: usize,
    name: String,
    parent: Option<usize>,
    next_sibling: Option<usize>,
    kind: InodeKind,
}

impl InodeRecord {
    fn inode_type(&self) -> InodeType {
        match self.kind {
            InodeKind::File { .. } => InodeType::File,
            InodeKind::Directory { .. } => InodeType::Directory,
        }
    }

    fn size(&self) -> usize {
        match &self.kind {
            InodeKind::File { data } => data.len(),
            InodeKind::Directory { .. } => 0,
        }
    }
}

/// inode arena 与容量统计
pub(super) struct InodeTable {
    slots: Vec<Option<InodeRecord>>,
    free: Vec<usize>,
    next_inode_no: usize,
    live: usize,
    /// 文件内容占用的字节数
    used_bytes: usize,
    /// 内容字节上限（0 表示无限制）
    max_bytes: usize,
}

/// 目录子项迭代器，产出槽位下标
struct Children<'a> {
    table: &'a InodeTable,
    next: Option<usize>,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.next?;
        self.next = self.table.slot(index).and_then(|r| r.next_sibling);
        Some(index)
    }
}

impl InodeTable {
    /// 创建只含根目录的表
    pub(super) fn new(max_bytes: usize) -> Self {
        let root = InodeRecord {
            inode_no: 1,
            name: String::from("/"),
            parent: None,
            next_sibling: None,
            kind: InodeKind::Directory { first_child: None },
        };
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            next_inode_no: 2,
            live: 1,
            used_bytes: 0,
            max_bytes,
        }
    }

    pub(super) fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub(super) fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub(super) fn inode_count(&self) -> usize {
        self.live
    }

    pub(super) fn root_inode_no(&self) -> Result<usize, FsError> {
        self.slot(ROOT_INDEX)
            .map(|r| r.inode_no)
            .ok_or(FsError::NotFound)
    }

    fn slot(&self, index: usize) -> Option<&InodeRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn get(&self, index: usize, inode_no: usize) -> Result<&InodeRecord, FsError> {
        match self.slot(index) {
            Some(record) if record.inode_no == inode_no => Ok(record),
            _ => Err(FsError::NotFound),
        }
    }

    fn get_mut(&mut self, index: usize, inode_no: usize) -> Result<&mut InodeRecord, FsError> {
        match self.slots.get_mut(index).and_then(Option::as_mut) {
            Some(record) if record.inode_no == inode_no => Ok(record),
            _ => Err(FsError::NotFound),
        }
    }

    fn children(&self, dir: &InodeRecord) -> Result<Children<'_>, FsError> {
        match dir.kind {
            InodeKind::Directory { first_child } => Ok(Children {
                table: self,
                next: first_child,
            }),
            InodeKind::File { .. } => Err(FsError::NotDirectory),
        }
    }

    fn find_child(&self, dir: &InodeRecord, name: &str) -> Result<Option<usize>, FsError> {
        Ok(self
            .children(dir)?
            .find(|&i| self.slot(i).is_some_and(|r| r.name == name)))
    }

    fn alloc_slot(&mut self, record: InodeRecord) -> Result<usize, FsError> {
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(record);
            return Ok(index);
        }
        self.slots.try_reserve(1).map_err(|_| FsError::NoSpace)?;
        self.slots.push(Some(record));
        Ok(self.slots.len() - 1)
    }

    /// 在目录 `parent` 下追加一个子项，返回 `(槽位, inode 编号)`
    fn insert(
        &mut self,
        parent: usize,
        parent_no: usize,
        name: &str,
        inode_type: InodeType,
    ) -> Result<(usize, usize), FsError> {
        let dir = self.get(parent, parent_no)?;
        if self.find_child(dir, name)?.is_some() {
            return Err(FsError::AlreadyExists);
        }
        let tail = self.children(dir)?.last();

        let kind = match inode_type {
            InodeType::File => InodeKind::File { data: Vec::new() },
            InodeType::Directory => InodeKind::Directory { first_child: None },
            _ => return Err(FsError::UnsupportedOperation),
        };
        let inode_no = self.next_inode_no;
        let index = self.alloc_slot(InodeRecord {
            inode_no,
            name: String::from(name),
            parent: Some(parent),
            next_sibling: None,
            kind,
        })?;
        self.next_inode_no += 1;
        self.live += 1;

        match tail {
            Some(tail) => {
                if let Some(record) = self.slots[tail].as_mut() {
                    record.next_sibling = Some(index);
                }
            }
            None => {
                if let InodeKind::Directory { first_child } = &mut self.get_mut(parent, parent_no)?.kind {
                    *first_child = Some(index);
                }
            }
        }
        Ok((index, inode_no))
    }

    /// 把 `index` 从父目录的链表中摘下并释放槽位
    fn remove(&mut self, index: usize) -> Result<(), FsError> {
        let (parent, next, size) = {
            let record = self.slot(index).ok_or(FsError::NotFound)?;
            let parent = record.parent.ok_or(FsError::InvalidArgument)?;
            (parent, record.next_sibling, record.size())
        };

        let head = match self.slot(parent).map(|r| &r.kind) {
            Some(InodeKind::Directory { first_child }) => *first_child,
            Some(InodeKind::File { .. }) => return Err(FsError::NotDirectory),
            None => return Err(FsError::NotFound),
        };
        if head == Some(index) {
            if let Some(InodeKind::Directory { first_child }) =
                self.slots[parent].as_mut().map(|r| &mut r.kind)
            {
                *first_child = next;
            }
        } else {
            let prev = Children {
                table: self,
                next: head,
            }
            .find(|&i| self.slot(i).is_some_and(|r| r.next_sibling == Some(index)))
            .ok_or(FsError::NotFound)?;
            if let Some(record) = self.slots[prev].as_mut() {
                record.next_sibling = next;
            }
        }

        self.slots[index] = None;
        self.free.push(index);
        self.live -= 1;
        self.used_bytes -= size;
        Ok(())
    }

    /// 计入 `bytes` 字节的新内容
    fn charge(&mut self, bytes: usize) -> Result<(), FsError> {
        let used = self.used_bytes.checked_add(bytes).ok_or(FsError::NoSpace)?;
        if self.max_bytes != 0 && used > self.max_bytes {
            log::warn!(
                "memfs: out of space ({} of {} bytes used, {} requested)",
                self.used_bytes,
                self.max_bytes,
                bytes
            );
            return Err(FsError::NoSpace);
        }
        self.used_bytes = used;
        Ok(())
    }

    fn file_data_mut(&mut self, index: usize, inode_no: usize) -> Result<&mut Vec<u8>, FsError> {
        match &mut self.get_mut(index, inode_no)?.kind {
            InodeKind::File { data } => Ok(data),
            InodeKind::Directory { .. } => Err(FsError::IsDirectory),
        }
    }

    /// 把文件调整为恰好 `new_len` 字节，增长部分补零
    ///
    /// 增长时按精确大小重新分配，不预留余量。在单调分配器上旧缓冲区不会被回收，
    /// 所以频繁增长的文件会持续消耗堆空间。
    fn resize_file(&mut self, index: usize, inode_no: usize, new_len: usize) -> Result<(), FsError> {
        let old_len = self.file_data_mut(index, inode_no)?.len();
        if new_len <= old_len {
            self.file_data_mut(index, inode_no)?.truncate(new_len);
            self.used_bytes -= old_len - new_len;
            return Ok(());
        }

        let extra = new_len - old_len;
        self.charge(extra)?;
        let data = self.file_data_mut(index, inode_no)?;
        if data.try_reserve_exact(extra).is_err() {
            self.used_bytes -= extra;
            log::warn!("memfs: allocation of {} bytes for inode {} failed", new_len, inode_no);
            return Err(FsError::NoSpace);
        }
        data.resize(new_len, 0);
        log::debug!(
            "memfs: inode {} grew {} -> {} bytes (previous buffer may not be reclaimed)",
            inode_no,
            old_len,
            new_len
        );
        Ok(())
    }
}

/// Memfs inode 视图
///
/// 只保存槽位下标和 inode 编号；所有数据都在共享的 `InodeTable` 中。
pub struct MemfsInode {
    table: Arc<SpinLock<InodeTable>>,
    index: usize,
    inode_no: usize,
    inode_type: InodeType,
}

impl MemfsInode {
    pub(super) fn new(
        table: Arc<SpinLock<InodeTable>>,
        index: usize,
        inode_no: usize,
        inode_type: InodeType,
    ) -> Arc<Self> {
        Arc::new(Self {
            table,
            index,
            inode_no,
            inode_type,
        })
    }

    fn child_view(&self, index: usize, inode_no: usize, inode_type: InodeType) -> Arc<Self> {
        Self::new(self.table.clone(), index, inode_no, inode_type)
    }

    /// 在本目录中查找 `name` 对应的槽位
    fn locate(&self, table: &InodeTable, name: &str) -> Result<usize, FsError> {
        let dir = table.get(self.index, self.inode_no)?;
        table.find_child(dir, name)?.ok_or(FsError::NotFound)
    }
}

fn check_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name.contains('/') {
        return Err(FsError::InvalidArgument);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(FsError::ComponentTooLong);
    }
    Ok(())
}

impl Inode for MemfsInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        let table = self.table.lock();
        let record = table.get(self.index, self.inode_no)?;
        let mode = match record.kind {
            InodeKind::File { .. } => FILE_MODE,
            InodeKind::Directory { .. } => DIR_MODE,
        };
        Ok(InodeMetadata {
            inode_no: record.inode_no,
            inode_type: record.inode_type(),
            mode: FileMode::from_bits_truncate(mode),
            uid: 0,
            gid: 0,
            size: record.size(),
        })
    }

    fn capabilities(&self) -> Capabilities {
        match self.inode_type {
            InodeType::Directory => {
                Capabilities::OPEN
                    | Capabilities::CLOSE
                    | Capabilities::READDIR
                    | Capabilities::FINDDIR
                    | Capabilities::CREATE
                    | Capabilities::REMOVE
            }
            _ => {
                Capabilities::READ
                    | Capabilities::WRITE
                    | Capabilities::OPEN
                    | Capabilities::CLOSE
                    | Capabilities::TRUNCATE
            }
        }
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let table = self.table.lock();
        let data = match &table.get(self.index, self.inode_no)?.kind {
            InodeKind::File { data } => data,
            InodeKind::Directory { .. } => return Err(FsError::IsDirectory),
        };
        if offset >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        let end = offset.checked_add(buf.len()).ok_or(FsError::NoSpace)?;
        let mut table = self.table.lock();
        if end > table.file_data_mut(self.index, self.inode_no)?.len() {
            table.resize_file(self.index, self.inode_no, end)?;
        }
        let data = table.file_data_mut(self.index, self.inode_no)?;
        data[offset..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    fn readdir(&self, index: usize) -> Result<Option<DirEntry>, FsError> {
        let table = self.table.lock();
        let dir = table.get(self.index, self.inode_no)?;
        Ok(table
            .children(dir)?
            .nth(index)
            .and_then(|i| table.slot(i))
            .map(|child| DirEntry {
                inode_no: child.inode_no,
                name: child.name.clone(),
            }))
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        let table = self.table.lock();
        let index = self.locate(&table, name)?;
        let child = table.slot(index).ok_or(FsError::NotFound)?;
        Ok(self.child_view(index, child.inode_no, child.inode_type()))
    }

    fn create(&self, name: &str, inode_type: InodeType) -> Result<Arc<dyn Inode>, FsError> {
        check_name(name)?;
        let mut table = self.table.lock();
        let (index, inode_no) = table.insert(self.index, self.inode_no, name, inode_type)?;
        log::debug!("memfs: created {:?} '{}' (inode {})", inode_type, name, inode_no);
        Ok(self.child_view(index, inode_no, inode_type))
    }

    fn unlink(&self, name: &str) -> Result<(), FsError> {
        let mut table = self.table.lock();
        let index = self.locate(&table, name)?;
        if let Some(InodeKind::Directory { .. }) = table.slot(index).map(|r| &r.kind) {
            return Err(FsError::IsDirectory);
        }
        table.remove(index)
    }

    fn rmdir(&self, name: &str) -> Result<(), FsError> {
        let mut table = self.table.lock();
        let index = self.locate(&table, name)?;
        let empty = match table.slot(index).map(|r| &r.kind) {
            Some(InodeKind::Directory { first_child }) => first_child.is_none(),
            _ => return Err(FsError::NotDirectory),
        };
        if !empty {
            return Err(FsError::DirectoryNotEmpty);
        }
        table.remove(index)
    }

    fn truncate(&self, size: usize) -> Result<(), FsError> {
        self.table
            .lock()
            .resize_file(self.index, self.inode_no, size)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
