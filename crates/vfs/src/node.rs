//! 节点视图与能力分发
//!
//! [`Node`] 是调用方持有的统一句柄：名字、类型、权限等描述信息，加上后端的
//! [`Inode`]。它由 mount 或 finddir 新鲜生成，归持有者所有（路径解析期间归 VFS，
//! open 之后归文件描述符）；丢弃 `Node` 不会释放后端的 inode。
//!
//! 每个操作先检查能力位，缺失时的结果固定为：`read`/`write` 返回 0 字节，
//! `readdir`/`finddir` 返回 `None`，`open`/`close` 什么也不做。

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use uapi::fcntl::OpenFlags;

use crate::config::MAX_NAME_LEN;
use crate::{Capabilities, DirEntry, FileMode, FsError, Inode, InodeType};

/// 文件系统节点视图
#[derive(Clone)]
pub struct Node {
    name: String,
    inode_no: usize,
    node_type: InodeType,
    mask: FileMode,
    uid: u32,
    gid: u32,
    inode: Arc<dyn Inode>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("inode_no", &self.inode_no)
            .field("type", &self.node_type)
            .field("length", &self.length())
            .finish()
    }
}

impl Node {
    /// 为后端 inode 生成一个视图
    ///
    /// 名字超过 [`MAX_NAME_LEN`] 字节时返回 [`FsError::ComponentTooLong`]。
    pub fn new(name: &str, inode: Arc<dyn Inode>) -> Result<Self, FsError> {
        if name.len() > MAX_NAME_LEN {
            return Err(FsError::ComponentTooLong);
        }
        let meta = inode.metadata()?;
        Ok(Self {
            name: String::from(name),
            inode_no: meta.inode_no,
            node_type: meta.inode_type,
            mask: meta.mode,
            uid: meta.uid,
            gid: meta.gid,
            inode,
        })
    }

    /// 节点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 后端 inode 编号
    pub fn inode_no(&self) -> usize {
        self.inode_no
    }

    /// 节点类型
    pub fn node_type(&self) -> InodeType {
        self.node_type
    }

    /// 是否是目录
    pub fn is_dir(&self) -> bool {
        self.node_type == InodeType::Directory
    }

    /// 权限位
    pub fn mask(&self) -> FileMode {
        self.mask
    }

    /// 所有者 ID
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// 所属组 ID
    pub fn gid(&self) -> u32 {
        self.gid
    }

    /// 当前长度（字节）
    ///
    /// 每次都向后端查询，因此能看到通过其它视图写入引起的增长。
    /// 后端 inode 已被删除时返回 0。
    pub fn length(&self) -> usize {
        self.inode.metadata().map(|meta| meta.size).unwrap_or(0)
    }

    /// 后端 inode
    pub fn inode(&self) -> &Arc<dyn Inode> {
        &self.inode
    }

    /// 能力表
    pub fn capabilities(&self) -> Capabilities {
        self.inode.capabilities()
    }

    fn supports(&self, cap: Capabilities) -> bool {
        self.inode.capabilities().contains(cap)
    }

    /// 从 `offset` 读取最多 `buf.len()` 字节
    ///
    /// 读取量被裁剪到文件末尾；在末尾或越过末尾读取返回 0。
    pub fn read(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.supports(Capabilities::READ) {
            return Ok(0);
        }
        let length = self.length();
        if offset >= length {
            return Ok(0);
        }
        let len = buf.len().min(length - offset);
        unsupported_as_zero(self.inode.read_at(offset, &mut buf[..len]))
    }

    /// 向 `offset` 写入 `buf`
    ///
    /// 目录节点拒绝写入（返回 0 字节，不做任何修改）。
    pub fn write(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        if self.is_dir() || !self.supports(Capabilities::WRITE) {
            return Ok(0);
        }
        unsupported_as_zero(self.inode.write_at(offset, buf))
    }

    /// 调用后端的 open 钩子
    pub fn open(&self, flags: OpenFlags) {
        if self.supports(Capabilities::OPEN) {
            self.inode.open(flags);
        }
    }

    /// 调用后端的 close 钩子
    pub fn close(&self) {
        if self.supports(Capabilities::CLOSE) {
            self.inode.close();
        }
    }

    /// 返回第 `index` 个目录项
    pub fn readdir(&self, index: usize) -> Result<Option<DirEntry>, FsError> {
        if !self.supports(Capabilities::READDIR) {
            return Ok(None);
        }
        match self.inode.readdir(index) {
            Err(FsError::UnsupportedOperation) => Ok(None),
            other => other,
        }
    }

    /// 按名字查找子项，区分大小写的精确匹配
    pub fn finddir(&self, name: &str) -> Result<Option<Node>, FsError> {
        if !self.is_dir() || !self.supports(Capabilities::FINDDIR) {
            return Ok(None);
        }
        match self.inode.lookup(name) {
            Ok(child) => Node::new(name, child).map(Some),
            Err(FsError::NotFound | FsError::UnsupportedOperation) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 在该目录下创建子项并返回其视图
    pub fn create(&self, name: &str, inode_type: InodeType) -> Result<Node, FsError> {
        if !self.is_dir() {
            return Err(FsError::NotDirectory);
        }
        if !self.supports(Capabilities::CREATE) {
            return Err(FsError::UnsupportedOperation);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(FsError::ComponentTooLong);
        }
        let child = self.inode.create(name, inode_type)?;
        Node::new(name, child)
    }

    /// 删除该目录下的普通文件
    pub fn unlink(&self, name: &str) -> Result<(), FsError> {
        self.require_remove()?;
        self.inode.unlink(name)
    }

    /// 删除该目录下的空目录
    pub fn rmdir(&self, name: &str) -> Result<(), FsError> {
        self.require_remove()?;
        self.inode.rmdir(name)
    }

    /// 截断文件
    pub fn truncate(&self, size: usize) -> Result<(), FsError> {
        if self.is_dir() {
            return Err(FsError::IsDirectory);
        }
        if !self.supports(Capabilities::TRUNCATE) {
            return Err(FsError::UnsupportedOperation);
        }
        self.inode.truncate(size)
    }

    fn require_remove(&self) -> Result<(), FsError> {
        if !self.is_dir() {
            return Err(FsError::NotDirectory);
        }
        if !self.supports(Capabilities::REMOVE) {
            return Err(FsError::UnsupportedOperation);
        }
        Ok(())
    }
}

fn unsupported_as_zero(result: Result<usize, FsError>) -> Result<usize, FsError> {
    match result {
        Err(FsError::UnsupportedOperation) => Ok(0),
        other => other,
    }
}
