//! 打开的文件
//!
//! [`File`] 是文件描述符表中的一项：节点视图、读写游标和打开标志。
//! 游标没有上界，越过文件末尾 seek 是合法的，之后的写入才会让文件增长。

use sync::SpinLock;
use uapi::fcntl::{OpenFlags, SeekWhence};

use crate::{FsError, Node};

/// 打开的文件
#[derive(Debug)]
pub struct File {
    node: Node,
    offset: SpinLock<usize>,
    flags: OpenFlags,
}

impl File {
    /// 以 `flags` 打开 `node`，游标为 0
    pub fn new(node: Node, flags: OpenFlags) -> Self {
        Self {
            node,
            offset: SpinLock::new(0),
            flags,
        }
    }

    /// 绑定的节点
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// 打开标志
    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// 当前游标
    pub fn offset(&self) -> usize {
        *self.offset.lock()
    }

    /// 是否以可读模式打开
    pub fn readable(&self) -> bool {
        self.flags.readable()
    }

    /// 是否以可写模式打开
    pub fn writable(&self) -> bool {
        self.flags.writable()
    }

    /// 从游标处读取，游标前进实际读取的字节数
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.readable() {
            return Err(FsError::PermissionDenied);
        }
        let mut offset = self.offset.lock();
        let n = self.node.read(*offset, buf)?;
        *offset += n;
        Ok(n)
    }

    /// 在游标处写入，游标前进实际写入的字节数
    ///
    /// 以 `O_APPEND` 打开时，每次写入前先把游标移到文件末尾。
    pub fn write(&self, buf: &[u8]) -> Result<usize, FsError> {
        if !self.writable() {
            return Err(FsError::PermissionDenied);
        }
        let mut offset = self.offset.lock();
        if self.flags.contains(OpenFlags::O_APPEND) {
            *offset = self.node.length();
        }
        let n = self.node.write(*offset, buf)?;
        *offset += n;
        Ok(n)
    }

    /// 移动游标，返回新位置
    ///
    /// 结果为负或溢出时返回 [`FsError::InvalidArgument`]，游标保持不变。
    pub fn lseek(&self, offset: isize, whence: SeekWhence) -> Result<usize, FsError> {
        let mut cursor = self.offset.lock();
        let base = match whence {
            SeekWhence::Set => 0,
            SeekWhence::Cur => *cursor,
            SeekWhence::End => self.node.length(),
        };
        let new_pos = isize::try_from(base)
            .ok()
            .and_then(|base| base.checked_add(offset))
            .filter(|pos| *pos >= 0)
            .ok_or(FsError::InvalidArgument)?;
        *cursor = new_pos as usize;
        Ok(*cursor)
    }
}
