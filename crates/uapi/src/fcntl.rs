//! 文件打开标志与 seek 起点

bitflags::bitflags! {
    /// open() 的标志位
    ///
    /// 低两位是访问模式（`O_ACCMODE`），不是独立的位：`O_RDONLY` 的值为 0。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        const O_RDONLY = 0x0000;
        const O_WRONLY = 0x0001;
        const O_RDWR   = 0x0002;
        const O_ACCMODE = 0x0003;
        const O_CREAT  = 0x0100;
        const O_TRUNC  = 0x0200;
        const O_APPEND = 0x0400;
    }
}

/// 访问模式（从 `O_ACCMODE` 位段解出）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl OpenFlags {
    /// 解析访问模式；`O_ACCMODE` 的保留值 3 视为非法
    pub fn access_mode(&self) -> Option<AccessMode> {
        match self.bits() & Self::O_ACCMODE.bits() {
            0 => Some(AccessMode::ReadOnly),
            1 => Some(AccessMode::WriteOnly),
            2 => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }

    /// 是否允许读
    pub fn readable(&self) -> bool {
        matches!(
            self.access_mode(),
            Some(AccessMode::ReadOnly | AccessMode::ReadWrite)
        )
    }

    /// 是否允许写
    pub fn writable(&self) -> bool {
        matches!(
            self.access_mode(),
            Some(AccessMode::WriteOnly | AccessMode::ReadWrite)
        )
    }
}

/// lseek 的起点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SeekWhence {
    Set = 0,
    Cur = 1,
    End = 2,
}

impl TryFrom<i32> for SeekWhence {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SeekWhence::Set),
            1 => Ok(SeekWhence::Cur),
            2 => Ok(SeekWhence::End),
            other => Err(other),
        }
    }
}
