//! 文件相关的系统调用

use uapi::fcntl::{OpenFlags, SeekWhence};
use vfs::FsError;

use crate::fs::VFS;
use crate::log::pr_debug;

fn fd_from(fd: i32) -> Result<usize, FsError> {
    usize::try_from(fd).map_err(|_| FsError::InvalidDescriptor)
}

fn status<T>(name: &str, result: Result<T, FsError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            pr_debug!("{}: {}", name, e);
            None
        }
    }
}

/// 打开 `path`，返回文件描述符；失败返回 -1
pub fn sys_open(path: &str, flags: u32) -> i32 {
    let flags = OpenFlags::from_bits_retain(flags);
    status("sys_open", VFS.open(path, flags))
        .and_then(|fd| i32::try_from(fd).ok())
        .unwrap_or(-1)
}

/// 关闭文件描述符；成功返回 0，无效的 fd 返回 -1
pub fn sys_close(fd: i32) -> i32 {
    match status("sys_close", fd_from(fd).and_then(|fd| VFS.close(fd))) {
        Some(()) => 0,
        None => -1,
    }
}

/// 从 `fd` 读取最多 `n` 字节到 `buf`，返回实际读取的字节数；失败返回 -1
pub fn sys_read(fd: i32, buf: &mut [u8], n: usize) -> isize {
    let len = n.min(buf.len());
    status("sys_read", fd_from(fd).and_then(|fd| VFS.read(fd, &mut buf[..len])))
        .map_or(-1, |count| count as isize)
}

/// 把 `buf` 的前 `n` 字节写入 `fd`，返回实际写入的字节数；失败返回 -1
pub fn sys_write(fd: i32, buf: &[u8], n: usize) -> isize {
    let len = n.min(buf.len());
    status("sys_write", fd_from(fd).and_then(|fd| VFS.write(fd, &buf[..len])))
        .map_or(-1, |count| count as isize)
}

/// 移动 `fd` 的游标，返回新位置；无效的 fd 或 whence 返回 -1
pub fn sys_lseek(fd: i32, offset: isize, whence: i32) -> isize {
    let result = fd_from(fd).and_then(|fd| {
        let whence = SeekWhence::try_from(whence).map_err(|_| FsError::InvalidArgument)?;
        VFS.lseek(fd, offset, whence)
    });
    status("sys_lseek", result)
        .and_then(|pos| isize::try_from(pos).ok())
        .unwrap_or(-1)
}

/// 挂载文件系统；成功返回 0，失败返回 -1
pub fn sys_mount(device: &str, mount_point: &str, fs_type: &str) -> i32 {
    match status("sys_mount", VFS.mount(device, mount_point, fs_type)) {
        Some(()) => 0,
        None => -1,
    }
}
