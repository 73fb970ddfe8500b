//! 启动时的文件系统自检
//!
//! 挂载根文件系统，创建并写入 `/test.txt`，读回内容，再列出根目录，
//! 每一步都记录日志。

use alloc::string::String;
use alloc::vec::Vec;
use vfs::{FsError, OpenFlags, Vfs};

use crate::config::{ROOT_DEVICE, ROOT_FS_TYPE};
use crate::fs::init_fs;
use crate::log::{pr_err, pr_info};

/// 自检写入的文件
pub const SELFTEST_PATH: &str = "/test.txt";

/// 自检写入的内容
pub const SELFTEST_MESSAGE: &str = "Hello, BasedOS File System!";

const READ_BUFFER_SIZE: usize = 128;

/// 自检结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    /// 写入的字节数
    pub bytes_written: usize,
    /// 读回的内容
    pub read_back: String,
    /// 根目录下的名字（按 readdir 顺序）
    pub root_entries: Vec<String>,
}

impl SelfTestReport {
    /// 读回的内容是否与写入的一致
    pub fn matches(&self) -> bool {
        self.read_back == SELFTEST_MESSAGE
    }
}

/// 在 `vfs` 上运行文件系统自检
pub fn run_fs_selftest(vfs: &Vfs) -> Result<SelfTestReport, FsError> {
    pr_info!("=== Starting File System Test ===");

    init_fs(vfs)?;
    pr_info!("Mounted {} ({}) at /", ROOT_FS_TYPE, ROOT_DEVICE);

    pr_info!("Creating test file...");
    let bytes_written = write_file(vfs, SELFTEST_PATH, SELFTEST_MESSAGE.as_bytes())?;
    pr_info!("Wrote {} bytes to {}", bytes_written, SELFTEST_PATH);

    pr_info!("Reading back test file...");
    let read_back = read_file(vfs, SELFTEST_PATH)?;
    pr_info!("Read {} bytes: {}", read_back.len(), read_back);

    pr_info!("Root directory contents:");
    let root_entries: Vec<String> = vfs
        .readdir("/")?
        .into_iter()
        .filter(|entry| !entry.name.is_empty())
        .map(|entry| entry.name)
        .collect();
    for name in &root_entries {
        pr_info!("  {}", name);
    }

    let report = SelfTestReport {
        bytes_written,
        read_back,
        root_entries,
    };
    if !report.matches() {
        pr_err!("File System Test: read back data does not match");
    }
    pr_info!("=== File System Test Complete ===");
    Ok(report)
}

fn write_file(vfs: &Vfs, path: &str, data: &[u8]) -> Result<usize, FsError> {
    let fd = vfs.open(path, OpenFlags::O_WRONLY | OpenFlags::O_CREAT)?;
    let written = vfs.write(fd, data);
    vfs.close(fd)?;
    let written = written?;
    if written != data.len() {
        pr_err!("Short write to {}: {} of {} bytes", path, written, data.len());
        return Err(FsError::NoSpace);
    }
    Ok(written)
}

fn read_file(vfs: &Vfs, path: &str) -> Result<String, FsError> {
    let fd = vfs.open(path, OpenFlags::O_RDONLY)?;
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let read = vfs.read(fd, &mut buf[..READ_BUFFER_SIZE - 1]);
    vfs.close(fd)?;
    let n = read?;
    Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
}
