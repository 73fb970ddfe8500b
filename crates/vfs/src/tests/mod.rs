//! VFS 单元测试与 Mock 后端

mod fd_table;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::sync::atomic::{AtomicUsize, Ordering};
use sync::SpinLock;
use uapi::fcntl::OpenFlags;

use crate::{
    Capabilities, DirEntry, FileMode, FileSystemType, FsError, Inode, InodeMetadata, InodeType,
    Node,
};

/// 简单的内存文件，带 open/close 计数
pub struct MockFile {
    ino: usize,
    data: SpinLock<Vec<u8>>,
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
}

impl MockFile {
    pub fn new(ino: usize, data: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            ino,
            data: SpinLock::new(data.to_vec()),
            opens: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        })
    }
}

impl Inode for MockFile {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: self.ino,
            inode_type: InodeType::File,
            mode: FileMode::S_IRUSR | FileMode::S_IWUSR,
            uid: 0,
            gid: 0,
            size: self.data.lock().len(),
        })
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::READ
            | Capabilities::WRITE
            | Capabilities::OPEN
            | Capabilities::CLOSE
            | Capabilities::TRUNCATE
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let data = self.data.lock();
        if offset >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        let mut data = self.data.lock();
        let end = offset + buf.len();
        if end > data.len() {
            data.resize(end, 0);
        }
        data[offset..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    fn open(&self, _flags: OpenFlags) {
        self.opens.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn truncate(&self, size: usize) -> Result<(), FsError> {
        self.data.lock().resize(size, 0);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 没有任何能力的设备节点
pub struct MockDevice;

impl Inode for MockDevice {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: 99,
            inode_type: InodeType::CharDevice,
            mode: FileMode::empty(),
            uid: 0,
            gid: 0,
            size: 16,
        })
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn read_at(&self, _offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        buf.fill(0xff);
        Ok(buf.len())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 只支持查找、枚举和创建普通文件的目录
pub struct MockDir {
    ino: usize,
    next_ino: Arc<AtomicUsize>,
    children: SpinLock<Vec<(String, Arc<dyn Inode>)>>,
}

impl MockDir {
    pub fn new(ino: usize, next_ino: Arc<AtomicUsize>) -> Arc<Self> {
        Arc::new(Self {
            ino,
            next_ino,
            children: SpinLock::new(Vec::new()),
        })
    }

    pub fn add(&self, name: &str, inode: Arc<dyn Inode>) {
        self.children.lock().push((String::from(name), inode));
    }
}

impl Inode for MockDir {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: self.ino,
            inode_type: InodeType::Directory,
            mode: FileMode::all(),
            uid: 0,
            gid: 0,
            size: 0,
        })
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::READDIR | Capabilities::FINDDIR | Capabilities::CREATE
    }

    fn readdir(&self, index: usize) -> Result<Option<DirEntry>, FsError> {
        let children = self.children.lock();
        match children.get(index) {
            Some((name, inode)) => Ok(Some(DirEntry {
                inode_no: inode.metadata()?.inode_no,
                name: name.clone(),
            })),
            None => Ok(None),
        }
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        self.children
            .lock()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, inode)| inode.clone())
            .ok_or(FsError::NotFound)
    }

    fn create(&self, name: &str, inode_type: InodeType) -> Result<Arc<dyn Inode>, FsError> {
        if self.lookup(name).is_ok() {
            return Err(FsError::AlreadyExists);
        }
        let ino = self.next_ino.fetch_add(1, Ordering::SeqCst);
        let inode: Arc<dyn Inode> = match inode_type {
            InodeType::File => MockFile::new(ino, &[]),
            InodeType::Directory => MockDir::new(ino, self.next_ino.clone()),
            _ => return Err(FsError::UnsupportedOperation),
        };
        self.add(name, inode.clone());
        Ok(inode)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Mock 文件系统类型
///
/// 根目录预置 `/hello.txt`（内容 `"hello"`）、`/dev/null0`（无能力设备）和空目录 `/dev`。
pub struct MockFs {
    name: &'static str,
    pub root: Arc<MockDir>,
    pub hello: Arc<MockFile>,
    pub unmounts: AtomicUsize,
}

impl MockFs {
    pub fn new(name: &'static str) -> Arc<Self> {
        let next_ino = Arc::new(AtomicUsize::new(10));
        let root = MockDir::new(1, next_ino.clone());
        let hello = MockFile::new(2, b"hello");
        let dev = MockDir::new(3, next_ino);
        dev.add("null0", Arc::new(MockDevice));
        root.add("hello.txt", hello.clone());
        root.add("dev", dev);
        Arc::new(Self {
            name,
            root,
            hello,
            unmounts: AtomicUsize::new(0),
        })
    }
}

impl FileSystemType for MockFs {
    fn name(&self) -> &str {
        self.name
    }

    fn mount(&self, _device: &str) -> Result<Node, FsError> {
        Node::new("/", self.root.clone())
    }

    fn unmount(&self, _root: &Node) {
        self.unmounts.fetch_add(1, Ordering::SeqCst);
    }
}

/// mount 总是失败的文件系统类型
pub struct BrokenFs;

impl FileSystemType for BrokenFs {
    fn name(&self) -> &str {
        "broken"
    }

    fn mount(&self, _device: &str) -> Result<Node, FsError> {
        Err(FsError::NoSpace)
    }
}

/// 创建一个已挂载 `mockfs` 的 VFS
pub fn mounted_vfs() -> (crate::Vfs, Arc<MockFs>) {
    let vfs = crate::Vfs::new();
    let fs = MockFs::new("mockfs");
    vfs.register_filesystem(fs.clone()).unwrap();
    vfs.mount("dev0", "/", "mockfs").unwrap();
    (vfs, fs)
}
