use alloc::sync::Arc;
use uapi::fcntl::{OpenFlags, SeekWhence};

use super::MockFile;
use crate::{FDTable, File, FsError, Node};

fn file(data: &[u8], flags: OpenFlags) -> Arc<File> {
    let node = Node::new("f", MockFile::new(1, data)).unwrap();
    Arc::new(File::new(node, flags))
}

#[test]
fn test_alloc_lowest_free() {
    let table = FDTable::new(4);
    assert_eq!(table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap(), 0);
    assert_eq!(table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap(), 1);
    assert_eq!(table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap(), 2);
    table.close(1).unwrap();
    assert_eq!(table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap(), 1);
    assert_eq!(table.used(), 3);
}

#[test]
fn test_alloc_exhausted() {
    let table = FDTable::new(2);
    table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap();
    table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap();
    assert!(!table.has_free_slot());
    assert_eq!(
        table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap_err(),
        FsError::DescriptorsExhausted
    );
    assert_eq!(table.capacity(), 2);
}

#[test]
fn test_close_twice_is_invalid() {
    let table = FDTable::new(4);
    let fd = table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap();
    let other = table.alloc(file(b"keep", OpenFlags::O_RDONLY)).unwrap();
    table.close(fd).unwrap();
    assert_eq!(table.close(fd).unwrap_err(), FsError::InvalidDescriptor);
    assert_eq!(table.close(100).unwrap_err(), FsError::InvalidDescriptor);
    assert_eq!(table.get(other).unwrap().node().length(), 4);
}

#[test]
fn test_take_all() {
    let table = FDTable::new(4);
    table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap();
    table.alloc(file(b"", OpenFlags::O_RDONLY)).unwrap();
    table.close(0).unwrap();
    let taken = table.take_all();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].0, 1);
    assert_eq!(table.used(), 0);
}

#[test]
fn test_file_access_mode() {
    let ro = file(b"data", OpenFlags::O_RDONLY);
    assert_eq!(ro.write(b"x").unwrap_err(), FsError::PermissionDenied);
    let wo = file(b"data", OpenFlags::O_WRONLY);
    let mut buf = [0u8; 4];
    assert_eq!(wo.read(&mut buf).unwrap_err(), FsError::PermissionDenied);
    let rw = file(b"data", OpenFlags::O_RDWR);
    assert_eq!(rw.read(&mut buf).unwrap(), 4);
    assert_eq!(rw.write(b"!").unwrap(), 1);
    assert_eq!(rw.node().length(), 5);
}

#[test]
fn test_file_cursor_advances_by_actual_count() {
    let f = file(b"abcdef", OpenFlags::O_RDONLY);
    let mut buf = [0u8; 4];
    assert_eq!(f.read(&mut buf).unwrap(), 4);
    assert_eq!(f.offset(), 4);
    assert_eq!(f.read(&mut buf).unwrap(), 2);
    assert_eq!(f.offset(), 6);
    assert_eq!(f.read(&mut buf).unwrap(), 0);
    assert_eq!(f.offset(), 6);
}

#[test]
fn test_file_lseek() {
    let f = file(b"0123456789", OpenFlags::O_RDWR);
    assert_eq!(f.lseek(3, SeekWhence::Set).unwrap(), 3);
    assert_eq!(f.lseek(2, SeekWhence::Cur).unwrap(), 5);
    assert_eq!(f.lseek(-1, SeekWhence::End).unwrap(), 9);
    assert_eq!(f.lseek(10, SeekWhence::End).unwrap(), 20);
    assert_eq!(f.lseek(-21, SeekWhence::Cur).unwrap_err(), FsError::InvalidArgument);
    assert_eq!(f.offset(), 20);
}

#[test]
fn test_file_append() {
    let f = file(b"abc", OpenFlags::O_WRONLY | OpenFlags::O_APPEND);
    f.lseek(0, SeekWhence::Set).unwrap();
    assert_eq!(f.write(b"de").unwrap(), 2);
    assert_eq!(f.offset(), 5);
    assert_eq!(f.node().length(), 5);
}
