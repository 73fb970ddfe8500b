//! Integration tests for the basedos syscall surface.

use lazy_static::lazy_static;
use uapi::fcntl::OpenFlags;

use basedos::syscall::{sys_close, sys_lseek, sys_mount, sys_open, sys_read, sys_write};

const O_RDONLY: u32 = OpenFlags::O_RDONLY.bits();
const O_WRONLY: u32 = OpenFlags::O_WRONLY.bits();
const O_RDWR: u32 = OpenFlags::O_RDWR.bits();
const O_CREAT: u32 = OpenFlags::O_CREAT.bits();
const O_APPEND: u32 = OpenFlags::O_APPEND.bits();

const SEEK_SET: i32 = 0;
const SEEK_CUR: i32 = 1;
const SEEK_END: i32 = 2;

lazy_static! {
    static ref ROOT: () = basedos::fs::init().unwrap();
}

fn setup() {
    lazy_static::initialize(&ROOT);
}

#[test]
fn test_open_write_close_read() {
    setup();
    let fd = sys_open("/a.txt", O_WRONLY | O_CREAT);
    assert!(fd >= 0);
    assert_eq!(sys_write(fd, b"hi", 2), 2);
    assert_eq!(sys_close(fd), 0);

    let fd = sys_open("/a.txt", O_RDONLY);
    assert!(fd >= 0);
    let mut buf = [0u8; 16];
    assert_eq!(sys_read(fd, &mut buf, 16), 2);
    assert_eq!(&buf[..2], b"hi");
    assert_eq!(sys_close(fd), 0);
}

#[test]
fn test_failures_return_minus_one() {
    setup();
    assert_eq!(sys_open("/does/not/exist", O_RDONLY), -1);
    assert_eq!(sys_open("relative.txt", O_RDONLY | O_CREAT), -1);
    assert_eq!(sys_close(-1), -1);
    assert_eq!(sys_close(1000), -1);

    let mut buf = [0u8; 4];
    assert_eq!(sys_read(-5, &mut buf, 4), -1);
    assert_eq!(sys_write(63_000, b"x", 1), -1);
    assert_eq!(sys_lseek(-1, 0, SEEK_SET), -1);
}

#[test]
fn test_mode_mismatch_returns_minus_one() {
    setup();
    let fd = sys_open("/ro.txt", O_RDONLY | O_CREAT);
    assert!(fd >= 0);
    assert_eq!(sys_write(fd, b"nope", 4), -1);
    assert_eq!(sys_close(fd), 0);

    let fd = sys_open("/ro.txt", O_WRONLY);
    let mut buf = [0u8; 4];
    assert_eq!(sys_read(fd, &mut buf, 4), -1);
    assert_eq!(sys_close(fd), 0);
    assert_eq!(sys_close(fd), -1);
}

#[test]
fn test_lseek_whence() {
    setup();
    let fd = sys_open("/seek.txt", O_RDWR | O_CREAT);
    assert_eq!(sys_write(fd, b"0123456789", 10), 10);
    assert_eq!(sys_lseek(fd, 2, SEEK_SET), 2);
    assert_eq!(sys_lseek(fd, 3, SEEK_CUR), 5);
    assert_eq!(sys_lseek(fd, -2, SEEK_END), 8);
    assert_eq!(sys_lseek(fd, 0, 3), -1);
    assert_eq!(sys_lseek(fd, -100, SEEK_CUR), -1);

    let mut buf = [0u8; 8];
    assert_eq!(sys_read(fd, &mut buf, 8), 2);
    assert_eq!(&buf[..2], b"89");
    assert_eq!(sys_close(fd), 0);
}

#[test]
fn test_count_limits_transfer() {
    setup();
    let fd = sys_open("/count.txt", O_RDWR | O_CREAT | O_APPEND);
    assert_eq!(sys_write(fd, b"abcdef", 3), 3);
    assert_eq!(sys_lseek(fd, 0, SEEK_SET), 0);
    let mut buf = [0u8; 8];
    assert_eq!(sys_read(fd, &mut buf, 100), 3);
    assert_eq!(&buf[..3], b"abc");
    assert_eq!(sys_close(fd), 0);
}

#[test]
fn test_mount() {
    setup();
    assert_eq!(sys_mount("dev", "/", "nope"), -1);
    assert_eq!(sys_mount("dev", "/mnt", "memfs"), -1);
    assert_eq!(sys_mount("dev", "/", "memfs"), 0);
    assert!(basedos::fs::VFS.lookup("/").unwrap().is_dir());
}
