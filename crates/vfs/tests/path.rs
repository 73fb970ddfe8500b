use vfs::path::components;
use vfs::{FsError, split_path};

#[test]
fn test_components_absolute() {
    assert_eq!(components("/foo/bar").unwrap(), ["foo", "bar"]);
    assert!(components("/").unwrap().is_empty());
    assert_eq!(components("///foo///bar///").unwrap(), ["foo", "bar"]);
}

#[test]
fn test_components_keep_dots() {
    assert_eq!(components("/foo/./bar/..").unwrap(), ["foo", ".", "bar", ".."]);
}

#[test]
fn test_components_relative_unsupported() {
    assert_eq!(components("foo/bar"), Err(FsError::UnsupportedOperation));
    assert_eq!(components(""), Err(FsError::UnsupportedOperation));
    assert_eq!(components("./foo"), Err(FsError::UnsupportedOperation));
}

#[test]
fn test_split_path_absolute() {
    assert_eq!(
        split_path("/foo/bar.txt").unwrap(),
        ("/foo".to_string(), "bar.txt".to_string())
    );
    assert_eq!(
        split_path("/hello").unwrap(),
        ("/".to_string(), "hello".to_string())
    );
}

#[test]
fn test_split_path_trailing_slash() {
    assert_eq!(
        split_path("/foo/bar/").unwrap(),
        ("/foo".to_string(), "bar".to_string())
    );
}

#[test]
fn test_split_path_multiple_slashes() {
    assert_eq!(
        split_path("///foo///bar.txt").unwrap(),
        ("/foo".to_string(), "bar.txt".to_string())
    );
}

#[test]
fn test_split_path_root_has_no_leaf() {
    assert_eq!(split_path("/"), Err(FsError::InvalidArgument));
    assert_eq!(split_path("hello.txt"), Err(FsError::UnsupportedOperation));
}

#[test]
fn test_split_path_long_leaf() {
    let path = format!("/dir/{}", "n".repeat(256));
    assert_eq!(split_path(&path), Err(FsError::ComponentTooLong));
}
