//! 路径解析
//!
//! 只接受绝对路径。路径按 `/` 切分，空组件（连续斜杠、末尾斜杠）被跳过，
//! 每个组件通过 [`Node::finddir`] 逐级下降。`.` 与 `..` 不做特殊处理，
//! 按普通名字查找。

use alloc::string::String;
use alloc::vec::Vec;
use uapi::fcntl::OpenFlags;

use crate::config::MAX_NAME_LEN;
use crate::{FsError, InodeType, Node};

/// 将绝对路径切分为非空组件
///
/// 相对路径返回 [`FsError::UnsupportedOperation`]。组件长度不在这里检查，
/// 由解析过程按遍历顺序检查。
pub fn components(path: &str) -> Result<Vec<&str>, FsError> {
    let rest = path
        .strip_prefix('/')
        .ok_or(FsError::UnsupportedOperation)?;
    Ok(rest.split('/').filter(|s| !s.is_empty()).collect())
}

/// 将绝对路径分割为父目录路径和最后一个组件
///
/// `"/"` 没有最后一个组件，返回 [`FsError::InvalidArgument`]。
pub fn split_path(path: &str) -> Result<(String, String), FsError> {
    let mut parts = components(path)?;
    let leaf = parts.pop().ok_or(FsError::InvalidArgument)?;
    check_component(leaf)?;

    let mut dir = String::from("/");
    dir.push_str(&parts.join("/"));
    Ok((dir, String::from(leaf)))
}

fn check_component(name: &str) -> Result<(), FsError> {
    if name.len() > MAX_NAME_LEN {
        return Err(FsError::ComponentTooLong);
    }
    Ok(())
}

/// 从 `root` 开始解析 `path`
///
/// - 路径只有 `/`（或只有斜杠）时解析为 `root` 本身
/// - 最后一个组件不存在且 `flags` 含 `O_CREAT` 时，在父目录中创建普通文件
/// - 其余任何组件不存在都返回 [`FsError::NotFound`]
pub fn resolve(root: &Node, path: &str, flags: OpenFlags) -> Result<Node, FsError> {
    let parts = components(path)?;
    let last = parts.len().saturating_sub(1);
    let mut current = root.clone();

    for (i, name) in parts.iter().enumerate() {
        check_component(name)?;
        current = match current.finddir(name)? {
            Some(child) => child,
            None if i == last && flags.contains(OpenFlags::O_CREAT) => {
                log::debug!("vfs: creating '{}' under '{}'", name, current.name());
                current.create(name, InodeType::File)?
            }
            None => return Err(FsError::NotFound),
        };
    }
    Ok(current)
}

/// 解析 `path` 的父目录，返回父目录节点和最后一个组件
pub fn resolve_parent(root: &Node, path: &str) -> Result<(Node, String), FsError> {
    let (dir, leaf) = split_path(path)?;
    let parent = resolve(root, &dir, OpenFlags::O_RDONLY)?;
    if !parent.is_dir() {
        return Err(FsError::NotDirectory);
    }
    Ok((parent, leaf))
}
