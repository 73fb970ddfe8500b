//! 日志输出的 Mock 实现
//!
//! 注意：klog 只保存一个全局输出端，同一测试二进制中的测试共享它。

use alloc::string::String;
use alloc::vec::Vec;
use klog::LogOutput;
use sync::SpinLock;

/// 把写入的内容保存在内存中的日志输出端
pub struct MockLogOutput {
    buffer: SpinLock<String>,
}

impl MockLogOutput {
    /// 创建空的输出端
    pub const fn new() -> Self {
        Self {
            buffer: SpinLock::new(String::new()),
        }
    }

    /// 目前捕获的全部输出
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// 按行拆分的输出
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    /// 输出中是否出现过 `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.buffer.lock().contains(needle)
    }

    /// 清空已捕获的输出
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for MockLogOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl LogOutput for MockLogOutput {
    fn write_str(&self, s: &str) {
        self.buffer.lock().push_str(s);
    }
}
