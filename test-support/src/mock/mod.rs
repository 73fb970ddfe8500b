//! Mock 实现

mod log;

pub use log::MockLogOutput;
