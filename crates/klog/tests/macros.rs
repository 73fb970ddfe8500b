//! Integration tests for klog public API (macros + global registration + log facade).

use std::sync::{Mutex, MutexGuard, Once, OnceLock};

use klog::{LogLevel, LogOutput, pr_debug, pr_err, pr_info, pr_warn};

static INIT: Once = Once::new();

static OUTPUT_BUF: OnceLock<Mutex<String>> = OnceLock::new();

/// 全局日志是进程级状态，测试之间串行执行
static SERIAL: Mutex<()> = Mutex::new(());

struct TestOutput;

impl LogOutput for TestOutput {
    fn write_str(&self, s: &str) {
        let buf = OUTPUT_BUF.get_or_init(|| Mutex::new(String::new()));
        buf.lock().unwrap().push_str(s);
    }
}

static TEST_OUTPUT: TestOutput = TestOutput;

fn setup() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    INIT.call_once(|| {
        unsafe { klog::register_log_output(&TEST_OUTPUT) };
        klog::init_logger();
    });
    klog::set_global_level(LogLevel::Info);
    klog::set_console_level(LogLevel::Warning);
    while klog::read_log().is_some() {}
    take_output();
    guard
}

fn take_output() -> String {
    let buf = OUTPUT_BUF.get_or_init(|| Mutex::new(String::new()));
    let mut g = buf.lock().unwrap();
    let out = g.clone();
    g.clear();
    out
}

#[test]
fn test_pr_info_buffered_but_not_printed_by_default() {
    let _guard = setup();

    pr_info!("hello {}", 1);

    assert_eq!(klog::log_len(), 1);
    let entry = klog::read_log().unwrap();
    assert_eq!(entry.level(), LogLevel::Info);
    assert_eq!(entry.message(), "hello 1");

    // 默认控制台阈值为 Warning，Info 不会打印
    assert_eq!(take_output(), "");
}

#[test]
fn test_pr_err_prints_to_console() {
    let _guard = setup();

    pr_err!("boom: {}", "mount");

    let out = take_output();
    assert!(out.contains("[ERR]"));
    assert!(out.contains("boom: mount"));

    let entry = klog::read_log().unwrap();
    assert_eq!(entry.level(), LogLevel::Error);
}

#[test]
fn test_pr_warn_prints_to_console() {
    let _guard = setup();

    pr_warn!("low space");

    assert!(take_output().contains("low space"));
    assert_eq!(klog::read_log().unwrap().level(), LogLevel::Warning);
}

#[test]
fn test_pr_debug_filtered_by_default_level() {
    let _guard = setup();

    pr_debug!("should not be logged");

    assert_eq!(klog::log_len(), 0);
    assert_eq!(take_output(), "");
}

#[test]
fn test_log_facade_records_are_buffered() {
    let _guard = setup();

    log::info!(target: "vfs", "mounted memfs at /");

    let entry = klog::read_log().unwrap();
    assert_eq!(entry.level(), LogLevel::Info);
    assert_eq!(entry.message(), "vfs: mounted memfs at /");
}

#[test]
fn test_log_facade_respects_global_level() {
    let _guard = setup();

    log::debug!("hidden");
    assert_eq!(klog::log_len(), 0);

    klog::set_global_level(LogLevel::Debug);
    log::debug!(target: "memfs", "visible");
    assert_eq!(klog::read_log().unwrap().message(), "memfs: visible");
}
