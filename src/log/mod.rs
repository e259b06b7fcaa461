//! 日志模块，支持在不同环境下的日志打印
//! - QEMU环境：使用cortex-m-semihosting的hprint
//! - 测试环境：使用标准库的print
//! - 其他环境：写入宿主通过 [`set_logger`] 安装的日志记录器，未安装时丢弃

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::RwLock;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(usize)]
pub enum LogLevel {
    /// 错误级别
    Error = 0,
    /// 警告级别
    Warn = 1,
    /// 信息级别
    Info = 2,
    /// 调试级别
    Debug = 3,
    /// 跟踪级别
    Trace = 4,
}

impl LogLevel {
    fn from_usize(raw: usize) -> Self {
        match raw {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// 行首标签
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Error => "[ERROR] ",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG] ",
            LogLevel::Trace => "[TRACE] ",
        }
    }
}

/// 全局日志级别，默认为Info
static GLOBAL_LOG_LEVEL: AtomicUsize = AtomicUsize::new(LogLevel::Info as usize);

/// 设置全局日志级别
pub fn set_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as usize, Ordering::Relaxed);
}

/// 获取全局日志级别
pub fn get_log_level() -> LogLevel {
    LogLevel::from_usize(GLOBAL_LOG_LEVEL.load(Ordering::Relaxed))
}

/// 日志记录器特征
///
/// 宿主实现此 trait 并通过 [`set_logger`] 安装，把日志接到串口、
/// 内核环形缓冲区等输出目标。
pub trait Logger: Sync {
    /// 写入字符串到日志
    fn write_str(&self, s: &str) -> fmt::Result;

    /// 刷新日志
    fn flush(&self) -> fmt::Result;
}

static LOGGER: RwLock<Option<&'static dyn Logger>> = RwLock::new(None);

/// 安装全局日志记录器，替换之前安装的记录器
pub fn set_logger(logger: &'static dyn Logger) {
    *LOGGER.write() = Some(logger);
}

/// 卸载全局日志记录器
pub fn clear_logger() {
    *LOGGER.write() = None;
}

fn write_to_logger(s: &str) -> fmt::Result {
    match *LOGGER.read() {
        Some(logger) => logger.write_str(s),
        None => Ok(()),
    }
}

/// QEMU环境下打印日志
#[cfg(all(feature = "cortex_m3", not(test)))]
#[inline(always)]
pub fn log_write(s: &str) -> fmt::Result {
    cortex_m_semihosting::hprint!("{}", s);
    write_to_logger(s)
}

/// 测试环境下打印日志
#[cfg(test)]
#[inline(always)]
pub fn log_write(s: &str) -> fmt::Result {
    print!("{}", s);
    write_to_logger(s)
}

#[cfg(not(any(test, feature = "cortex_m3")))]
#[inline(always)]
pub fn log_write(s: &str) -> fmt::Result {
    write_to_logger(s)
}

/// 刷新已安装的日志记录器
pub fn flush() -> fmt::Result {
    match *LOGGER.read() {
        Some(logger) => logger.flush(),
        None => Ok(()),
    }
}

/// 输出一整行带级别标签的日志
///
/// 整行先格式化好再一次性写出，多个线程同时打日志时行不会交错。
pub fn log_line(level: LogLevel, args: fmt::Arguments) {
    if level as usize <= get_log_level() as usize {
        let line = alloc::format!("{}{}\n", level.tag(), args);
        let _ = log_write(&line);
    }
}

/// 打印日志的宏，根据日志级别打印
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)*) => {
        {
            if $level as usize <= $crate::log::get_log_level() as usize {
                use core::fmt::Write;
                let mut writer = $crate::log::LogWriter;
                let _ = write!(writer, $($arg)*);
            }
        }
    };
}

/// 日志写入器
pub struct LogWriter;

impl Write for LogWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        log_write(s)
    }
}

/// 错误级别日志
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::log::log_line($crate::log::LogLevel::Error, format_args!($($arg)*));
    }};
}

/// 警告级别日志
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::log::log_line($crate::log::LogLevel::Warn, format_args!($($arg)*));
    }};
}

/// 信息级别日志
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        $crate::log::log_line($crate::log::LogLevel::Info, format_args!($($arg)*));
    }};
}

/// 调试级别日志
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        $crate::log::log_line($crate::log::LogLevel::Debug, format_args!($($arg)*));
    }};
}

/// 跟踪级别日志
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{
        $crate::log::log_line($crate::log::LogLevel::Trace, format_args!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::string::String;
    use std::vec::Vec;

    struct CaptureLogger {
        buf: spin::Mutex<String>,
    }

    impl Logger for CaptureLogger {
        fn write_str(&self, s: &str) -> fmt::Result {
            self.buf.lock().push_str(s);
            Ok(())
        }

        fn flush(&self) -> fmt::Result {
            Ok(())
        }
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        buf: spin::Mutex::new(String::new()),
    };

    #[test]
    #[serial]
    fn test_log_level_setting() {
        set_log_level(LogLevel::Debug);
        assert_eq!(get_log_level(), LogLevel::Debug);

        set_log_level(LogLevel::Error);
        assert_eq!(get_log_level(), LogLevel::Error);

        set_log_level(LogLevel::Info);
    }

    #[test]
    fn test_log_writer() {
        let mut writer = LogWriter;
        let result = writer.write_str("测试日志");
        assert!(result.is_ok());
    }

    #[test]
    fn test_log_level_comparison() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    #[serial]
    fn test_installed_logger_filters_by_level() {
        CAPTURE.buf.lock().clear();
        set_logger(&CAPTURE);
        set_log_level(LogLevel::Info);

        info!("reg [{:02x}]", 0x14);
        debug!("hidden");

        clear_logger();
        let out = CAPTURE.buf.lock().clone();
        // 其他并行测试也可能写入，只检查本测试的输出
        assert!(out.contains("[INFO] reg [14]\n"));
        assert!(!out.contains("hidden"));
    }

    struct LineLogger {
        writes: spin::Mutex<Vec<String>>,
    }

    impl Logger for LineLogger {
        fn write_str(&self, s: &str) -> fmt::Result {
            self.writes.lock().push(String::from(s));
            Ok(())
        }

        fn flush(&self) -> fmt::Result {
            Ok(())
        }
    }

    static LINES: LineLogger = LineLogger {
        writes: spin::Mutex::new(Vec::new()),
    };

    #[test]
    #[serial]
    fn test_each_line_is_one_write() {
        LINES.writes.lock().clear();
        set_logger(&LINES);
        set_log_level(LogLevel::Trace);

        let workers: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    for n in 0..20 {
                        warn!("worker {} line {}", i, n);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        clear_logger();
        set_log_level(LogLevel::Info);
        let writes = LINES.writes.lock().clone();
        for i in 0..4 {
            for n in 0..20 {
                let line = std::format!("[WARN] worker {} line {}\n", i, n);
                assert!(writes.contains(&line), "{:?}", line);
            }
        }
    }
}
