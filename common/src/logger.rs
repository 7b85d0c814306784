use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub enum LogTarget {
    Stderr,
    File(String),
}

pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: Box<dyn Write + Send>) -> Self {
        Self {
            prefix,
            sink: Mutex::new(sink),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let entry = match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        };

        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", entry);
            let _ = sink.flush();
        }
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, target: LogTarget) -> Result<(), String> {
    let sink: Box<dyn Write + Send> = match target {
        LogTarget::Stderr => Box::new(std::io::stderr()),
        LogTarget::File(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("Failed to open log file {}: {}", path, e))?,
        ),
    };
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
    Ok(())
}

// Messages logged before init_logger() are dropped.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
