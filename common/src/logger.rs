use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        eprintln!("{}", format_line(&timestamp, self.prefix.as_deref(), file, line, message));
    }
}

fn format_line(timestamp: &str, prefix: Option<&str>, file: &str, line: u32, message: &str) -> String {
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match prefix {
        Some(prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
        None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

/// No-op until `init_logger` has been called.
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
