use chrono::Local;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    tag: Option<String>,
}

impl Logger {
    fn new(tag: Option<String>) -> Self {
        Self { tag }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match &self.tag {
            Some(tag) => println!("[{}][{}] {}", timestamp, tag, message),
            None => println!("[{}] {}", timestamp, message),
        }
    }
}

pub fn init_logger(tag: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(tag));
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
