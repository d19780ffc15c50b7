use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// The runner logger
pub struct RunnerLogger {
    state: Mutex<LoggerState>,
}

/// The inner state of the logger
struct LoggerState {
    level: LevelFilter,
    color: bool,
}

/// The global logger
///
/// We use a static here and lock mutable state, this allows sharing the logger between multiple
/// threads as needed.
static LOGGER: RunnerLogger = RunnerLogger {
    state: Mutex::new(LoggerState {
        level: LevelFilter::Info,
        color: true,
    }),
};

impl RunnerLogger {
    pub fn init(level: LevelFilter, color: bool) -> Result<(), SetLoggerError> {
        // We first set the global log level, and install the the static logger to be used by all
        // the threads.
        if let Ok(mut state) = LOGGER.state.lock() {
            state.level = level;
            state.color = color;
        }
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color(&self) -> bool {
        self.state.lock().map(|state| state.color).unwrap_or(false)
    }
}

impl log::Log for RunnerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.state.lock() {
            Ok(state) => metadata.level() <= state.level,
            Err(_) => false,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let color = self.color();
        match record.level() {
            Level::Error if color => eprintln!("\x1b[31m{}\x1b[0m", record.args()),
            Level::Warn if color => println!("\x1b[33m{}\x1b[0m", record.args()),
            Level::Error => eprintln!("Error: {}", record.args()),
            Level::Warn => println!("Warn: {}", record.args()),
            Level::Info => println!("{}", record.args()),
            Level::Debug | Level::Trace => {
                println!("[{} | {}] {}", record.level(), record.target(), record.args())
            }
        }
    }

    fn flush(&self) {}
}
