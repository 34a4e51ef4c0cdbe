//! Logger installation.
//!
//! The library only logs through the `log` macros. Binaries pick a sink:
//! the browser console on wasm32, stderr for the CLI. Installing twice is
//! harmless; the first logger wins and later calls only adjust the level.

use log::LevelFilter;

/// Install the browser console logger at `level`
#[cfg(target_arch = "wasm32")]
pub fn init_console(level: LevelFilter) {
    static LOGGER: console::ConsoleLogger = console::ConsoleLogger;
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    /// Forwards records to `console.*` by level
    pub(super) struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record<'_>) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Install a stderr logger at `level`
#[cfg(not(target_arch = "wasm32"))]
pub fn init_stderr(level: LevelFilter) {
    if simplelog::WriteLogger::init(level, simplelog::Config::default(), std::io::stderr())
        .is_err()
    {
        log::set_max_level(level);
    }
}

/// Level for `count` repetitions of `-v`, starting from warnings
pub fn verbosity(count: usize) -> LevelFilter {
    match count {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity(0), LevelFilter::Warn);
        assert_eq!(verbosity(1), LevelFilter::Info);
        assert_eq!(verbosity(2), LevelFilter::Debug);
        assert_eq!(verbosity(7), LevelFilter::Trace);
    }
}
