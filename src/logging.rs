//! `log` backend: the browser console on wasm, `env_logger` natively.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    /// Routes records to `console.error/warn/info/debug` by level.
    pub struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            match record.level() {
                Level::Error => web_sys::console::error_1(&line.into()),
                Level::Warn => web_sys::console::warn_1(&line.into()),
                Level::Info => web_sys::console::info_1(&line.into()),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
            }
        }

        fn flush(&self) {}
    }

    pub static LOGGER: ConsoleLogger = ConsoleLogger;
}

/// Install the logger once. A second call only changes the level.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    let installed = log::set_logger(&console::LOGGER).is_ok();

    #[cfg(not(target_arch = "wasm32"))]
    let installed = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .is_ok();

    log::set_max_level(level);
    if installed {
        log::debug!("logging at {}", level);
    }
}
