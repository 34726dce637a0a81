// src/backend/utils/logger.rs
// Routes the `log` facade to the canister debug output.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CanisterLogger;

static LOGGER: CanisterLogger = CanisterLogger;

impl Log for CanisterLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "❌ ERROR",
            Level::Warn => "⚠️ WARN",
            _ => "📝 INFO",
        };
        ic_cdk::api::print(format!("{}: {}", tag, record.args()));
    }

    fn flush(&self) {}
}

/// Installs the canister logger. Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
