//! Диагностическое логирование IFC Checker.
//!
//! ## Уровни логов
//! - `ERROR`: критические ошибки (например, недоступен лог-файл сессии)
//! - `WARN`:  некритичные проблемы (ошибки notify, неподдерживаемые события)
//! - `INFO`:  события жизненного цикла (start/stop watcher'а и сессии)
//! - `DEBUG`: детали классификации событий
//! - `TRACE`: сырые события notify
//!
//! Диагностика пишется в stderr. stdout зарезервирован под строки
//! уведомлений: GUI-оболочка ретранслирует их как есть.
//!
//! ## Использование
//! ```ignore
//! use ifc_checker::logging::init_logging;
//!
//! init_logging(); // вызывается один раз при старте
//!
//! log::info!(target: "ifc_checker::file_watcher", "Starting watcher");
//! ```

use std::io::Write;
use std::sync::Once;

use log::{Level, LevelFilter};

static INIT: Once = Once::new();

/// Инициализировать логирование (idempotent).
///
/// Управление уровнем логов: переменная окружения `RUST_LOG`.
/// Примеры:
/// - `RUST_LOG=debug` — решения классификатора по каждому событию
/// - `RUST_LOG=ifc_checker=trace` — плюс сырые события notify
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_module("ifc_checker", LevelFilter::Info)
            .filter_module("notify", LevelFilter::Warn)
            .parse_env("RUST_LOG")
            .format(|buf, record| {
                // Формат: [timestamp] [LEVEL] [target] message
                writeln!(
                    buf,
                    "[{}] [{}] [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    level_letter(record.level()),
                    record.target(),
                    record.args()
                )
            })
            .try_init();
    });
}

fn level_letter(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}
