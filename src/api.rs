//! In-process API для GUI-оболочки.
//!
//! Альтернатива запуску `ifc-checker` подпроцессом: те же строки, что
//! бинарник печатает в stdout, приходят в callback.
//!
//! Контракт:
//! - одна активная сессия на процесс;
//! - после [`stop_watching`] callback больше не вызывается;
//! - повторный старт после остановки допустим.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::error::IfcCheckerError;
use crate::i18n::Language;
use crate::logging;
use crate::session::{self, Session, SessionConfig, DEFAULT_LOG_FILE};
use crate::sink::CallbackSink;

static SESSION: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

/// Инициализация диагностического логирования.
pub fn init_logging() {
    logging::init_logging();
}

/// Запуск мониторинга.
///
/// - `lang`: код языка; неизвестный код → `en`.
/// - `log_path`: `None` → `ifc_monitor.log` в текущей директории.
/// - `on_line`: получает каждую строку уведомления (`<ts> <msg>`) и строку
///   «Monitoring folder».
///
/// Возвращает абсолютный путь наблюдаемой папки (для отображения в UI).
pub fn start_watching(
    folder: String,
    lang: &str,
    log_path: Option<String>,
    mut on_line: impl FnMut(String) + Send + 'static,
) -> Result<String, IfcCheckerError> {
    logging::init_logging();

    // Примечание: recover from poisoned mutex - если предыдущий поток паниковал,
    // мы всё равно можем безопасно продолжить работу.
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_some() {
        return Err(IfcCheckerError::WatcherAlreadyRunning);
    }

    let config = SessionConfig::new(folder)
        .language(Language::from_code(lang))
        .log_path(log_path.map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from));

    let display = CallbackSink::new(move |line: &str| on_line(line.to_string()));
    let session = session::start_session(&config, Box::new(display))?;

    let watch_dir = session.watch_dir().to_string_lossy().to_string();
    *guard = Some(session);
    Ok(watch_dir)
}

/// Остановить мониторинг (graceful shutdown).
pub fn stop_watching() -> Result<(), IfcCheckerError> {
    let session = {
        let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    };

    match session {
        Some(s) => s.stop(),
        None => Err(IfcCheckerError::WatcherNotRunning),
    }
}

/// Идёт ли сейчас сессия.
pub fn is_watching() -> bool {
    SESSION
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|s| !s.is_finished())
}
