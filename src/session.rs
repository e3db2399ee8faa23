//! Сессия мониторинга: проверка папки, заголовок в логе, запуск watcher'а,
//! ожидание сигнала остановки.

use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use log::info;

use crate::classifier::FsModTime;
use crate::clock::{Clock, SystemClock};
use crate::error::IfcCheckerError;
use crate::file_watcher::{self, WatcherHandle, POLL_TICK};
use crate::handler::ChangeHandler;
use crate::i18n::{Language, MessageKey};
use crate::sink::{LineSink, LogFileSink, SharedSink};

/// Лог-файл по умолчанию (в текущей директории).
pub const DEFAULT_LOG_FILE: &str = "ifc_monitor.log";

/// Параметры одной сессии.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub folder: PathBuf,
    pub language: Language,
    pub log_path: PathBuf,
}

impl SessionConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            language: Language::default(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// Локализованное сообщение об ошибке конфигурации.
    pub fn error_message(&self) -> String {
        self.language
            .format(MessageKey::Error, &self.folder.display().to_string())
    }

    /// Локализованное сообщение об остановке мониторинга.
    pub fn stopped_message(&self) -> String {
        self.language
            .format(MessageKey::Stopped, &self.folder.display().to_string())
    }
}

/// Запущенная сессия.
pub struct Session {
    handle: WatcherHandle,
    log: LogFileSink,
}

impl Session {
    pub fn watch_dir(&self) -> &Path {
        self.handle.watch_dir()
    }

    pub fn log_path(&self) -> &Path {
        self.log.path()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) -> Result<(), IfcCheckerError> {
        info!("Stopping session for {}", self.handle.watch_dir().display());
        self.handle.stop()
    }
}

/// Запустить сессию с системными часами.
pub fn start_session(
    config: &SessionConfig,
    display: Box<dyn LineSink>,
) -> Result<Session, IfcCheckerError> {
    start_session_with_clock(config, display, Arc::new(SystemClock))
}

/// Запустить сессию.
///
/// Если `config.folder` не директория — [`IfcCheckerError::NotADirectory`],
/// лог-файл при этом не открывается.
pub fn start_session_with_clock(
    config: &SessionConfig,
    display: Box<dyn LineSink>,
    clock: Arc<dyn Clock>,
) -> Result<Session, IfcCheckerError> {
    let watch_dir = file_watcher::validate_watch_dir(&config.folder)?;

    let mut log = LogFileSink::open(&config.log_path)?;
    log.write_banner(config.language, clock.now(), &watch_dir)?;

    let mut display = SharedSink::new(display);
    let mut handler = ChangeHandler::with_sources(
        config.language,
        &watch_dir,
        Box::new(display.clone()),
        Box::new(log.clone()),
        Box::new(FsModTime),
        clock,
    );
    let handle = file_watcher::start_watcher(&watch_dir, move |event| {
        handler.handle(&event).map(|_| ())
    })?;

    if let Err(e) = display.write_line(
        &config
            .language
            .format(MessageKey::Monitoring, &config.folder.display().to_string()),
    ) {
        let _ = handle.stop();
        return Err(e.into());
    }

    info!(
        "Session started: folder={}, lang={}, log={}",
        watch_dir.display(),
        config.language.code(),
        config.log_path.display()
    );
    Ok(Session { handle, log })
}

/// Запустить сессию и блокироваться до сигнала в `shutdown`.
///
/// Закрытый канал тоже считается сигналом остановки. Если поток watcher'а
/// умер сам (например, лог-файл стал недоступен), его ошибка возвращается.
pub fn run_session(
    config: &SessionConfig,
    display: Box<dyn LineSink>,
    shutdown: &mpsc::Receiver<()>,
) -> Result<(), IfcCheckerError> {
    let session = start_session(config, display)?;

    loop {
        match shutdown.recv_timeout(POLL_TICK) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                info!("Shutdown signal received");
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if session.is_finished() {
                    break;
                }
            }
        }
    }

    session.stop()
}
