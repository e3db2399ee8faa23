//! Классификатор событий: фильтр путей, debounce и таблица отслеживаемых файлов.
//!
//! Состояния пути: нет записи → запись с mtime → запись удалена.
//! Таблицы заполняются только событиями; существующие на диске файлы
//! при старте не сканируются.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use log::{debug, trace};

use crate::clock::Clock;
use crate::file_watcher::events::{NotificationEvent, NotificationKind, RawEvent, RawEventKind};

/// Отслеживаемое расширение (сравнение без учёта регистра).
pub const TRACKED_SUFFIX: &str = ".ifc";

/// Минимальный интервал между двумя `Updated` для одного пути.
pub const DEBOUNCE_WINDOW_MS: i64 = 1000;

/// Пропустить событие дальше, только если это файл с расширением `.ifc`.
pub fn is_tracked(path: &Path, is_dir: bool) -> bool {
    !is_dir
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(TRACKED_SUFFIX))
}

/// Источник времени модификации файла.
pub trait ModTimeSource: Send {
    /// `None`, если файл недоступен (удалён между событиями, нет прав и т.п.).
    fn modified(&self, path: &Path) -> Option<SystemTime>;
}

/// mtime из файловой системы.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsModTime;

impl ModTimeSource for FsModTime {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

/// Подавляет повторные `Updated`, пришедшие в пределах окна.
#[derive(Debug)]
pub struct DebounceGate {
    window: chrono::Duration,
    last_notified: HashMap<PathBuf, DateTime<Local>>,
}

impl DebounceGate {
    pub fn new(window: chrono::Duration) -> Self {
        Self {
            window,
            last_notified: HashMap::new(),
        }
    }

    /// `true` и запоминает `now`, если с прошлого уведомления прошло не меньше окна.
    pub fn should_notify(&mut self, path: &Path, now: DateTime<Local>) -> bool {
        if let Some(last) = self.last_notified.get(path) {
            if now.signed_duration_since(*last) < self.window {
                return false;
            }
        }
        self.last_notified.insert(path.to_path_buf(), now);
        true
    }

    pub fn forget(&mut self, path: &Path) {
        self.last_notified.remove(path);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.last_notified.contains_key(path)
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(chrono::Duration::milliseconds(DEBOUNCE_WINDOW_MS))
    }
}

/// Машина состояний по путям.
pub struct Classifier {
    mod_times: HashMap<PathBuf, Option<SystemTime>>,
    debounce: DebounceGate,
    mtime: Box<dyn ModTimeSource>,
    clock: Arc<dyn Clock>,
}

impl Classifier {
    pub fn new(mtime: Box<dyn ModTimeSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            mod_times: HashMap::new(),
            debounce: DebounceGate::default(),
            mtime,
            clock,
        }
    }

    /// Классифицировать сырое событие. `None` — событие отфильтровано или подавлено.
    pub fn classify(&mut self, event: &RawEvent) -> Option<NotificationEvent> {
        if !is_tracked(&event.path, event.is_dir) {
            trace!("Ignoring {:?} for {}", event.kind, event.path.display());
            return None;
        }

        match event.kind {
            RawEventKind::Created => Some(self.on_created(&event.path)),
            RawEventKind::Modified => self.on_modified(&event.path),
            RawEventKind::Deleted => Some(self.on_deleted(&event.path)),
        }
    }

    fn on_created(&mut self, path: &Path) -> NotificationEvent {
        let mtime = self.mtime.modified(path);
        self.mod_times.insert(path.to_path_buf(), mtime);
        self.emit(NotificationKind::New, path)
    }

    fn on_modified(&mut self, path: &Path) -> Option<NotificationEvent> {
        let Some(new_mtime) = self.mtime.modified(path) else {
            debug!("mtime unavailable, skipping: {}", path.display());
            return None;
        };
        let old_mtime = self.mod_times.get(path).copied().flatten();
        if old_mtime == Some(new_mtime) {
            return None;
        }

        self.mod_times.insert(path.to_path_buf(), Some(new_mtime));
        let now = self.clock.now();
        if !self.debounce.should_notify(path, now) {
            debug!("Debounced update: {}", path.display());
            return None;
        }
        Some(notification(NotificationKind::Updated, path, now))
    }

    fn on_deleted(&mut self, path: &Path) -> NotificationEvent {
        self.mod_times.remove(path);
        self.debounce.forget(path);
        self.emit(NotificationKind::Deleted, path)
    }

    fn emit(&self, kind: NotificationKind, path: &Path) -> NotificationEvent {
        notification(kind, path, self.clock.now())
    }

    pub fn is_tracking(&self, path: &Path) -> bool {
        self.mod_times.contains_key(path)
    }

    /// Сохранённый mtime; `None` и для неотслеживаемого пути, и для нечитаемого mtime.
    pub fn recorded_mtime(&self, path: &Path) -> Option<SystemTime> {
        self.mod_times.get(path).copied().flatten()
    }

    pub fn is_debouncing(&self, path: &Path) -> bool {
        self.debounce.contains(path)
    }

    pub fn tracked_count(&self) -> usize {
        self.mod_times.len()
    }
}

fn notification(kind: NotificationKind, path: &Path, at: DateTime<Local>) -> NotificationEvent {
    NotificationEvent {
        kind,
        path: path.to_path_buf(),
        timestamp: at,
    }
}
