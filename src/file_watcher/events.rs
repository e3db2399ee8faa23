//! Типы событий file_watcher.
//!
//! [`RawEvent`] приходит от watch source, [`NotificationEvent`] выдаёт
//! классификатор и сразу потребляет notifier.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::EventKind;

/// Вид сырого события файловой системы.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEventKind {
    Created,
    Modified,
    Deleted,
}

/// Сырое событие: что произошло, с каким путём, каталог ли это.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl RawEvent {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::file(RawEventKind::Created, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::file(RawEventKind::Modified, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::file(RawEventKind::Deleted, path)
    }

    fn file(kind: RawEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            is_dir: false,
        }
    }

    /// Пометить событие как событие каталога.
    pub fn dir(mut self) -> Self {
        self.is_dir = true;
        self
    }
}

/// Вид уведомления.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    New,
    Updated,
    Deleted,
}

/// Уведомление, выданное классификатором.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
}

/// Разложить событие notify на сырые события.
///
/// Переименования не склеиваются: старое имя даёт `Deleted`, новое `Created`.
/// notify сообщает о переименовании парой `From`/`To` и затем ещё раз
/// сводным `Both`; сводное событие пропускается.
pub fn from_notify(event: &notify::Event) -> Vec<RawEvent> {
    let paths = &event.paths;
    match event.kind {
        EventKind::Create(kind) => paths
            .iter()
            .map(|p| RawEvent {
                kind: RawEventKind::Created,
                is_dir: kind == CreateKind::Folder || is_dir_now(p),
                path: p.clone(),
            })
            .collect(),
        EventKind::Remove(kind) => paths
            .iter()
            .map(|p| RawEvent {
                kind: RawEventKind::Deleted,
                is_dir: kind == RemoveKind::Folder,
                path: p.clone(),
            })
            .collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => rename_events(mode, paths),
        EventKind::Modify(_) => paths
            .iter()
            .map(|p| RawEvent {
                kind: RawEventKind::Modified,
                is_dir: is_dir_now(p),
                path: p.clone(),
            })
            .collect(),
        EventKind::Access(_) | EventKind::Other | EventKind::Any => Vec::new(),
    }
}

fn rename_events(mode: RenameMode, paths: &[PathBuf]) -> Vec<RawEvent> {
    let removed = |p: &PathBuf| RawEvent {
        kind: RawEventKind::Deleted,
        path: p.clone(),
        is_dir: false,
    };
    let appeared = |p: &PathBuf| RawEvent {
        kind: RawEventKind::Created,
        path: p.clone(),
        is_dir: is_dir_now(p),
    };

    match mode {
        RenameMode::Both => Vec::new(),
        RenameMode::From => paths.iter().map(removed).collect(),
        RenameMode::To => paths.iter().map(appeared).collect(),
        // Any/Other: по факту существования пути.
        _ => paths
            .iter()
            .map(|p| if p.exists() { appeared(p) } else { removed(p) })
            .collect(),
    }
}

fn is_dir_now(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_dir())
}
