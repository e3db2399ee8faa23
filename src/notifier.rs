//! Форматирование уведомлений и запись в два приёмника.

use std::path::{Component, Path, PathBuf};

use crate::file_watcher::events::{NotificationEvent, NotificationKind};
use crate::i18n::{Language, MessageKey};
use crate::sink::{LineSink, TIMESTAMP_FORMAT};

/// Разделитель в отображаемых путях, независимо от платформы.
pub const DISPLAY_SEPARATOR: char = '\\';

/// Путь относительно `root` в виде `\sub\model.ifc`.
///
/// `..` схлопывается с предыдущим сегментом. Если путь не лежит под `root`
/// (в том числе после схлопывания), возвращается исходный путь без изменений.
pub fn display_path(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.display().to_string();
    };

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return path.display().to_string();
                }
            }
            Component::RootDir | Component::Prefix(_) => return path.display().to_string(),
        }
    }

    if parts.is_empty() {
        return format!("{DISPLAY_SEPARATOR}.");
    }
    parts
        .iter()
        .map(|part| format!("{DISPLAY_SEPARATOR}{part}"))
        .collect()
}

/// Абсолютная форма `path` без обращения к файловой системе.
pub fn absolute_root(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl NotificationKind {
    pub fn message_key(self) -> MessageKey {
        match self {
            NotificationKind::New => MessageKey::New,
            NotificationKind::Updated => MessageKey::Updated,
            NotificationKind::Deleted => MessageKey::Deleted,
        }
    }
}

/// Пишет уведомления на экран (`<ts> <msg>`) и в лог (`<ts> - <msg>`).
pub struct Notifier {
    language: Language,
    root: PathBuf,
    display: Box<dyn LineSink>,
    log: Box<dyn LineSink>,
}

impl Notifier {
    pub fn new(
        language: Language,
        root: &Path,
        display: Box<dyn LineSink>,
        log: Box<dyn LineSink>,
    ) -> Self {
        Self {
            language,
            root: absolute_root(root),
            display,
            log,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Текст сообщения без таймстемпа.
    pub fn message(&self, event: &NotificationEvent) -> String {
        self.language.format(
            event.kind.message_key(),
            &display_path(&self.root, &event.path),
        )
    }

    /// Записать уведомление в оба приёмника.
    ///
    /// Ошибка экрана только логируется; ошибка лога возвращается вызывающему.
    pub fn notify(&mut self, event: &NotificationEvent) -> std::io::Result<()> {
        let message = self.message(event);
        let ts = event.timestamp.format(TIMESTAMP_FORMAT);

        if let Err(e) = self.display.write_line(&format!("{ts} {message}")) {
            log::warn!("Failed to write notification to display: {e}");
        }
        self.log.write_line(&format!("{ts} - {message}"))
    }
}
