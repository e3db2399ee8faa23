//! Локализованные сообщения.
//!
//! Язык выбирается один раз при создании обработчика; неизвестный код
//! заменяется на английский.

/// Поддерживаемые языки сообщений.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ru,
    De,
}

/// Ключ сообщения.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    New,
    Updated,
    Deleted,
    Monitoring,
    Error,
    Start,
    Stopped,
}

/// Шаблоны одного языка. В каждом шаблоне ровно один плейсхолдер `{}`.
#[derive(Debug)]
pub struct MessageTemplates {
    pub new: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub monitoring: &'static str,
    pub error: &'static str,
    pub start: &'static str,
    pub stopped: &'static str,
    /// Подпись строки с путём в заголовке сессии.
    pub folder_label: &'static str,
}

static EN: MessageTemplates = MessageTemplates {
    new: "[NEW] File created: {}",
    updated: "[UPDATED] File modified: {}",
    deleted: "[DELETED] File deleted: {}",
    monitoring: "Monitoring folder: {}",
    error: "Error: {} is not a valid directory",
    start: "Monitoring started at {}",
    stopped: "Monitoring stopped: {}",
    folder_label: "Folder",
};

static RU: MessageTemplates = MessageTemplates {
    new: "[НОВЫЙ] Файл создан: {}",
    updated: "[ИЗМЕНЁН] Файл изменён: {}",
    deleted: "[УДАЛЁН] Файл удалён: {}",
    monitoring: "Мониторинг папки: {}",
    error: "Ошибка: {} не является папкой",
    start: "Мониторинг запущен в {}",
    stopped: "Мониторинг остановлен: {}",
    folder_label: "Папка",
};

static DE: MessageTemplates = MessageTemplates {
    new: "[NEU] Datei erstellt: {}",
    updated: "[AKTUALISIERT] Datei geändert: {}",
    deleted: "[GELÖSCHT] Datei gelöscht: {}",
    monitoring: "Überwachung des Ordners: {}",
    error: "Fehler: {} ist kein gültiges Verzeichnis",
    start: "Überwachung gestartet am {}",
    stopped: "Überwachung beendet: {}",
    folder_label: "Ordner",
};

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::De];

    /// Разобрать код языка (`en`, `ru`, `de`, без учёта регистра).
    /// Неизвестный код даёт [`Language::En`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "ru" => Language::Ru,
            "de" => Language::De,
            other => {
                log::debug!("Unsupported language code {other:?}, falling back to en");
                Language::En
            }
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::De => "de",
        }
    }

    pub fn templates(self) -> &'static MessageTemplates {
        match self {
            Language::En => &EN,
            Language::Ru => &RU,
            Language::De => &DE,
        }
    }

    /// Подставить `arg` в шаблон `key`.
    pub fn format(self, key: MessageKey, arg: &str) -> String {
        self.templates().template(key).replacen("{}", arg, 1)
    }
}

impl MessageTemplates {
    pub fn template(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::New => self.new,
            MessageKey::Updated => self.updated,
            MessageKey::Deleted => self.deleted,
            MessageKey::Monitoring => self.monitoring,
            MessageKey::Error => self.error,
            MessageKey::Start => self.start,
            MessageKey::Stopped => self.stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [MessageKey; 7] = [
        MessageKey::New,
        MessageKey::Updated,
        MessageKey::Deleted,
        MessageKey::Monitoring,
        MessageKey::Error,
        MessageKey::Start,
        MessageKey::Stopped,
    ];

    #[test]
    fn test_every_template_has_exactly_one_placeholder() {
        for lang in Language::ALL {
            for key in KEYS {
                let template = lang.templates().template(key);
                assert_eq!(
                    template.matches("{}").count(),
                    1,
                    "{:?}/{:?}: {template}",
                    lang,
                    key
                );
            }
        }
    }

    #[test]
    fn test_unsupported_code_behaves_like_english() {
        let fallback = Language::from_code("xx");
        assert_eq!(fallback, Language::En);
        for key in KEYS {
            assert_eq!(
                fallback.format(key, "\\a.ifc"),
                Language::En.format(key, "\\a.ifc")
            );
        }
    }

    #[test]
    fn test_codes_round_trip_case_insensitively() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), lang);
            assert_eq!(Language::from_code(&lang.code().to_uppercase()), lang);
        }
    }

    #[test]
    fn test_format_substitutes_path() {
        assert_eq!(
            Language::Ru.format(MessageKey::Deleted, "\\sub\\m.ifc"),
            "[УДАЛЁН] Файл удалён: \\sub\\m.ifc"
        );
        assert_eq!(
            Language::De.format(MessageKey::New, "\\m.ifc"),
            "[NEU] Datei erstellt: \\m.ifc"
        );
    }

    #[test]
    fn test_placeholder_in_argument_is_not_expanded() {
        assert_eq!(
            Language::En.format(MessageKey::New, "{}.ifc"),
            "[NEW] File created: {}.ifc"
        );
    }
}
