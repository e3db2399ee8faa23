//! Приёмники строк уведомлений.
//!
//! Notifier пишет каждую строку в два приёмника: экран (stdout или callback)
//! и долговременный лог-файл.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};

use crate::i18n::{Language, MessageKey};

/// Формат таймстемпа в строках консоли и лога.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Построчный приёмник. Ошибка записи возвращается вызывающему как есть.
pub trait LineSink: Send {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// stdout с flush после каждой строки: родительский процесс видит строки сразу.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}

/// Лог-файл сессии (UTF-8, режим дозаписи).
///
/// Клоны пишут в один и тот же файл; записи сериализуются мьютексом.
#[derive(Clone, Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl LogFileSink {
    /// Открыть (или создать) файл для дозаписи.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Записать заголовок сессии:
    /// пустая строка, `=== <banner> ===`, `<Folder>: <абсолютный путь>`.
    pub fn write_banner(
        &mut self,
        language: Language,
        started_at: DateTime<Local>,
        folder: &Path,
    ) -> io::Result<()> {
        let banner = language.format(
            MessageKey::Start,
            &started_at.format(TIMESTAMP_FORMAT).to_string(),
        );
        let text = format!(
            "\n=== {banner} ===\n{}: {}\n",
            language.templates().folder_label,
            folder.display()
        );
        self.write_raw(&text)
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

impl LineSink for LogFileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_raw(&format!("{line}\n"))
    }
}

/// In-memory приёмник. Клоны разделяют один буфер.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

/// Один приёмник для нескольких писателей (сессия и обработчик событий).
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Box<dyn LineSink>>>,
}

impl SharedSink {
    pub fn new(inner: Box<dyn LineSink>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl LineSink for SharedSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_line(line)
    }
}

/// Передаёт каждую строку в callback (in-process API вместо stdout).
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(&str) + Send,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> LineSink for CallbackSink<F>
where
    F: FnMut(&str) + Send,
{
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (self.callback)(line);
        Ok(())
    }
}
