//! Модуль мониторинга файловой системы.
//!
//! Отвечает за:
//! - проверку, что целевой путь — директория
//! - запуск рекурсивного `notify` watcher'а в отдельном потоке
//! - преобразование событий notify в [`RawEvent`]
//! - graceful shutdown

pub mod events;

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{error, info, trace, warn};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::IfcCheckerError;
use crate::notifier::absolute_root;

pub use events::{NotificationEvent, NotificationKind, RawEvent, RawEventKind};

/// Период опроса stop-канала в потоке watcher'а.
pub const POLL_TICK: Duration = Duration::from_millis(250);

/// Handle запущенного watcher'а.
pub struct WatcherHandle {
  stop_tx: mpsc::Sender<()>,
  join: Option<thread::JoinHandle<Result<(), IfcCheckerError>>>,
  watch_dir: PathBuf,
}

impl WatcherHandle {
  pub fn watch_dir(&self) -> &Path {
    &self.watch_dir
  }

  /// Поток watcher'а завершился сам (фатальная ошибка обработчика или notify).
  pub fn is_finished(&self) -> bool {
    self.join.as_ref().map_or(true, thread::JoinHandle::is_finished)
  }

  /// Остановить watcher и дождаться потока. Возвращает результат потока.
  pub fn stop(mut self) -> Result<(), IfcCheckerError> {
    let _ = self.stop_tx.send(());
    match self.join.take() {
      Some(join) => join.join().map_err(|_| IfcCheckerError::WatcherTerminated)?,
      None => Ok(()),
    }
  }
}

/// Проверить, что `path` — существующая директория, и вернуть абсолютный путь.
///
/// Путь канонизируется: notify на некоторых платформах (FSEvents) отдаёт
/// пути без симлинков, и относительный путь должен считаться от той же базы.
pub fn validate_watch_dir(path: &Path) -> Result<PathBuf, IfcCheckerError> {
  if !path.is_dir() {
    return Err(IfcCheckerError::NotADirectory(path.to_path_buf()));
  }
  Ok(std::fs::canonicalize(path).unwrap_or_else(|_| absolute_root(path)))
}

/// Запустить рекурсивный watcher.
///
/// `on_event` вызывается в потоке watcher'а для каждого сырого события.
/// Ошибка из `on_event` фатальна: поток завершается, и она возвращается из
/// [`WatcherHandle::stop`].
pub fn start_watcher(
  watch_dir: &Path,
  mut on_event: impl FnMut(RawEvent) -> Result<(), IfcCheckerError> + Send + 'static,
) -> Result<WatcherHandle, IfcCheckerError> {
  let watch_dir = validate_watch_dir(watch_dir)?;

  info!("Starting watcher for: {}", watch_dir.display());

  let (stop_tx, stop_rx) = mpsc::channel::<()>();
  let (event_tx, event_rx) = mpsc::channel::<Result<notify::Event, notify::Error>>();
  let (ready_tx, ready_rx) = mpsc::channel::<Result<(), IfcCheckerError>>();

  let watch_dir_clone = watch_dir.clone();
  let join = thread::spawn(move || -> Result<(), IfcCheckerError> {
    let mut watcher: RecommendedWatcher = match notify::recommended_watcher(move |res| {
      // best-effort send; если receiver уже закрыт — просто игнорируем.
      let _ = event_tx.send(res);
    }) {
      Ok(w) => w,
      Err(e) => {
        error!("Failed to create watcher: {e}");
        let _ = ready_tx.send(Err(e.into()));
        return Ok(());
      }
    };

    if let Err(e) = watcher.watch(&watch_dir_clone, RecursiveMode::Recursive) {
      error!("Failed to watch directory {}: {e}", watch_dir_clone.display());
      let _ = ready_tx.send(Err(e.into()));
      return Ok(());
    }
    let _ = ready_tx.send(Ok(()));

    loop {
      // 1) graceful shutdown
      if stop_rx.try_recv().is_ok() {
        info!("Watcher shutdown requested");
        break;
      }

      // 2) обработка событий notify
      match event_rx.recv_timeout(POLL_TICK) {
        Ok(Ok(event)) => {
          trace!("notify event: {:?} {:?}", event.kind, event.paths);
          for raw in events::from_notify(&event) {
            if let Err(e) = on_event(raw) {
              error!("Event handler failed, stopping watcher: {e}");
              return Err(e);
            }
          }
        }
        Ok(Err(err)) => {
          warn!("notify error: {err}");
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
          // тик
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
          warn!("notify channel disconnected");
          break;
        }
      }
    }

    if let Err(e) = watcher.unwatch(&watch_dir_clone) {
      warn!("Failed to unwatch {}: {e}", watch_dir_clone.display());
    }
    info!("Watcher thread finished");
    Ok(())
  });

  match ready_rx.recv() {
    Ok(Ok(())) => {}
    Ok(Err(e)) => {
      let _ = join.join();
      return Err(e);
    }
    Err(_) => {
      let _ = join.join();
      return Err(IfcCheckerError::WatcherTerminated);
    }
  }

  Ok(WatcherHandle {
    stop_tx,
    join: Some(join),
    watch_dir,
  })
}
