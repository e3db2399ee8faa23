use std::path::PathBuf;

/// Единый тип ошибок IFC Checker.
#[derive(thiserror::Error, Debug)]
pub enum IfcCheckerError {
  #[error("Not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("Watcher is already running")]
  WatcherAlreadyRunning,

  #[error("Watcher is not running")]
  WatcherNotRunning,

  #[error("Watcher thread terminated unexpectedly")]
  WatcherTerminated,

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Notify error: {0}")]
  Notify(#[from] notify::Error),

  #[error("Signal handler error: {0}")]
  Signal(#[from] ctrlc::Error),
}
