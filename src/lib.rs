//! IFC Checker
//!
//! Следит за деревом папок и сообщает о созданных, изменённых и удалённых
//! `.ifc` файлах: строка с таймстемпом на экран и в лог-файл, на одном из
//! поддерживаемых языков. Повторные «modified» от одной записи подавляются.
//!
//! Конвейер: notify → [`file_watcher::RawEvent`] → [`classifier::Classifier`]
//! → [`notifier::Notifier`] → экран + лог.

pub mod api;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod error;
pub mod file_watcher;
pub mod handler;
pub mod i18n;
pub mod logging;
pub mod notifier;
pub mod session;
pub mod sink;

pub use error::IfcCheckerError;
pub use handler::ChangeHandler;
pub use i18n::Language;
