//! Обработчик событий: классификатор + notifier.
//!
//! Владеет обеими таблицами состояния; вызывается только из потока
//! watcher'а, поэтому блокировок не требует.

use std::path::Path;
use std::sync::Arc;

use crate::classifier::{Classifier, FsModTime, ModTimeSource};
use crate::clock::{Clock, SystemClock};
use crate::error::IfcCheckerError;
use crate::file_watcher::events::{NotificationEvent, RawEvent};
use crate::i18n::Language;
use crate::notifier::Notifier;
use crate::sink::LineSink;

pub struct ChangeHandler {
    classifier: Classifier,
    notifier: Notifier,
}

impl ChangeHandler {
    /// Обработчик с системными часами и mtime из файловой системы.
    pub fn new(
        language: Language,
        root: &Path,
        display: Box<dyn LineSink>,
        log: Box<dyn LineSink>,
    ) -> Self {
        Self::with_sources(
            language,
            root,
            display,
            log,
            Box::new(FsModTime),
            Arc::new(SystemClock),
        )
    }

    pub fn with_sources(
        language: Language,
        root: &Path,
        display: Box<dyn LineSink>,
        log: Box<dyn LineSink>,
        mtime: Box<dyn ModTimeSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            classifier: Classifier::new(mtime, clock),
            notifier: Notifier::new(language, root, display, log),
        }
    }

    /// Обработать сырое событие. Возвращает выданное уведомление, если было.
    pub fn handle(&mut self, event: &RawEvent) -> Result<Option<NotificationEvent>, IfcCheckerError> {
        let Some(notification) = self.classifier.classify(event) else {
            return Ok(None);
        };
        log::debug!(
            "{:?} -> {:?} ({})",
            event.kind,
            notification.kind,
            notification.path.display()
        );
        self.notifier.notify(&notification)?;
        Ok(Some(notification))
    }

    pub fn on_created(&mut self, path: &Path) -> Result<Option<NotificationEvent>, IfcCheckerError> {
        self.handle(&RawEvent::created(path))
    }

    pub fn on_modified(&mut self, path: &Path) -> Result<Option<NotificationEvent>, IfcCheckerError> {
        self.handle(&RawEvent::modified(path))
    }

    pub fn on_deleted(&mut self, path: &Path) -> Result<Option<NotificationEvent>, IfcCheckerError> {
        self.handle(&RawEvent::deleted(path))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
