//! Детерминированные тесты конвейера событие → уведомление.
//!
//! Часы и mtime подменяются, строки собираются в MemorySink.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use chrono::{Local, TimeZone};

use ifc_checker::classifier::ModTimeSource;
use ifc_checker::clock::ManualClock;
use ifc_checker::file_watcher::{NotificationKind, RawEvent};
use ifc_checker::sink::MemorySink;
use ifc_checker::{ChangeHandler, Language};

#[derive(Clone, Default)]
struct StubMtimes(Arc<Mutex<HashMap<PathBuf, SystemTime>>>);

impl StubMtimes {
    fn set(&self, path: &Path, secs: u64) {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), SystemTime::UNIX_EPOCH + Duration::from_secs(secs));
    }
}

impl ModTimeSource for StubMtimes {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.0.lock().unwrap().get(path).copied()
    }
}

struct Fixture {
    handler: ChangeHandler,
    display: MemorySink,
    log: MemorySink,
    mtimes: StubMtimes,
    clock: ManualClock,
    root: PathBuf,
}

fn fixture(lang: &str) -> Fixture {
    let root = PathBuf::from("/").join("watch");
    let display = MemorySink::new();
    let log = MemorySink::new();
    let mtimes = StubMtimes::default();
    let clock = ManualClock::new(
        Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid local time"),
    );
    let handler = ChangeHandler::with_sources(
        Language::from_code(lang),
        &root,
        Box::new(display.clone()),
        Box::new(log.clone()),
        Box::new(mtimes.clone()),
        Arc::new(clock.clone()),
    );
    Fixture {
        handler,
        display,
        log,
        mtimes,
        clock,
        root,
    }
}

#[test]
fn test_end_to_end_new_updated_deleted() {
    let mut f = fixture("en");
    let file = f.root.join("a.ifc");

    f.mtimes.set(&file, 100);
    f.handler.on_created(&file).unwrap();
    f.clock.advance(Duration::from_secs(2));
    f.handler.on_modified(&file).unwrap(); // тот же mtime
    f.mtimes.set(&file, 200);
    f.handler.on_modified(&file).unwrap();
    f.clock.advance(Duration::from_secs(1));
    f.handler.on_deleted(&file).unwrap();

    assert_eq!(
        f.display.lines(),
        vec![
            "2024-03-01 12:00:00 [NEW] File created: \\a.ifc",
            "2024-03-01 12:00:02 [UPDATED] File modified: \\a.ifc",
            "2024-03-01 12:00:03 [DELETED] File deleted: \\a.ifc",
        ]
    );
    assert_eq!(
        f.log.lines(),
        vec![
            "2024-03-01 12:00:00 - [NEW] File created: \\a.ifc",
            "2024-03-01 12:00:02 - [UPDATED] File modified: \\a.ifc",
            "2024-03-01 12:00:03 - [DELETED] File deleted: \\a.ifc",
        ]
    );
    assert_eq!(f.handler.classifier().tracked_count(), 0);
}

#[test]
fn test_rapid_modifications_emit_once() {
    let mut f = fixture("en");
    let file = f.root.join("sub").join("model.ifc");

    f.mtimes.set(&file, 1);
    let first = f.handler.on_modified(&file).unwrap();
    f.clock.advance(Duration::from_millis(500));
    f.mtimes.set(&file, 2);
    let second = f.handler.on_modified(&file).unwrap();

    assert_eq!(first.map(|e| e.kind), Some(NotificationKind::Updated));
    assert_eq!(second, None);
    assert_eq!(
        f.display.lines(),
        vec!["2024-03-01 12:00:00 [UPDATED] File modified: \\sub\\model.ifc"]
    );
}

#[test]
fn test_ignored_events_write_nothing() {
    let mut f = fixture("en");
    let txt = f.root.join("notes.txt");
    let dir = f.root.join("archive.ifc");
    f.mtimes.set(&txt, 1);

    for event in [
        RawEvent::created(&txt),
        RawEvent::modified(&txt),
        RawEvent::deleted(&txt),
        RawEvent::created(&dir).dir(),
        RawEvent::deleted(&dir).dir(),
    ] {
        assert_eq!(f.handler.handle(&event).unwrap(), None);
    }

    assert!(f.display.lines().is_empty());
    assert!(f.log.lines().is_empty());
}

#[test]
fn test_delete_of_unknown_path_is_reported() {
    let mut f = fixture("ru");
    let file = f.root.join("never-seen.IFC");

    f.handler.on_deleted(&file).unwrap();

    assert_eq!(
        f.display.lines(),
        vec!["2024-03-01 12:00:00 [УДАЛЁН] Файл удалён: \\never-seen.IFC"]
    );
}

#[test]
fn test_unsupported_language_matches_english() {
    let mut english = fixture("en");
    let mut unknown = fixture("xx");

    for f in [&mut english, &mut unknown] {
        let file = f.root.join("a.ifc");
        f.mtimes.set(&file, 1);
        f.handler.on_created(&file).unwrap();
        f.clock.advance(Duration::from_secs(5));
        f.mtimes.set(&file, 2);
        f.handler.on_modified(&file).unwrap();
        f.handler.on_deleted(&file).unwrap();
    }

    assert_eq!(english.display.lines(), unknown.display.lines());
    assert_eq!(english.log.lines(), unknown.log.lines());
    assert_eq!(unknown.handler.notifier().language(), Language::En);
}

#[test]
fn test_german_messages() {
    let mut f = fixture("de");
    let file = f.root.join("b.ifc");
    f.handler.on_created(&file).unwrap();

    assert_eq!(
        f.log.lines(),
        vec!["2024-03-01 12:00:00 - [NEU] Datei erstellt: \\b.ifc"]
    );
}
