//! Modal controller — the single shared dialog used to report progress.
//!
//! The dialog has two interaction modes. While idle the user may dismiss it
//! (backdrop click, Escape, close buttons). While locked all of those are
//! disabled so a half-completed ledger operation cannot be mistaken for a
//! cancelled one.
//!
//! Locking is scoped: [`Modal::lock`] hands out a [`ModalLock`] guard and the
//! dialog only becomes dismissible again once every outstanding guard has been
//! dropped. Every exit path of a transaction flow (success, `?` early return,
//! panic unwind) therefore releases the lock.
//!
//! Rendering is left to the embedder. Each change is published as a
//! [`ModalEvent`] to an optional listener (a DOM renderer in the browser, a
//! recorder in tests) and the latest content is always available through
//! [`Modal::snapshot`].

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Interaction mode of the dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    /// Normal dismissibility.
    #[default]
    Idle,
    /// A transaction is in flight; dismissal is disabled.
    Locked,
}

/// A change published to the modal listener.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Shown { title: String, body: String },
    Alert(String),
    Table(ConfirmationTable),
    Locked,
    Unlocked,
}

/// Current content and mode of the dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalSnapshot {
    pub state: ModalState,
    pub title: String,
    pub body: String,
    pub table: Option<ConfirmationTable>,
    pub last_alert: Option<String>,
}

impl ModalSnapshot {
    pub fn is_locked(&self) -> bool {
        self.state == ModalState::Locked
    }

    /// Whether backdrop clicks, the keyboard and the close buttons work.
    pub fn is_dismissible(&self) -> bool {
        !self.is_locked()
    }
}

/// Callback receiving every [`ModalEvent`].
#[cfg(not(target_arch = "wasm32"))]
pub type ModalListener = Box<dyn Fn(&ModalEvent) + Send + Sync>;

/// Callback receiving every [`ModalEvent`].
#[cfg(target_arch = "wasm32")]
pub type ModalListener = Box<dyn Fn(&ModalEvent)>;

struct ModalInner {
    snapshot: ModalSnapshot,
    lock_depth: u32,
}

/// The shared dialog.
pub struct Modal {
    inner: Mutex<ModalInner>,
    listener: Option<ModalListener>,
}

impl Modal {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ModalInner {
                snapshot: ModalSnapshot::default(),
                lock_depth: 0,
            }),
            listener: None,
        }
    }

    pub fn with_listener(listener: ModalListener) -> Self {
        Self {
            listener: Some(listener),
            ..Self::new()
        }
    }

    pub fn snapshot(&self) -> ModalSnapshot {
        self.inner().snapshot.clone()
    }

    pub fn state(&self) -> ModalState {
        self.inner().snapshot.state
    }

    pub fn is_locked(&self) -> bool {
        self.state() == ModalState::Locked
    }

    /// Replace the title and body.
    pub fn show(&self, title: &str, body: &str) {
        {
            let mut inner = self.inner();
            inner.snapshot.title = title.to_string();
            inner.snapshot.body = body.to_string();
        }
        self.emit(ModalEvent::Shown {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    /// Raise a blocking user alert.
    pub fn alert(&self, message: &str) {
        self.inner().snapshot.last_alert = Some(message.to_string());
        self.emit(ModalEvent::Alert(message.to_string()));
    }

    /// Replace the dialog's table (the admin review step).
    pub fn show_table(&self, table: ConfirmationTable) {
        self.inner().snapshot.table = Some(table.clone());
        self.emit(ModalEvent::Table(table));
    }

    /// Disable dismissal until the returned guard is dropped.
    ///
    /// Overlapping flows may each hold a guard; the dialog unlocks when the
    /// last one goes away.
    #[must_use = "the modal unlocks as soon as the guard is dropped"]
    pub fn lock(&self) -> ModalLock<'_> {
        let first = {
            let mut inner = self.inner();
            inner.lock_depth += 1;
            inner.snapshot.state = ModalState::Locked;
            inner.lock_depth == 1
        };
        if first {
            tracing::debug!("modal locked");
            self.emit(ModalEvent::Locked);
        }
        ModalLock { modal: self }
    }

    fn release(&self) {
        let last = {
            let mut inner = self.inner();
            inner.lock_depth = inner.lock_depth.saturating_sub(1);
            if inner.lock_depth == 0 && inner.snapshot.state == ModalState::Locked {
                inner.snapshot.state = ModalState::Idle;
                true
            } else {
                false
            }
        };
        if last {
            tracing::debug!("modal unlocked");
            self.emit(ModalEvent::Unlocked);
        }
    }

    // The listener runs outside the mutex so it may read the snapshot.
    fn emit(&self, event: ModalEvent) {
        if let Some(listener) = &self.listener {
            listener(&event);
        }
    }

    fn inner(&self) -> MutexGuard<'_, ModalInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("snapshot", &self.snapshot())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

/// Scoped lock on the [`Modal`]. Dropping it restores dismissibility.
pub struct ModalLock<'a> {
    modal: &'a Modal,
}

impl ModalLock<'_> {
    /// Show the terminal result and release the lock.
    pub fn finish(self, title: &str, body: &str) {
        self.modal.show(title, body);
    }
}

impl Drop for ModalLock<'_> {
    fn drop(&mut self) {
        self.modal.release();
    }
}

// ─── ConfirmationTable ───────────────────────────────────────────────────────

/// A plain table rendered inside the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ConfirmationTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ConfirmationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let line = (0..columns)
                .map(|i| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = widths[i])
                })
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{}", line.trim_end())
        };

        write_row(f, &self.headers)?;
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(f, "{}", rule)?;
        for row in &self.rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recording_modal() -> (Modal, Arc<Mutex<Vec<ModalEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let modal = Modal::with_listener(Box::new(move |e| sink.lock().unwrap().push(e.clone())));
        (modal, events)
    }

    #[test]
    fn test_lock_released_on_drop() {
        let modal = Modal::new();
        {
            let _guard = modal.lock();
            assert!(modal.is_locked());
            assert!(!modal.snapshot().is_dismissible());
        }
        assert_eq!(modal.state(), ModalState::Idle);
    }

    #[test]
    fn test_lock_released_on_error_path() {
        fn failing_step(modal: &Modal) -> Result<(), String> {
            let _guard = modal.lock();
            let submitted: Result<(), String> = Err("submit failed".to_string());
            submitted?;
            Ok(())
        }

        let modal = Modal::new();
        assert!(failing_step(&modal).is_err());
        assert!(!modal.is_locked());
    }

    #[test]
    fn test_lock_released_on_panic() {
        let modal = Modal::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = modal.lock();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(!modal.is_locked());
    }

    #[test]
    fn test_nested_locks_unlock_with_last_guard() {
        let (modal, events) = recording_modal();
        let outer = modal.lock();
        let inner = modal.lock();
        drop(outer);
        assert!(modal.is_locked());
        drop(inner);
        assert!(!modal.is_locked());

        let events = events.lock().unwrap();
        assert_eq!(*events, vec![ModalEvent::Locked, ModalEvent::Unlocked]);
    }

    #[test]
    fn test_finish_shows_result_then_unlocks() {
        let (modal, events) = recording_modal();
        modal.lock().finish("Done", "hash");

        let snapshot = modal.snapshot();
        assert_eq!(snapshot.title, "Done");
        assert_eq!(snapshot.body, "hash");
        assert_eq!(snapshot.state, ModalState::Idle);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], ModalEvent::Locked);
        assert!(matches!(&events[1], ModalEvent::Shown { title, .. } if title == "Done"));
        assert_eq!(events[2], ModalEvent::Unlocked);
    }

    #[test]
    fn test_alert_recorded() {
        let modal = Modal::new();
        modal.alert("Please select at least one project.");
        assert_eq!(
            modal.snapshot().last_alert.as_deref(),
            Some("Please select at least one project.")
        );
    }

    #[test]
    fn test_table_display() {
        let mut table = ConfirmationTable::new(&["ID", "Name"]);
        table.push_row(vec!["1".into(), "Books for all".into()]);
        table.push_row(vec!["22".into(), "Solar".into()]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID | Name");
        assert_eq!(lines[1], "---+--------------");
        assert_eq!(lines[2], "1  | Books for all");
        assert_eq!(lines[3], "22 | Solar");
    }
}
