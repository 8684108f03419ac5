//! The user directory view: its state, lifecycle and render selector.
//!
//! [`ViewState`] is plain data. [`ViewState::region`] decides, with no side
//! effects, which of the mutually exclusive regions is visible. The
//! [`UserDirectoryView`] owns the state and is the only thing that mutates it:
//! fetch cycles write `loading`/`error`/`records`, selection writes `selection`.
//!
//! Everything runs on one thread. Fetch cycles are futures polled by a
//! `LocalSet`; state lives in a `RefCell` and no borrow crosses an `.await`.
use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::FetchError;
use crate::source::{Record, RecordSource};

/// Full presentation state of the view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub records: Vec<Record>,
    /// Payload copy of the chosen record. Never re-resolved against `records`.
    pub selection: Option<Record>,
}

/// Which part of the view is visible. Variants are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region<'a> {
    Loading,
    Error(&'a str),
    /// Selector plus the single selected record.
    Detail {
        records: &'a [Record],
        selected: &'a Record,
    },
    /// Selector plus the full listing.
    Table { records: &'a [Record] },
    /// Nothing loaded, nothing failed: only the container.
    Empty,
}

impl<'a> Region<'a> {
    /// Short lowercase name for the status bar and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Loading => "loading",
            Region::Error(_) => "error",
            Region::Detail { .. } => "detail",
            Region::Table { .. } => "table",
            Region::Empty => "empty",
        }
    }

    /// Records backing the selector, if the data region is visible.
    pub fn selector_records(&self) -> Option<&'a [Record]> {
        match self {
            Region::Detail { records, .. } | Region::Table { records } => Some(*records),
            _ => None,
        }
    }
}

impl ViewState {
    /// Priority is fixed: loading, then error, then data, then empty.
    /// Within the data region the selection alone picks detail over table.
    pub fn region(&self) -> Region<'_> {
        if self.loading {
            return Region::Loading;
        }
        if let Some(err) = self.error.as_deref() {
            return Region::Error(err);
        }
        if self.records.is_empty() {
            return Region::Empty;
        }
        match &self.selection {
            Some(selected) => Region::Detail {
                records: &self.records,
                selected,
            },
            None => Region::Table {
                records: &self.records,
            },
        }
    }

    /// First record with a matching id.
    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// The view component. Share it as `Rc<UserDirectoryView>`.
pub struct UserDirectoryView {
    state: RefCell<ViewState>,
    source: Arc<dyn RecordSource>,
    attached: Cell<bool>,
    cycles: Cell<u64>,
}

impl UserDirectoryView {
    pub fn new(source: Arc<dyn RecordSource>) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(ViewState::default()),
            source,
            attached: Cell::new(false),
            cycles: Cell::new(0),
        })
    }

    /// Read-only snapshot for rendering. Drop it before mutating the view.
    pub fn state(&self) -> Ref<'_, ViewState> {
        self.state.borrow()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    /// Number of fetch cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.cycles.get()
    }

    /// First-attach hook: spawns the initial fetch cycle onto the current
    /// `LocalSet`. Returns `false` and does nothing on every later call.
    pub fn attach(self: &Rc<Self>) -> bool {
        if self.attached.replace(true) {
            return false;
        }
        tracing::debug!("view attached, starting initial fetch");
        tokio::task::spawn_local(self.load_records());
        true
    }

    /// Start one fetch cycle.
    ///
    /// `loading` is raised and any previous error cleared right away, before
    /// the returned future is first polled. The future performs exactly one
    /// `fetch_all` call and then applies its outcome. Overlapping cycles are
    /// not fenced: each applies its own outcome when it resolves.
    pub fn load_records(self: &Rc<Self>) -> impl Future<Output = ()> + 'static {
        let cycle = self.begin_cycle();
        let view = Rc::clone(self);
        let source = Arc::clone(&self.source);
        async move {
            let outcome = source.fetch_all().await;
            view.finish_cycle(cycle, outcome);
        }
    }

    fn begin_cycle(&self) -> u64 {
        let cycle = self.cycles.get() + 1;
        self.cycles.set(cycle);
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.error = None;
        tracing::debug!(cycle, "fetch cycle started");
        cycle
    }

    fn finish_cycle(&self, cycle: u64, outcome: Result<Vec<Record>, FetchError>) {
        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(records) => {
                tracing::info!(cycle, count = records.len(), "records loaded");
                state.records = records;
            }
            Err(err) => {
                tracing::warn!(cycle, error = ?err, "record fetch failed");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
    }

    /// Focus the record with `id`. Unknown ids leave the selection as is.
    /// Returns whether the selection changed.
    pub fn select_record(&self, id: i64) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(found) = state.find(id).cloned() else {
            tracing::debug!(id, "select ignored, id not in current records");
            return false;
        };
        tracing::debug!(id, "record selected");
        state.selection = Some(found);
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::{Address, Company};
    use pretty_assertions::assert_eq;

    pub(crate) fn mk_record(id: i64, name: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
            username: name.to_lowercase(),
            email: format!("{}@example.org", name.to_lowercase()),
            address: Address { city: "Gwenborough".to_string() },
            phone: "555-0100".to_string(),
            website: "example.org".to_string(),
            company: Company { name: "Acme".to_string() },
        }
    }

    #[test]
    fn initial_state_is_empty_region() {
        let state = ViewState::default();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert!(state.records.is_empty());
        assert_eq!(state.selection, None);
        assert_eq!(state.region(), Region::Empty);
    }

    #[test]
    fn loading_wins_over_error_and_records() {
        let combos = [
            (None, vec![], None),
            (Some("boom".to_string()), vec![], None),
            (None, vec![mk_record(1, "A")], None),
            (Some("boom".to_string()), vec![mk_record(1, "A")], Some(mk_record(1, "A"))),
        ];
        for (error, records, selection) in combos {
            let state = ViewState { loading: true, error, records, selection };
            assert_eq!(state.region(), Region::Loading);
        }
    }

    #[test]
    fn error_suppresses_data_regions() {
        let state = ViewState {
            loading: false,
            error: Some("Failed to fetch users".to_string()),
            records: vec![mk_record(1, "A")],
            selection: Some(mk_record(1, "A")),
        };
        assert_eq!(state.region(), Region::Error("Failed to fetch users"));
        assert_eq!(state.region().selector_records(), None);
    }

    #[test]
    fn selection_switches_table_to_detail() {
        let mut state = ViewState {
            records: vec![mk_record(1, "A"), mk_record(2, "B")],
            ..ViewState::default()
        };
        assert_eq!(state.region().name(), "table");
        state.selection = Some(mk_record(2, "B"));
        match state.region() {
            Region::Detail { records, selected } => {
                assert_eq!(records.len(), 2);
                assert_eq!(selected.id, 2);
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn stale_selection_still_renders_detail() {
        let state = ViewState {
            records: vec![mk_record(7, "G")],
            selection: Some(mk_record(5, "E")),
            ..ViewState::default()
        };
        match state.region() {
            Region::Detail { selected, .. } => assert_eq!(selected.id, 5),
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn selection_without_records_is_empty() {
        let state = ViewState {
            selection: Some(mk_record(5, "E")),
            ..ViewState::default()
        };
        assert_eq!(state.region(), Region::Empty);
    }
}
