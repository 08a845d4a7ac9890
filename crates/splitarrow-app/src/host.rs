//! Host screen: registers itself as the selector's delegate and records
//! every selection it is told about.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use splitarrow_core::{ArrowDirection, Panel, SelectionDelegate, SelectorView};

/// Maximum number of entries kept in the selection log.
const MAX_LOG_ENTRIES: usize = 64;

/// One delegate callback as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    /// Direction reported by the selector.
    pub direction: ArrowDirection,
    /// Human readable message.
    pub message: String,
}

/// Bounded history of selection callbacks, newest last.
#[derive(Debug, Clone, Default)]
pub struct SelectionLog {
    entries: VecDeque<SelectionEntry>,
    total: usize,
    /// Bumped on every change, so readers can cache a copy.
    revision: u64,
}

impl SelectionLog {
    /// Append an entry, dropping the oldest when full.
    pub fn push(&mut self, direction: ArrowDirection, message: impl Into<String>) {
        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(SelectionEntry {
            direction,
            message: message.into(),
        });
        self.total += 1;
        self.revision += 1;
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &VecDeque<SelectionEntry> {
        &self.entries
    }

    /// Number of callbacks received, including dropped ones.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> Option<&SelectionEntry> {
        self.entries.back()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bring this copy up to date with `source`. Returns whether it changed.
    pub fn sync_from(&mut self, source: &SelectionLog) -> bool {
        if self.revision == source.revision {
            return false;
        }
        self.clone_from(source);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
    }
}

/// Message for a selection; the tapped panel is the one the arrow now points away from.
pub fn selection_message(direction: ArrowDirection) -> &'static str {
    match direction.selected_panel() {
        Panel::Left => "Left panel touched",
        Panel::Right => "Right panel touched",
    }
}

/// The delegate registered on the selector.
pub struct HostScreen {
    log: Rc<RefCell<SelectionLog>>,
}

impl HostScreen {
    pub fn new(log: Rc<RefCell<SelectionLog>>) -> Self {
        Self { log }
    }

    /// Register a new host screen on `view` and apply the initial direction.
    ///
    /// Returns the shared log the host writes to.
    pub fn attach(view: &mut SelectorView, initial: ArrowDirection) -> Rc<RefCell<SelectionLog>> {
        let log = Rc::new(RefCell::new(SelectionLog::default()));
        view.set_delegate(HostScreen::new(Rc::clone(&log)));
        view.set_current_direction(initial);
        log
    }
}

impl SelectionDelegate for HostScreen {
    fn did_change_selection(&mut self, _selector: &SelectorView, selected: ArrowDirection) {
        let message = selection_message(selected);
        log::info!("{}", message);
        self.log.borrow_mut().push(selected, message);
    }
}
