//! Bounded selection of documents used as graph-construction input.

use parking_lot::RwLock;
use tracing::debug;

/// Maximum number of documents that can be selected at once.
pub const MAX_SELECTION: usize = 3;

/// Result of a `toggle` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection was full; nothing changed.
    AtCapacity,
}

/// Insertion-ordered set of at most `MAX_SELECTION` document names.
///
/// Members are only added or removed by `toggle` (or an explicit `clear`);
/// deleting a document from the corpus does not remove it here.
#[derive(Debug, Default)]
pub struct SelectionSet {
    names: RwLock<Vec<String>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&self, name: &str) -> ToggleOutcome {
        let mut names = self.names.write();
        if let Some(pos) = names.iter().position(|n| n == name) {
            names.remove(pos);
            return ToggleOutcome::Removed;
        }
        if names.len() >= MAX_SELECTION {
            debug!(name, "Selection full; toggle ignored");
            return ToggleOutcome::AtCapacity;
        }
        names.push(name.to_string());
        ToggleOutcome::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.read().iter().any(|n| n == name)
    }

    /// Selected names in the order they were added.
    pub fn names(&self) -> Vec<String> {
        self.names.read().clone()
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    pub fn clear(&self) {
        self.names.write().clear();
    }
}
