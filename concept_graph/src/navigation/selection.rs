//! Detail panel selection state.

use concept_model::ConceptId;
use serde::{Deserialize, Serialize};

/// Which concept, if any, the detail panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "node", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Closed,
    Open(ConceptId),
}

/// Outcome of a selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Unchanged,
    /// The panel opened, or switched to another concept.
    Opened(ConceptId),
    Closed,
}

impl Selection {
    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }

    pub fn current(&self) -> Option<&ConceptId> {
        match self {
            Selection::Open(id) => Some(id),
            Selection::Closed => None,
        }
    }

    /// Open the panel on `id`, from a graph click or panel link.
    ///
    /// Activating the concept that is already open is a no-op.
    pub fn activate(&mut self, id: &ConceptId) -> Transition {
        if self.current() == Some(id) {
            return Transition::Unchanged;
        }
        *self = Selection::Open(id.clone());
        Transition::Opened(id.clone())
    }

    /// Close the panel from a background click or close action.
    pub fn close(&mut self) -> Transition {
        match std::mem::take(self) {
            Selection::Open(_) => Transition::Closed,
            Selection::Closed => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_switch() {
        let mut selection = Selection::default();
        assert!(!selection.is_open());

        let a = ConceptId::from("a");
        let b = ConceptId::from("b");

        assert_eq!(selection.activate(&a), Transition::Opened(a.clone()));
        assert_eq!(selection.current(), Some(&a));

        assert_eq!(selection.activate(&b), Transition::Opened(b.clone()));
        assert_eq!(selection, Selection::Open(b));
    }

    #[test]
    fn test_reactivate_is_noop() {
        let a = ConceptId::from("a");
        let mut selection = Selection::Open(a.clone());

        assert_eq!(selection.activate(&a), Transition::Unchanged);
        assert_eq!(selection, Selection::Open(a));
    }

    #[test]
    fn test_close() {
        let mut selection = Selection::Open(ConceptId::from("a"));
        assert_eq!(selection.close(), Transition::Closed);
        assert_eq!(selection, Selection::Closed);
        assert_eq!(selection.close(), Transition::Unchanged);
    }
}
