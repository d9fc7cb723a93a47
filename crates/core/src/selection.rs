//! Single-select toggle over a fixed candidate set.
//!
//! The selection is a two-state machine: nothing selected, or exactly one
//! candidate selected. Clicking the selected candidate clears it; clicking any
//! other candidate replaces the selection. [`SingleSelect`] owns the candidate
//! list, enforces membership, and notifies a callback on every change.

/// Current state of a single-select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Empty,
    Selected(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: PartialEq> Selection<T> {
    /// Transition for a click on `clicked`.
    #[must_use]
    pub fn next(self, clicked: T) -> Self {
        match self {
            Self::Selected(current) if current == clicked => Self::Empty,
            Self::Empty | Self::Selected(_) => Self::Selected(clicked),
        }
    }

    #[must_use]
    pub fn is_active(&self, candidate: &T) -> bool {
        matches!(self, Self::Selected(current) if current == candidate)
    }
}

impl<T> Selection<T> {
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Selected(value) => Some(value),
        }
    }

}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Self::Selected)
    }
}

/// One renderable entry of a [`SingleSelect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption<'a, T> {
    pub value: &'a T,
    pub active: bool,
}

/// A single-select control over an ordered, fixed set of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSelect<T> {
    candidates: Vec<T>,
    selection: Selection<T>,
}

impl<T: PartialEq + Clone> SingleSelect<T> {
    /// Create a control with nothing selected.
    #[must_use]
    pub const fn new(candidates: Vec<T>) -> Self {
        Self {
            candidates,
            selection: Selection::Empty,
        }
    }

    /// Create a control with an initial selection.
    ///
    /// An initial value that is not one of the candidates is discarded.
    #[must_use]
    pub fn with_selection(candidates: Vec<T>, initial: Option<T>) -> Self {
        let selection = initial.filter(|value| candidates.contains(value)).into();
        Self {
            candidates,
            selection,
        }
    }

    /// Handle a click on `clicked`, invoking `on_change` with the new value.
    ///
    /// Returns `false` without notifying when `clicked` is not a candidate.
    pub fn click<F>(&mut self, clicked: &T, on_change: F) -> bool
    where
        F: FnOnce(Option<&T>),
    {
        if !self.candidates.contains(clicked) {
            return false;
        }

        let current = std::mem::take(&mut self.selection);
        self.selection = current.next(clicked.clone());
        on_change(self.selection.value());
        true
    }

    /// Entries to render, in candidate order.
    pub fn options(&self) -> impl Iterator<Item = SelectOption<'_, T>> {
        self.candidates.iter().map(|value| SelectOption {
            value,
            active: self.selection.is_active(value),
        })
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&T> {
        self.selection.value()
    }
}
