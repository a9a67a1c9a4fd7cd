//! Shared list view state: loading, empty, error, ready — and the request
//! generation counter that keeps racing loads honest.
//!
//! Filter changes can start a second list request while the first is still
//! in flight. Each load is tagged with a generation; applying a result from
//! a superseded generation is a no-op, so the screen always reflects the
//! most recently *started* load rather than the most recently *finished*
//! one.

use crate::domain::Error;

/// Mutually exclusive view states for a list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPhase<T> {
    /// A load is in flight.
    Loading,
    /// The load finished and the collection is empty.
    Empty,
    /// The load failed; the message is shown inline.
    Error {
        /// Operator-facing failure text.
        message: String,
    },
    /// The load finished with records to show.
    Ready {
        /// Records for the current page.
        items: Vec<T>,
    },
}

/// Opaque tag identifying one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// View-state holder for one list screen.
#[derive(Debug)]
pub struct ListController<T> {
    phase: ListPhase<T>,
    generation: u64,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self {
            phase: ListPhase::Loading,
            generation: 0,
        }
    }
}

impl<T> ListController<T> {
    /// Controller in its initial loading state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view state.
    pub fn phase(&self) -> &ListPhase<T> {
        &self.phase
    }

    /// Start a new load, superseding any in-flight one.
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        Generation(self.generation)
    }

    /// Apply the outcome of a load.
    ///
    /// Returns `false` (and changes nothing) when the result belongs to a
    /// superseded generation.
    pub fn apply(&mut self, generation: Generation, result: Result<Vec<T>, Error>) -> bool {
        if generation.0 != self.generation {
            tracing::debug!(
                stale = generation.0,
                current = self.generation,
                "discarding superseded list response"
            );
            return false;
        }

        self.phase = match result {
            Ok(items) if items.is_empty() => ListPhase::Empty,
            Ok(items) => ListPhase::Ready { items },
            Err(err) => ListPhase::Error {
                message: err.message().to_owned(),
            },
        };
        true
    }
}
