//! The single scheduling authority for a reactor graph.
//!
//! `Trigger` is the external dispatcher named in spec section 5: reactors
//! never update on their own, they update because something called
//! `Trigger::signal`. The compiler never constructs or drives a trigger
//! itself — that's the CLI driver's job (or a test's).

use std::cell::Cell;

/// Drives reactor graph evaluation one sequence number at a time.
#[derive(Debug, Default)]
pub struct Trigger {
    sequence: Cell<u64>,
}

impl Trigger {
    pub fn new() -> Self {
        Self {
            sequence: Cell::new(0),
        }
    }

    /// Advances to the next sequence number and returns it.
    pub fn signal(&self) -> u64 {
        let next = self.sequence.get() + 1;
        self.sequence.set(next);
        next
    }

    /// The sequence number of the most recent signal (0 before any signal).
    pub fn sequence(&self) -> u64 {
        self.sequence.get()
    }
}
