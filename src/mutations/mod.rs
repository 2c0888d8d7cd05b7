//! # Mutations Module
//!
//! Multi-step writes against the data service:
//! - Workout creation, with or without dependent exercises
//! - Star toggling and confirmed workout deletion
//! - Meal creation and deletion
//!
//! The coordinator only writes. Views refresh their caches afterwards, so the
//! server's next list response is the only state ever shown.

pub mod coordinator;


pub use coordinator::{CreatedLift, DeleteOutcome, MutationCoordinator, MutationError};

/// Interactive yes/no prompt guarding destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
