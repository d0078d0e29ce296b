//! Transition tables for the donation and assignment state machines.
//!
//! Each machine is a static slice of `(from, to, rule)` edges. A status
//! change is legal only if its edge is listed, and only actors the edge's
//! [`PermissionRule`] admits may request it.

pub mod assignment;
pub mod donation;
pub mod permission;

pub use assignment::ASSIGNMENT_TRANSITIONS;
pub use donation::DONATION_TRANSITIONS;
pub use permission::{Parties, PermissionRule};

/// One edge of a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    /// Status the edge starts from.
    pub from: S,
    /// Status the edge leads to.
    pub to: S,
    /// Who may take this edge.
    pub rule: PermissionRule,
}

/// Look up the edge from `from` to `to`, if the table has one.
pub fn find_transition<S: PartialEq + Copy + 'static>(
    table: &'static [Transition<S>],
    from: S,
    to: S,
) -> Option<&'static Transition<S>> {
    table.iter().find(|t| t.from == from && t.to == to)
}

/// Statuses reachable from `from` in one step.
pub fn targets_from<S: PartialEq + Copy + 'static>(table: &'static [Transition<S>], from: S) -> Vec<S> {
    table
        .iter()
        .filter(|t| t.from == from)
        .map(|t| t.to)
        .collect()
}
