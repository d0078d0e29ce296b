//! Assignment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a volunteer assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Created by the assigner, not yet acknowledged by the volunteer.
    Assigned,
    /// Acknowledged by the volunteer.
    Accepted,
    /// Volunteer is transporting the food.
    InProgress,
    /// Food was dropped off.
    Completed,
    /// Withdrawn by the volunteer or the assigner.
    Cancelled,
}

impl AssignmentStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Assigned,
        Self::Accepted,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Check if the assignment is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Check if the assignment counts towards the one-active-per-donation limit.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                foodbridge_core::AppError::validation(format!("Invalid assignment status: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_is_snake_case() {
        assert_eq!(AssignmentStatus::InProgress.as_str(), "in_progress");
        let json = serde_json::to_string(&AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(
            "in_progress".parse::<AssignmentStatus>().unwrap(),
            AssignmentStatus::InProgress
        );
    }

    #[test]
    fn test_only_cancelled_is_inactive() {
        assert!(!AssignmentStatus::Cancelled.is_active());
        assert!(AssignmentStatus::Completed.is_active());
        assert!(AssignmentStatus::Assigned.is_active());
    }
}
