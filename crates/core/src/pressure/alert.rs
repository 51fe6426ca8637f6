//! Alert lifecycle and the note attached to auto-generated alerts.
//!
//! The importer only ever creates alerts in [`AlertStatus::New`]. Moving an
//! alert forward (acknowledge, resolve) is done by clinicians through the
//! API and validated here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Alert status names, matching the `alert_statuses` lookup table.
pub const ALERT_STATUS_NEW: &str = "new";
pub const ALERT_STATUS_ACKNOWLEDGED: &str = "acknowledged";
pub const ALERT_STATUS_RESOLVED: &str = "resolved";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => ALERT_STATUS_NEW,
            Self::Acknowledged => ALERT_STATUS_ACKNOWLEDGED,
            Self::Resolved => ALERT_STATUS_RESOLVED,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ALERT_STATUS_NEW => Some(Self::New),
            ALERT_STATUS_ACKNOWLEDGED => Some(Self::Acknowledged),
            ALERT_STATUS_RESOLVED => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Whether an alert may move from `self` to `next`.
    ///
    /// Status only moves forward; resolved is terminal.
    pub fn can_transition_to(self, next: AlertStatus) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Acknowledged)
                | (Self::New, Self::Resolved)
                | (Self::Acknowledged, Self::Resolved)
        )
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a requested status change, returning a conflict error if the
/// transition is not allowed.
pub fn validate_transition(current: AlertStatus, next: AlertStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Alert cannot move from '{current}' to '{next}'"
        )))
    }
}

/// Note stored on an alert raised during a dataset import.
pub fn import_alert_note(dataset_folder: &str, frame_index: usize) -> String {
    format!("Auto-generated from dataset '{dataset_folder}' (frame {frame_index}).")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(AlertStatus::New.can_transition_to(AlertStatus::Acknowledged));
        assert!(AlertStatus::New.can_transition_to(AlertStatus::Resolved));
        assert!(AlertStatus::Acknowledged.can_transition_to(AlertStatus::Resolved));
    }

    #[test]
    fn backward_and_same_state_transitions_rejected() {
        assert!(!AlertStatus::Acknowledged.can_transition_to(AlertStatus::New));
        assert!(!AlertStatus::Resolved.can_transition_to(AlertStatus::New));
        assert!(!AlertStatus::Resolved.can_transition_to(AlertStatus::Acknowledged));
        assert!(!AlertStatus::New.can_transition_to(AlertStatus::New));
        assert!(!AlertStatus::Resolved.can_transition_to(AlertStatus::Resolved));
    }

    #[test]
    fn validate_transition_reports_conflict() {
        let err = validate_transition(AlertStatus::Resolved, AlertStatus::New).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Conflict: Alert cannot move from 'resolved' to 'new'"
        );
    }

    #[test]
    fn status_names_round_trip() {
        for status in [
            AlertStatus::New,
            AlertStatus::Acknowledged,
            AlertStatus::Resolved,
        ] {
            assert_eq!(AlertStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AlertStatus::parse("closed"), None);
    }

    #[test]
    fn note_names_dataset_and_frame() {
        assert_eq!(
            import_alert_note("ward-3_2025-11-17", 12),
            "Auto-generated from dataset 'ward-3_2025-11-17' (frame 12)."
        );
    }
}
