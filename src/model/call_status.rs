use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a support call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallStatus {
    Connected,
    NotConnected,
    CallBackRequested,
    Dropped,
    ContactedOnWhatsApp,
}

static ALL_STATUSES: &[CallStatus] = &[
    CallStatus::Connected,
    CallStatus::NotConnected,
    CallStatus::CallBackRequested,
    CallStatus::Dropped,
    CallStatus::ContactedOnWhatsApp,
];

impl CallStatus {
    /// Returns the label used in the form and in the formatted output.
    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Connected => "Connected",
            CallStatus::NotConnected => "Not connected",
            CallStatus::CallBackRequested => "Call back requested",
            CallStatus::Dropped => "Dropped",
            CallStatus::ContactedOnWhatsApp => "Contacted on WhatsApp",
        }
    }

    /// Returns all call statuses in form order.
    pub fn all() -> &'static [CallStatus] {
        ALL_STATUSES
    }

    /// Parses a form label back into a status. Empty or unknown labels
    /// return `None` (the select has not been set).
    pub fn from_label(label: &str) -> Option<CallStatus> {
        ALL_STATUSES.iter().copied().find(|s| s.label() == label)
    }
}

#[mutants::skip]
impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
