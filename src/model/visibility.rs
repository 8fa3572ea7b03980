//! Field visibility policy — which dependent fields are shown and required
//! for the current trigger values.
//!
//! Pure functions of form state; the entry screen re-applies the computed
//! [`VisibilitySpec`] after construction, after every trigger-field change,
//! and after every reset.

use super::call_status::CallStatus;
use super::ticket::{SHIPPING_NOT_YET_DELIVERED, STATUS_SCHEDULED};

/// A dependent form field whose visibility is controlled by the policy.
///
/// Customer name, phone, call status, and the free comment are always
/// visible and are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ActivationStatus,
    ShippingStatus,
    ShippingSla,
    MenuStatus,
    InstallationStatus,
    InstallationDatetime,
    TrainingStatus,
    TrainingDatetime,
    WhatsappTicket,
    FollowUpDatetime,
    FollowUpNotes,
    StandaloneNextFollowUp,
}

impl Field {
    /// All controlled fields, in form order.
    pub const ALL: &'static [Field] = &[
        Field::ActivationStatus,
        Field::ShippingStatus,
        Field::ShippingSla,
        Field::MenuStatus,
        Field::InstallationStatus,
        Field::InstallationDatetime,
        Field::TrainingStatus,
        Field::TrainingDatetime,
        Field::WhatsappTicket,
        Field::FollowUpDatetime,
        Field::FollowUpNotes,
        Field::StandaloneNextFollowUp,
    ];

    /// The five top-level status selects.
    const STATUS_FIELDS: &'static [Field] = &[
        Field::ActivationStatus,
        Field::ShippingStatus,
        Field::MenuStatus,
        Field::InstallationStatus,
        Field::TrainingStatus,
    ];

    // `ALL` lists the variants in declaration order, so the discriminant
    // doubles as the index.
    fn idx(self) -> usize {
        self as usize
    }
}

/// Show/require state for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRule {
    pub visible: bool,
    pub required: bool,
}

/// The computed show/require state for every controlled field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySpec {
    rules: [FieldRule; Field::ALL.len()],
}

impl VisibilitySpec {
    /// A spec with every controlled field hidden and not required.
    fn all_hidden() -> Self {
        Self {
            rules: [FieldRule::default(); Field::ALL.len()],
        }
    }

    fn show(&mut self, field: Field, required: bool) {
        self.rules[field.idx()] = FieldRule {
            visible: true,
            required,
        };
    }

    /// Returns `true` if the field should be rendered.
    pub fn is_visible(&self, field: Field) -> bool {
        self.rules[field.idx()].visible
    }

    /// Returns `true` if the field must be non-empty on submit.
    pub fn is_required(&self, field: Field) -> bool {
        self.rules[field.idx()].required
    }
}

/// Current values of the trigger fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityTrigger<'a> {
    pub call_status: Option<CallStatus>,
    pub shipping_status: &'a str,
    pub installation_status: &'a str,
    pub training_status: &'a str,
}

/// Computes the show/require state for every controlled field.
///
/// The call-outcome axis picks one of four modes; the shipping-SLA and
/// scheduling axes only apply when that axis leaves the parent field
/// visible, so hiding shipping also hides and unrequires its SLA sub-field.
pub fn compute_visibility(trigger: &VisibilityTrigger<'_>) -> VisibilitySpec {
    let mut spec = VisibilitySpec::all_hidden();

    match trigger.call_status {
        Some(CallStatus::NotConnected) => {
            spec.show(Field::WhatsappTicket, false);
        }
        Some(CallStatus::CallBackRequested) | Some(CallStatus::Dropped) => {
            spec.show(Field::StandaloneNextFollowUp, false);
        }
        other => {
            // Connected, Contacted on WhatsApp, or nothing selected yet.
            for field in Field::STATUS_FIELDS {
                spec.show(*field, true);
            }
            spec.show(Field::StandaloneNextFollowUp, false);

            if other == Some(CallStatus::ContactedOnWhatsApp) {
                spec.show(Field::WhatsappTicket, false);
                spec.show(Field::FollowUpDatetime, false);
                spec.show(Field::FollowUpNotes, false);
            }

            if trigger.shipping_status == SHIPPING_NOT_YET_DELIVERED {
                spec.show(Field::ShippingSla, true);
            }
            if trigger.installation_status == STATUS_SCHEDULED {
                spec.show(Field::InstallationDatetime, true);
            }
            if trigger.training_status == STATUS_SCHEDULED {
                spec.show(Field::TrainingDatetime, true);
            }
        }
    }

    spec
}
