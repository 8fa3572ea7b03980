use serde::{Deserialize, Serialize};

use super::call_status::CallStatus;
use super::validation::{ValidationError, validate_customer_name, validate_phone};

/// Shipping status value that makes the SLA field relevant.
pub const SHIPPING_NOT_YET_DELIVERED: &str = "Not yet delivered";

/// Installation/training status value that makes the date-time field relevant.
pub const STATUS_SCHEDULED: &str = "Scheduled";

/// One submitted call wrap-up, snapshotted from the form.
///
/// Status fields hold the raw form labels; empty strings mean "not set".
/// Construction does not validate — call [`validate`](Self::validate) before
/// formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub call_status: Option<CallStatus>,
    pub activation_status: String,
    pub shipping_status: String,
    pub shipping_sla: String,
    pub menu_status: String,
    pub installation_status: String,
    pub installation_datetime: String,
    pub training_status: String,
    pub training_datetime: String,
    pub whatsapp_ticket: String,
    pub follow_up_datetime: String,
    pub follow_up_notes: String,
    pub standalone_next_follow_up: String,
    pub free_comment: String,
}

impl TicketInput {
    /// Runs the submission checks in order; the first failure wins.
    ///
    /// 1. customer name non-empty after trim
    /// 2. call status selected
    /// 3. phone, if present, digits only
    /// 4. SLA present when shipping is "Not yet delivered"
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_customer_name(&self.customer_name)?;
        if self.call_status.is_none() {
            return Err(ValidationError::MissingCallStatus);
        }
        validate_phone(&self.customer_phone)?;
        if self.shipping_status == SHIPPING_NOT_YET_DELIVERED && self.shipping_sla.is_empty() {
            return Err(ValidationError::MissingShippingSla);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ticket() -> TicketInput {
        TicketInput {
            customer_name: "Jane Doe".to_string(),
            customer_phone: "5551234".to_string(),
            call_status: Some(CallStatus::Connected),
            ..TicketInput::default()
        }
    }

    #[test]
    fn minimal_ticket_is_valid() {
        assert_eq!(make_ticket().validate(), Ok(()));
    }

    #[test]
    fn name_checked_first() {
        // Both the name and the call status are missing; the name error wins.
        let ticket = TicketInput {
            customer_phone: "abc".to_string(),
            ..TicketInput::default()
        };
        assert_eq!(
            ticket.validate(),
            Err(ValidationError::MissingCustomerName)
        );
    }

    #[test]
    fn whitespace_name_rejected() {
        let ticket = TicketInput {
            customer_name: "  ".to_string(),
            ..make_ticket()
        };
        assert_eq!(
            ticket.validate(),
            Err(ValidationError::MissingCustomerName)
        );
    }

    #[test]
    fn missing_call_status_rejected() {
        let ticket = TicketInput {
            call_status: None,
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Err(ValidationError::MissingCallStatus));
    }

    #[test]
    fn call_status_checked_before_phone() {
        let ticket = TicketInput {
            call_status: None,
            customer_phone: "not-a-phone".to_string(),
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Err(ValidationError::MissingCallStatus));
    }

    #[test]
    fn bad_phone_rejected() {
        let ticket = TicketInput {
            customer_phone: "555 1234".to_string(),
            ..make_ticket()
        };
        assert_eq!(
            ticket.validate(),
            Err(ValidationError::InvalidPhone("555 1234".to_string()))
        );
    }

    #[test]
    fn empty_phone_accepted() {
        let ticket = TicketInput {
            customer_phone: String::new(),
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Ok(()));
    }

    #[test]
    fn not_yet_delivered_requires_sla() {
        let ticket = TicketInput {
            shipping_status: SHIPPING_NOT_YET_DELIVERED.to_string(),
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Err(ValidationError::MissingShippingSla));
    }

    #[test]
    fn sla_resolves_shipping_error() {
        let ticket = TicketInput {
            shipping_status: SHIPPING_NOT_YET_DELIVERED.to_string(),
            shipping_sla: "24h".to_string(),
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Ok(()));
    }

    #[test]
    fn other_shipping_status_needs_no_sla() {
        let ticket = TicketInput {
            shipping_status: "Delivered".to_string(),
            ..make_ticket()
        };
        assert_eq!(ticket.validate(), Ok(()));
    }

    #[test]
    fn serde_round_trip() {
        let ticket = make_ticket();
        let json = serde_json::to_string(&ticket).unwrap();
        let deserialized: TicketInput = serde_json::from_str(&json).unwrap();
        assert_eq!(ticket, deserialized);
    }
}
