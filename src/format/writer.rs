use crate::model::{
    SHIPPING_NOT_YET_DELIVERED, STATUS_SCHEDULED, TicketInput, ValidationError,
};

/// Activation statuses omitted from the output.
const EXCLUDED_ACTIVATION: &[&str] = &["no need"];

/// Shipping statuses omitted from the output.
const EXCLUDED_SHIPPING: &[&str] = &["not started yet", "no line item/ no hw to be shipped."];

/// Menu, installation, and training statuses omitted from the output.
const EXCLUDED_STATUS: &[&str] = &["not started yet", "not line item"];

/// Returns `true` if the status value matches the exclusion set.
///
/// Matching is trim- and case-insensitive; an empty value never matches.
fn is_excluded(value: &str, excluded: &[&str]) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let lower = value.to_lowercase();
    excluded.iter().any(|e| *e == lower)
}

/// Returns `true` if the status line should be emitted at all: the value
/// must be set and must not match its exclusion set.
fn emits_line(value: &str, excluded: &[&str]) -> bool {
    !value.trim().is_empty() && !is_excluded(value, excluded)
}

/// Validates a ticket and formats it into the copyable text block.
///
/// Validation order and line composition follow a fixed policy; formatting
/// the same input twice yields byte-identical output. Lines for unset or
/// excluded statuses are omitted entirely.
pub fn format_ticket(input: &TicketInput) -> Result<String, ValidationError> {
    input.validate()?;

    let call_status = input
        .call_status
        .ok_or(ValidationError::MissingCallStatus)?;

    let mut parts = vec![
        format!("Customer: {}", input.customer_name),
        format!(
            "Phone: {}",
            if input.customer_phone.is_empty() {
                "-"
            } else {
                &input.customer_phone
            }
        ),
        format!("Call: {}", call_status.label()),
    ];

    if emits_line(&input.activation_status, EXCLUDED_ACTIVATION) {
        parts.push(format!("Activation: {}", input.activation_status));
    }

    if emits_line(&input.shipping_status, EXCLUDED_SHIPPING) {
        let sla = if input.shipping_status == SHIPPING_NOT_YET_DELIVERED
            && !input.shipping_sla.is_empty()
        {
            format!(" ({})", input.shipping_sla)
        } else {
            String::new()
        };
        parts.push(format!("Shipping: {}{sla}", input.shipping_status));
    }

    if emits_line(&input.menu_status, EXCLUDED_STATUS) {
        parts.push(format!("Menu: {}", input.menu_status));
    }

    if emits_line(&input.installation_status, EXCLUDED_STATUS) {
        let mut line = format!("Installation: {}", input.installation_status);
        if input.installation_status == STATUS_SCHEDULED && !input.installation_datetime.is_empty()
        {
            line.push_str(&format!(
                " (Installation Date & Time: {})",
                input.installation_datetime
            ));
        }
        parts.push(line);
    }

    if emits_line(&input.training_status, EXCLUDED_STATUS) {
        let mut line = format!("Training: {}", input.training_status);
        if input.training_status == STATUS_SCHEDULED && !input.training_datetime.is_empty() {
            line.push_str(&format!(
                " (Training Date & Time: {})",
                input.training_datetime
            ));
        }
        parts.push(line);
    }

    if !input.whatsapp_ticket.is_empty() {
        parts.push(format!("WhatsApp Ticket: {}", input.whatsapp_ticket));
    }
    if !input.follow_up_datetime.is_empty() {
        parts.push(format!("Next Follow-up: {}", input.follow_up_datetime));
    }
    if !input.follow_up_notes.is_empty() {
        parts.push(format!("Follow-up Notes: {}", input.follow_up_notes));
    }
    if !input.standalone_next_follow_up.is_empty() {
        parts.push(format!(
            "Next Follow up: {}",
            input.standalone_next_follow_up
        ));
    }

    let comment = input.free_comment.trim();
    if !comment.is_empty() {
        parts.push(format!("Comment: {comment}"));
    }

    Ok(parts.join("\n"))
}
