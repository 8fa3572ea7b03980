mod call_status;
mod ticket;
mod validation;
mod visibility;

pub use call_status::CallStatus;
pub use ticket::{SHIPPING_NOT_YET_DELIVERED, STATUS_SCHEDULED, TicketInput};
pub use validation::{ValidationError, validate_customer_name, validate_phone};
pub use visibility::{
    Field, FieldRule, VisibilitySpec, VisibilityTrigger, compute_visibility,
};
