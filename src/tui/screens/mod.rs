//! TUI screen implementations.

pub mod help;
pub mod ticket_entry;

pub use help::{HelpState, draw_help};
pub use ticket_entry::{TicketEntryState, draw_ticket_entry};
