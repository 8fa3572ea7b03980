//! Ticket text-block formatting.
//!
//! Pure functions that turn a validated [`TicketInput`](crate::model::TicketInput)
//! into the copyable multi-line block. No I/O — the TUI layer owns the
//! output surface and the clipboard.

mod writer;

pub use writer::format_ticket;
