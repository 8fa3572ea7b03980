#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! callpad — call wrap-up ticket formatter TUI for support agents.
//!
//! A structured form collects call outcome and fulfillment status fields,
//! validates them, and formats one copyable text block for pasting into an
//! external ticketing or chat system. Only the most recent formatted ticket
//! is retained; nothing is persisted except the theme preference.

pub mod config;
pub mod format;
pub mod model;
pub mod tui;
