//! Reusable widgets shared across screens.

pub mod form;
pub mod output;

pub use form::{FieldKind, Form, FormField, draw_form};
pub use output::{CopyState, OutputContext, draw_output};
