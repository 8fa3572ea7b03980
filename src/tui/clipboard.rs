//! System clipboard write helper.

use clipboard_rs::{Clipboard, ClipboardContext};

/// Instruction shown when every clipboard write path has failed. The output
/// text stays visible and selectable, so manual copy always works.
pub const MANUAL_COPY_HINT: &str = "Copy failed. Select the output text and copy manually.";

/// Writes `text` to the system clipboard.
///
/// Returns the clipboard error message on failure; callers surface the
/// manual-copy fallback instead of retrying.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn copy_text(text: &str) -> Result<(), String> {
    ClipboardContext::new()
        .and_then(|ctx| ctx.set_text(text.to_string()))
        .map_err(|e| e.to_string())
}
