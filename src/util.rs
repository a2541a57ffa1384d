use std::fmt::Display;

use tracing::error;

/// Run one isolated step, logging its failure instead of propagating it.
/// `None` when the step failed.
pub fn run_or_log<T, E: Display>(step: &str, run: impl FnOnce() -> Result<T, E>) -> Option<T> {
    match run() {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = "Error processing image", step, err = e.to_string());
            None
        }
    }
}
