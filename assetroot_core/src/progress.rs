//! Progress reporting for long-running operations.

use crate::messages::Messages;

/// Fraction value reported when the amount of work is unknown or zero.
pub const INDETERMINATE: f64 = -1.0;

/// An operation whose progress can be polled while it runs.
pub trait ProgressObservable {
    /// Completed fraction in `[0, 1]`, or [`INDETERMINATE`].
    fn fraction_complete(&self) -> f64;

    /// Human-readable status, formatted by `messages`.
    fn status_description(&self, messages: &dyn Messages) -> String;
}
