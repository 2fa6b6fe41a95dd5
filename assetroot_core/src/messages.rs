//! Message keys and the localization seam.
//!
//! The library never produces display prose itself. It hands a key and
//! positional arguments to a [`Messages`] implementation supplied by the
//! caller.

use std::fmt;
use std::path::Path;

/// Message keys understood by [`Messages`] implementations.
pub mod keys {
    /// Status while expanding an empty index. Arguments: total, remaining.
    pub const EXPANDING_NONE: &str = "assets.expanding1";

    /// Status while expanding a non-empty index. Arguments: total, remaining.
    pub const EXPANDING: &str = "assets.expandingN";

    /// A store object is missing. Arguments: absolute object path.
    pub const MISSING_OBJECT: &str = "assets.missingObject";

    /// A build was cancelled. No arguments.
    pub const CANCELLED: &str = "assets.cancelled";
}

/// A positional argument passed to [`Messages::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageArg<'a> {
    /// A count of entries.
    Count(usize),
    /// A filesystem path.
    Path(&'a Path),
}

impl fmt::Display for MessageArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Count(n) => write!(f, "{}", n),
            MessageArg::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Turns a message key and its arguments into display text.
pub trait Messages {
    fn format(&self, key: &str, args: &[MessageArg<'_>]) -> String;
}

/// A status message that has not been formatted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessage {
    pub key: &'static str,
    pub total: usize,
    pub remaining: usize,
}

impl StatusMessage {
    /// Format through the given message provider.
    pub fn render(&self, messages: &dyn Messages) -> String {
        messages.format(
            self.key,
            &[
                MessageArg::Count(self.total),
                MessageArg::Count(self.remaining),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder;

    impl Messages for Recorder {
        fn format(&self, key: &str, args: &[MessageArg<'_>]) -> String {
            let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            format!("{} {}", key, args.join(" "))
        }
    }

    #[test]
    fn test_status_message_passes_positional_args() {
        let status = StatusMessage {
            key: keys::EXPANDING,
            total: 10,
            remaining: 4,
        };
        assert_eq!(status.render(&Recorder), "assets.expandingN 10 4");
    }

    #[test]
    fn test_message_arg_display() {
        assert_eq!(MessageArg::Count(7).to_string(), "7");
        assert_eq!(MessageArg::Path(Path::new("a/b")).to_string(), "a/b");
    }
}
