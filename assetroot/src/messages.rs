//! Bundled English messages.

use assetroot_core::{MessageArg, Messages, keys};

/// English text for the library's message keys.
///
/// Templates use `{0}`, `{1}`, ... for positional arguments.
pub struct EnglishMessages;

impl EnglishMessages {
    fn template(key: &str) -> Option<&'static str> {
        match key {
            keys::EXPANDING_NONE => Some("No assets to set up"),
            keys::EXPANDING => Some("Setting up {0} assets ({1} remaining)..."),
            keys::MISSING_OBJECT => Some(
                "The asset object {0} is missing from the store. Download the assets again and retry.",
            ),
            keys::CANCELLED => Some("Asset setup was cancelled."),
            _ => None,
        }
    }
}

impl Messages for EnglishMessages {
    fn format(&self, key: &str, args: &[MessageArg<'_>]) -> String {
        let Some(template) = Self::template(key) else {
            // Unknown keys are shown as-is so nothing is silently dropped
            let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            return format!("{} {}", key, args.join(" ")).trim_end().to_string();
        };

        let mut text = template.to_string();
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), &arg.to_string());
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expanding() {
        let text = EnglishMessages.format(
            keys::EXPANDING,
            &[MessageArg::Count(12), MessageArg::Count(5)],
        );
        assert_eq!(text, "Setting up 12 assets (5 remaining)...");
    }

    #[test]
    fn test_expanding_none_ignores_counts() {
        let text = EnglishMessages.format(
            keys::EXPANDING_NONE,
            &[MessageArg::Count(0), MessageArg::Count(0)],
        );
        assert_eq!(text, "No assets to set up");
    }

    #[test]
    fn test_missing_object_names_path() {
        let text = EnglishMessages.format(
            keys::MISSING_OBJECT,
            &[MessageArg::Path(Path::new("/a/objects/ff/ff00"))],
        );
        assert!(text.contains("/a/objects/ff/ff00"));
    }

    #[test]
    fn test_unknown_key() {
        let text = EnglishMessages.format("nope", &[MessageArg::Count(3)]);
        assert_eq!(text, "nope 3");
    }
}
