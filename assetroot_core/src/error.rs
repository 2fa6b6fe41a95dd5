//! Error types for assetroot_core.

use crate::messages::{MessageArg, Messages, keys};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using assetroot_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or materializing assets.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred during directory creation or file copy.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The store has no object at the path an index entry resolves to.
    #[error("Missing object {}", path.display())]
    MissingObject { path: PathBuf },

    /// An index or manifest document could not be parsed.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A manifest parsed but lacks what the store needs from it.
    #[error("Invalid manifest at {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    /// The build was stopped through its cancellation flag.
    #[error("Build cancelled")]
    Cancelled,
}

impl Error {
    /// Create a MissingObject error.
    pub fn missing_object(path: impl Into<PathBuf>) -> Self {
        Error::MissingObject { path: path.into() }
    }

    /// Create a Parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidManifest error.
    pub fn invalid_manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidManifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Render the user-facing text for this error.
    ///
    /// Errors with a message key go through `messages`; the rest fall back
    /// to their `Display` output.
    pub fn describe(&self, messages: &dyn Messages) -> String {
        match self {
            Error::MissingObject { path } => {
                messages.format(keys::MISSING_OBJECT, &[MessageArg::Path(path)])
            }
            Error::Cancelled => messages.format(keys::CANCELLED, &[]),
            other => other.to_string(),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io { source: err.error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct KeyEcho;

    impl Messages for KeyEcho {
        fn format(&self, key: &str, args: &[MessageArg<'_>]) -> String {
            let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            format!("{}[{}]", key, args.join(","))
        }
    }

    #[test]
    fn test_missing_object_display_names_path() {
        let err = Error::missing_object("/store/objects/ff/ff00aa");
        assert_eq!(err.to_string(), "Missing object /store/objects/ff/ff00aa");
    }

    #[test]
    fn test_describe_missing_object_uses_key() {
        let err = Error::missing_object(Path::new("/s/objects/ab/abcd"));
        assert_eq!(
            err.describe(&KeyEcho),
            "assets.missingObject[/s/objects/ab/abcd]"
        );
    }

    #[test]
    fn test_describe_falls_back_to_display() {
        let err = Error::invalid_manifest("/m.json", "missing assets index id");
        assert_eq!(
            err.describe(&KeyEcho),
            "Invalid manifest at /m.json: missing assets index id"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_persist_error_converts_to_io() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = tempfile::NamedTempFile::new_in(temp_dir.path()).unwrap();

        let persist_err = temp_file
            .persist(temp_dir.path().join("no/such/dir/file"))
            .unwrap_err();
        let err: Error = persist_err.into();

        match err {
            Error::Io { source } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
