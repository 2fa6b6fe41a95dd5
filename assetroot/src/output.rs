//! Text or JSON output for CLI commands.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Renders command results as text or pretty JSON.
pub struct OutputWriter {
    json: bool,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Render `data` in the configured format.
    ///
    /// `text_fn` only runs in text mode.
    fn render<T: Serialize>(&self, data: &T, text_fn: impl FnOnce() -> String) -> Result<String> {
        if self.json {
            Ok(format!("{}\n", serde_json::to_string_pretty(data)?))
        } else {
            Ok(text_fn())
        }
    }

    /// Print a command result to stdout.
    pub fn write<T: Serialize>(&self, data: &T, text_fn: impl FnOnce() -> String) -> Result<()> {
        let rendered = self.render(data, text_fn)?;
        io::stdout().lock().write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Print an error to stderr; a `{"success": false, ...}` object in JSON mode.
    pub fn write_error(&self, message: &str, result_code: u8) {
        let error = ErrorOutput {
            success: false,
            result_code,
            error: message.to_string(),
        };
        let rendered = self
            .render(&error, || format!("Error: {}\n", message))
            .unwrap_or_else(|_| format!("Error: {}\n", message));
        let _ = io::stderr().lock().write_all(rendered.as_bytes());
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub result_code: u8,
    pub error: String,
}

/// Output for `index-path` and `object-path`.
#[derive(Debug, Serialize)]
pub struct PathOutput {
    pub success: bool,
    pub result_code: u8,
    pub path: String,
}

/// Output for `build`.
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub success: bool,
    pub result_code: u8,
    pub assets_index_id: String,
    pub destination: String,
    pub total: usize,
    pub copied: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_output() -> PathOutput {
        PathOutput {
            success: true,
            result_code: 0,
            path: "/store/objects/ab/abcd".to_string(),
        }
    }

    #[test]
    fn test_render_text_uses_closure() {
        let output = OutputWriter::new(false);
        let text = output
            .render(&path_output(), || "/store/objects/ab/abcd\n".to_string())
            .unwrap();
        assert_eq!(text, "/store/objects/ab/abcd\n");
    }

    #[test]
    fn test_render_json_skips_closure() {
        let output = OutputWriter::new(true);
        let text = output
            .render(&path_output(), || panic!("text closure called in JSON mode"))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["path"], "/store/objects/ab/abcd");
    }
}
