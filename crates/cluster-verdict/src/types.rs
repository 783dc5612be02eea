//! Core data types for comparison verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentence returned by the local comparator when a pixel differs.
pub const PIXELS_DIFFER: &str = "The images are different. Pixel differences detected.";

/// Sentence returned by the local comparator for bit-identical captures.
pub const PIXELS_IDENTICAL: &str = "The images are identical. No differences detected.";

/// Outcome of a single comparison.
///
/// Callers that only want text can use [`Verdict::render`] (or `Display`),
/// which produces the same strings earlier integrations matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Text produced by a comparator: the model's answer or a fixed local sentence.
    Judged(String),
    /// The remote endpoint answered with a non-success status.
    Unavailable { status: u16, body: String },
}

impl Verdict {
    /// Whether a comparator actually judged the pair.
    pub fn is_judged(&self) -> bool {
        matches!(self, Verdict::Judged(_))
    }

    /// HTTP status of a failed remote call.
    pub fn status(&self) -> Option<u16> {
        match self {
            Verdict::Judged(_) => None,
            Verdict::Unavailable { status, .. } => Some(*status),
        }
    }

    /// Render into the legacy text form.
    ///
    /// A judged verdict is returned unchanged. An unavailable one becomes the
    /// manual-review notice embedding status and body; its prefix is matched
    /// literally downstream and must not change (misspelling included).
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Consume the verdict, returning its text form.
    pub fn into_text(self) -> String {
        match self {
            Verdict::Judged(text) => text,
            other => other.render(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Judged(text) => f.write_str(text),
            Verdict::Unavailable { status, body } => write!(
                f,
                "Uanble to generate the review due to a server side error \
                 [Error: {status} {body}]. Kindly check this case manually."
            ),
        }
    }
}

/// A rectangle region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Errors that can occur while comparing captures.
#[derive(thiserror::Error, Debug)]
pub enum VerdictError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience result type.
pub type VerdictResult<T> = Result<T, VerdictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judged_renders_unchanged() {
        let v = Verdict::Judged("Verdict: Same images".to_string());
        assert_eq!(v.render(), "Verdict: Same images");
        assert!(v.is_judged());
        assert_eq!(v.status(), None);
    }

    #[test]
    fn test_unavailable_renders_sentinel() {
        let v = Verdict::Unavailable {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(
            v.render(),
            "Uanble to generate the review due to a server side error \
             [Error: 503 overloaded]. Kindly check this case manually."
        );
        assert!(!v.is_judged());
        assert_eq!(v.status(), Some(503));
    }

    #[test]
    fn test_into_text_matches_render() {
        let v = Verdict::Unavailable {
            status: 401,
            body: "{\"message\":\"Unauthorized\"}".to_string(),
        };
        let rendered = v.render();
        assert_eq!(v.into_text(), rendered);
    }
}
