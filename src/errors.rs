use std::fmt;

/// Reasons a manifest line is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Fewer than three tab-separated fields on a non-empty line
    MissingFields(usize),
    /// The size field is empty or not a plain decimal number
    InvalidSize(String),
    /// The path or hash field is empty
    EmptyField(&'static str),
}

/// A manifest line that cannot be decoded into a fingerprint record.
///
/// Parsing stops at the first bad line: a manifest that is only partially
/// understood would make every later verification report misleading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestParseError {
    /// 1-based line number after blank lines are dropped and lines are sorted
    pub line_number: usize,
    /// The offending line, verbatim
    pub line: String,
    /// What was wrong with it
    pub reason: ParseFailure,
}

impl ManifestParseError {
    /// Short description of the failure category
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self.reason {
            ParseFailure::MissingFields(_) => "Missing fields",
            ParseFailure::InvalidSize(_) => "Invalid size",
            ParseFailure::EmptyField(_) => "Empty field",
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(found) => {
                write!(f, "expected 3 tab-separated fields, found {found}")
            }
            Self::InvalidSize(size) => write!(f, "size '{size}' is not a decimal byte count"),
            Self::EmptyField(name) => write!(f, "{name} field is empty"),
        }
    }
}

impl fmt::Display for ManifestParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Malformed manifest line {}: {} ({:?})",
            self.line_number, self.reason, self.line
        )
    }
}

impl std::error::Error for ManifestParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_and_reason() {
        let err = ManifestParseError {
            line_number: 3,
            line: "a.txt\tabc".to_string(),
            reason: ParseFailure::MissingFields(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("found 2"));
        assert!(msg.contains("a.txt"));
        assert_eq!(err.error_type(), "Missing fields");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err = ManifestParseError {
            line_number: 1,
            line: "x\ty\tz".to_string(),
            reason: ParseFailure::InvalidSize("z".to_string()),
        };
        let any: anyhow::Error = err.clone().into();
        assert_eq!(any.downcast_ref::<ManifestParseError>(), Some(&err));
    }
}
