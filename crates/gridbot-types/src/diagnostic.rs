use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of diagnostics kept before counting only.
pub const MAX_DIAGNOSTICS: usize = 20;

/// Diagnostic severity.
///
/// Nothing the learner types aborts a run, so even `Error` severity is
/// informational — it marks a line the interpreter had to skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagCategory {
    Syntax,
    Name,
    Limit,
}

/// Numeric diagnostic code (G100–G399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiagCode(pub u16);

impl DiagCode {
    // ── Syntax (G100–G199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const UNCLOSED_BLOCK: Self = Self(101);
    pub const UNRECOGNIZED_LINE: Self = Self(102);
    pub const INVALID_NUMBER: Self = Self(103);
    pub const BLOCK_TOO_DEEP: Self = Self(104);

    // ── Name resolution (G200–G299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);
    pub const UNDEFINED_FUNCTION: Self = Self(201);

    // ── Limits (G300–G399) ──
    pub const STEP_LIMIT_REACHED: Self = Self(300);
    pub const RECURSION_LIMIT_REACHED: Self = Self(301);

    /// Get the category for this code.
    pub fn category(self) -> DiagCategory {
        match self.0 {
            100..=199 => DiagCategory::Syntax,
            200..=299 => DiagCategory::Name,
            _ => DiagCategory::Limit,
        }
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

/// A structured interpreter diagnostic.
///
/// Diagnostics explain which lines were skipped and why; the surrounding
/// UI renders them — it must not parse free-form strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source file name.
    pub file: String,
    /// Diagnostic code (e.g., G102).
    pub code: DiagCode,
    /// Severity.
    pub severity: Severity,
    /// Category (derived from code).
    pub category: DiagCategory,
    /// Human-readable message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
    /// The exact source line for context.
    pub source_line: String,
}

impl Diagnostic {
    /// Create a new diagnostic with `Warning` severity.
    pub fn new(
        file: impl Into<String>,
        code: DiagCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Warning,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
        }
    }

    /// Upgrade severity to `Error`.
    pub fn as_error(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.span, self.code, self.category, self.message
        )
    }
}

impl fmt::Display for DiagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Name => write!(f, "name"),
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// Collected diagnostics for one lex/parse/plan pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub entries: Vec<Diagnostic>,
    pub total: usize,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }

    /// Check if anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Add a diagnostic, respecting the MAX_DIAGNOSTICS storage limit.
    pub fn push(&mut self, diag: Diagnostic) {
        if self.entries.len() < MAX_DIAGNOSTICS {
            self.entries.push(diag);
        }
        self.total += 1;
    }

    /// Merge another collection into this one.
    pub fn extend(&mut self, other: Diagnostics) {
        // Entries past the other collection's cap were counted but not stored.
        let uncounted = other.total.saturating_sub(other.entries.len());
        for diag in other.entries {
            self.push(diag);
        }
        self.total += uncounted;
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_category() {
        assert_eq!(DiagCode::UNEXPECTED_TOKEN.category(), DiagCategory::Syntax);
        assert_eq!(DiagCode::UNDEFINED_VARIABLE.category(), DiagCategory::Name);
        assert_eq!(DiagCode::STEP_LIMIT_REACHED.category(), DiagCategory::Limit);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(format!("{}", DiagCode::UNRECOGNIZED_LINE), "G102");
        assert_eq!(format!("{}", DiagCode::STEP_LIMIT_REACHED), "G300");
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(
            "lesson.gb",
            DiagCode::UNRECOGNIZED_LINE,
            "line is not a recognized instruction",
            Span::new(3, 1, 3, 12),
            "jumpForward()",
        );
        assert_eq!(diag.code, DiagCode::UNRECOGNIZED_LINE);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.category, DiagCategory::Syntax);
    }

    #[test]
    fn test_diagnostic_as_error() {
        let diag = Diagnostic::new(
            "lesson.gb",
            DiagCode::UNCLOSED_BLOCK,
            "block is never closed",
            Span::point(2, 10),
            "repeat 3 {",
        )
        .as_error();
        assert_eq!(diag.severity, Severity::Error);
    }

    #[test]
    fn test_diagnostics_cap() {
        let mut diags = Diagnostics::empty();
        for i in 0..25 {
            diags.push(Diagnostic::new(
                "lesson.gb",
                DiagCode::UNRECOGNIZED_LINE,
                format!("skipped line {i}"),
                Span::point(i as u32 + 1, 1),
                "",
            ));
        }
        // Only 20 stored, but total count is 25
        assert_eq!(diags.entries.len(), 20);
        assert_eq!(diags.total, 25);
        assert!(!diags.is_empty());
    }

    #[test]
    fn test_diagnostics_empty() {
        let diags = Diagnostics::empty();
        assert!(diags.is_empty());
        assert_eq!(diags.total, 0);
    }

    #[test]
    fn test_diagnostic_json_serialization() {
        let diag = Diagnostic::new(
            "lesson.gb",
            DiagCode::UNDEFINED_VARIABLE,
            "variable 'steps' is not defined",
            Span::new(4, 8, 4, 13),
            "repeat steps {",
        );
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"code\""));
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"source_line\""));
        assert!(json.contains("\"start_line\""));

        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, diag.code);
        assert_eq!(back.message, diag.message);
    }
}
