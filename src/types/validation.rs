use thiserror::Error;

/// User-facing diagnostics produced by formula validation. The `Display`
/// strings are shown verbatim in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Bracket or parenthesis counts are unbalanced, or the text contains
    /// no recognizable tokens at all. Fatal to validity.
    #[error("Invalid formula structure. Check brackets and parentheses.")]
    UnbalancedStructure,

    /// The formula names no known function or no known column. Advisory
    /// only; validity is unaffected.
    #[error("Warning: Formula might be incomplete. Consider using available functions and columns.")]
    Incomplete,

    /// Catch-all for an internal validation failure. Fatal to validity.
    #[error("Invalid formula syntax")]
    Syntax,
}

/// The outcome of validating a formula, recomputed on every text change.
///
/// `error` and `warning` are kept separate: a structurally valid formula
/// can still carry the advisory [`Diagnostic::Incomplete`] without losing
/// its valid status. An empty or whitespace-only formula is the untouched
/// state, invalid but with no diagnostic at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    is_valid: bool,
    error: Option<Diagnostic>,
    warning: Option<Diagnostic>,
    preview: Option<String>,
}

impl Validation {
    /// The empty-formula state: invalid, but with nothing to report.
    #[must_use]
    pub fn untouched() -> Self {
        Self {
            is_valid: false,
            error: None,
            warning: None,
            preview: None,
        }
    }

    /// Fatal structural failure (unbalanced delimiters or no tokens).
    #[must_use]
    pub fn structural_error() -> Self {
        Self {
            is_valid: false,
            error: Some(Diagnostic::UnbalancedStructure),
            warning: None,
            preview: None,
        }
    }

    /// Fallback for an internal validation failure.
    #[must_use]
    pub fn syntax_error() -> Self {
        Self {
            is_valid: false,
            error: Some(Diagnostic::Syntax),
            warning: None,
            preview: None,
        }
    }

    /// A valid result carrying the sample-substituted preview and, when
    /// the soft completeness check failed, the advisory warning.
    #[must_use]
    pub fn valid(preview: String, warning: Option<Diagnostic>) -> Self {
        Self {
            is_valid: true,
            error: None,
            warning,
            preview: Some(preview),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn error(&self) -> Option<Diagnostic> {
        self.error
    }

    #[must_use]
    pub fn warning(&self) -> Option<Diagnostic> {
        self.warning
    }

    /// The formula with field tokens replaced by sample values. Present
    /// exactly when the formula is valid.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The single message the editor surfaces: the error if present,
    /// otherwise the warning.
    #[must_use]
    pub fn message(&self) -> Option<Diagnostic> {
        self.error.or(self.warning)
    }
}
