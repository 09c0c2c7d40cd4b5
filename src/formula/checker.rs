use crate::types::{Diagnostic, FieldCatalog, FieldType, FunctionCatalog, Validation};

use super::scanner::{scan, ScanError};

/// Validate formula text against the given catalogs.
///
/// Empty or whitespace-only text is the untouched state (invalid, no
/// diagnostic). Otherwise the text passes a structural check (balanced
/// `[]` and `()`, at least one recognizable token) and, when structurally
/// sound, gets a sample-substituted preview plus an advisory warning if
/// it names no known function or no known column.
///
/// This is deliberately not a parser: no expression tree is built, and
/// most semantic mistakes go undetected. Cheap enough to run on every
/// keystroke. Internal failures never escape; they degrade to the generic
/// syntax diagnostic.
#[must_use]
pub fn validate(formula: &str, fields: &FieldCatalog, functions: &FunctionCatalog) -> Validation {
    if formula.trim().is_empty() {
        return Validation::untouched();
    }
    check(formula, fields, functions).unwrap_or_else(|_| Validation::syntax_error())
}

fn check(
    formula: &str,
    fields: &FieldCatalog,
    functions: &FunctionCatalog,
) -> Result<Validation, ScanError> {
    let tokens = scan(formula)?;

    let brackets_balanced = count(formula, '[') == count(formula, ']');
    let parens_balanced = count(formula, '(') == count(formula, ')');
    if tokens.is_empty() || !brackets_balanced || !parens_balanced {
        return Ok(Validation::structural_error());
    }

    // Soft completeness check: advisory, never fatal.
    let has_function = functions.iter().any(|f| formula.contains(&f.name));
    let has_column = fields.iter().any(|f| formula.contains(&f.token()));
    let warning = (!has_function || !has_column).then_some(Diagnostic::Incomplete);

    Ok(Validation::valid(substitute_samples(formula, fields), warning))
}

fn count(text: &str, ch: char) -> usize {
    text.chars().filter(|&c| c == ch).count()
}

/// The representative value substituted for a column token in previews.
pub(crate) fn sample_value(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Number => "100",
        FieldType::Text => "\"Sample\"",
    }
}

/// Replace every occurrence of every known `[Label]` token with its
/// sample value. Unknown bracket tokens pass through untouched.
fn substitute_samples(formula: &str, fields: &FieldCatalog) -> String {
    fields.iter().fold(formula.to_owned(), |acc, field| {
        acc.replace(&field.token(), sample_value(field.field_type))
    })
}

/// Cosmetic pass over a preview: one space around each arithmetic
/// operator, runs of whitespace collapsed, ends trimmed. Display only.
#[must_use]
pub fn format_preview(preview: &str) -> String {
    let mut spaced = String::with_capacity(preview.len() + 8);
    for ch in preview.chars() {
        if matches!(ch, '+' | '-' | '*' | '/') {
            spaced.push(' ');
            spaced.push(ch);
            spaced.push(' ');
        } else {
            spaced.push(ch);
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splice `insert` into `text` over the caret span `[start, end)` and
/// return the new text plus the caret position just after the insertion.
/// Positions are character offsets and are clamped to the text.
#[must_use]
pub fn copy_to_formula(text: &str, start: usize, end: usize, insert: &str) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let mut out: String = chars[..start].iter().collect();
    out.push_str(insert);
    out.extend(chars[end..].iter());
    (out, start + insert.chars().count())
}
