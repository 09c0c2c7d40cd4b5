//! Human-readable digests of conditions and rules, used by the
//! presentation layer for inline previews and the per-rule summary card.

use crate::types::{operator_label, Condition, FieldCatalog, MatchType, Rule};

/// Render a condition as `<field label> <operator label> <value>`.
///
/// Returns `None` until both a field and an operator are chosen. The value
/// is omitted for the unary operators. Identifiers missing from the
/// catalog fall back to their raw tokens.
#[must_use]
pub fn condition_preview(condition: &Condition, fields: &FieldCatalog) -> Option<String> {
    if !condition.is_set() {
        return None;
    }

    let field_label = fields
        .get(&condition.field)
        .map_or(condition.field.as_str(), |f| f.label.as_str());
    let op_label = operator_label(fields.field_type_of(&condition.field), &condition.operator)
        .unwrap_or(condition.operator.as_str());

    Some(match condition.effective_value() {
        Some(value) => format!("{field_label} {op_label} {value}"),
        None => format!("{field_label} {op_label}"),
    })
}

/// A rule rendered for the summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDigest {
    /// `"When:"` for a single condition, otherwise `"Match ALL of:"` /
    /// `"Match ANY of:"`.
    pub heading: &'static str,
    /// One line per fully-specified condition, in condition order.
    pub lines: Vec<String>,
    /// The replacement, when non-empty.
    pub replacement: Option<String>,
}

/// Digest a rule for display. Conditions still missing a field or an
/// operator are skipped.
#[must_use]
pub fn rule_digest(rule: &Rule, fields: &FieldCatalog) -> RuleDigest {
    let heading = if rule.conditions.len() > 1 {
        match rule.match_type {
            MatchType::All => "Match ALL of:",
            MatchType::Any => "Match ANY of:",
        }
    } else {
        "When:"
    };

    let lines = rule
        .conditions
        .iter()
        .filter_map(|c| condition_preview(c, fields))
        .collect();

    let replacement = (!rule.replacement.is_empty()).then(|| rule.replacement.clone());

    RuleDigest {
        heading,
        lines,
        replacement,
    }
}
