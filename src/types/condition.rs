use super::operator::operator_is_unary;

/// A single field/operator/value test inside a [`Rule`](super::Rule).
///
/// `field` holds a catalog identifier and `operator` a token from the
/// operator table for that field's type; both start empty (unset) on a
/// freshly added condition. `value` is free text and is ignored while a
/// unary operator is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl Condition {
    /// A fully unset condition, as created by "add condition".
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether both a field and an operator have been chosen.
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.field.is_empty() && !self.operator.is_empty()
    }

    /// The comparison value, or `None` when the selected operator is unary.
    #[must_use]
    pub fn effective_value(&self) -> Option<&str> {
        if operator_is_unary(&self.operator) {
            None
        } else {
            Some(self.value.as_str())
        }
    }
}

/// One attribute update applied to a condition via
/// [`RuleSet::update_condition`](super::RuleSet::update_condition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionEdit {
    Field(String),
    Operator(String),
    Value(String),
}
