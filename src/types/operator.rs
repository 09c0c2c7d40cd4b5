use super::field::FieldType;

/// One entry of the per-type operator table: the stored token and the label
/// the presentation layer shows for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorChoice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> OperatorChoice {
    OperatorChoice { value, label }
}

/// Operators available to conditions on text fields, in display order.
pub const TEXT_OPERATORS: &[OperatorChoice] = &[
    choice("contains", "Contains"),
    choice("not_contains", "Does not contain"),
    choice("equals", "Equals"),
    choice("not_equals", "Does not equal"),
    choice("starts_with", "Starts with"),
    choice("ends_with", "Ends with"),
    choice("regex", "Matches regex"),
    choice("is_empty", "Is empty"),
    choice("is_not_empty", "Is not empty"),
];

/// Operators available to conditions on number fields, in display order.
pub const NUMBER_OPERATORS: &[OperatorChoice] = &[
    choice("equals", "="),
    choice("not_equals", "\u{2260}"),
    choice("greater_than", ">"),
    choice("less_than", "<"),
    choice("greater_than_equals", "\u{2265}"),
    choice("less_than_equals", "\u{2264}"),
    choice("between", "Between"),
    choice("is_empty", "Is empty"),
    choice("is_not_empty", "Is not empty"),
];

/// The operator set valid for conditions on a field of the given type.
#[must_use]
pub fn operators_for(field_type: FieldType) -> &'static [OperatorChoice] {
    match field_type {
        FieldType::Text => TEXT_OPERATORS,
        FieldType::Number => NUMBER_OPERATORS,
    }
}

/// Whether `operator` belongs to the operator set for `field_type`.
#[must_use]
pub fn operator_is_valid(field_type: FieldType, operator: &str) -> bool {
    operators_for(field_type).iter().any(|op| op.value == operator)
}

/// The display label for `operator` under `field_type`, if the pairing is valid.
#[must_use]
pub fn operator_label(field_type: FieldType, operator: &str) -> Option<&'static str> {
    operators_for(field_type)
        .iter()
        .find(|op| op.value == operator)
        .map(|op| op.label)
}

/// The two unary operators take no comparison value; a condition's `value`
/// is ignored while one of them is selected.
#[must_use]
pub fn operator_is_unary(operator: &str) -> bool {
    matches!(operator, "is_empty" | "is_not_empty")
}
