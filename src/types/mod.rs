mod condition;
mod field;
mod function;
mod operator;
mod rule;
mod ruleset;
mod validation;

pub use condition::{Condition, ConditionEdit};
pub use field::{Field, FieldCatalog, FieldType};
pub use function::{Function, FunctionArgument, FunctionCatalog};
pub use operator::{
    operator_is_unary, operator_is_valid, operator_label, operators_for, OperatorChoice,
    NUMBER_OPERATORS, TEXT_OPERATORS,
};
pub use rule::{MatchType, Rule, RuleEdit, RuleId};
pub use ruleset::RuleSet;
pub use validation::{Diagnostic, Validation};
