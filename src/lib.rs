mod audit;
mod formula;
mod session;
#[cfg(feature = "draft-cache")]
mod snapshot;
mod summary;
mod types;

pub use audit::{
    sample_log, user_options, AuditEntry, AuditUser, SelectOption, DATE_RANGES, EVENT_KINDS,
};
pub use formula::{copy_to_formula, format_preview, validate};
pub use session::Session;
#[cfg(feature = "draft-cache")]
pub use snapshot::{DeserializeError, SerializeError};
pub use summary::{condition_preview, rule_digest, RuleDigest};
pub use types::{
    operator_is_unary, operator_is_valid, operator_label, operators_for, Condition, ConditionEdit,
    Diagnostic, Field, FieldCatalog, FieldType, Function, FunctionArgument, FunctionCatalog,
    MatchType, OperatorChoice, Rule, RuleEdit, RuleId, RuleSet, Validation, NUMBER_OPERATORS,
    TEXT_OPERATORS,
};
