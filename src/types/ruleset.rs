use std::fmt;

use super::condition::{Condition, ConditionEdit};
use super::rule::{Rule, RuleEdit, RuleId};

/// The ordered, first-match-wins list of automation rules plus the
/// fallback replacement used when no rule matches.
///
/// Every mutation consumes the set and returns the updated value; the
/// caller (normally a [`Session`](crate::Session)) owns exactly one live
/// `RuleSet` and replaces it wholesale after each operation. Operations
/// given an unknown id or index return the input unchanged.
///
/// # Example
///
/// ```
/// use colauto::{ConditionEdit, RuleSet};
///
/// let rules = RuleSet::new();
/// let id = rules.rules()[0].id;
/// let rules = rules
///     .update_condition(id, 0, ConditionEdit::Field("revenue".to_owned()))
///     .update_condition(id, 0, ConditionEdit::Operator("greater_than".to_owned()))
///     .update_condition(id, 0, ConditionEdit::Value("1000".to_owned()));
/// assert!(rules.rules()[0].conditions[0].is_set());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub(crate) rules: Vec<Rule>,
    pub(crate) else_replacement: String,
    pub(crate) next_id: u64,
}

impl RuleSet {
    /// A fresh rule set seeded with one blank rule, matching the editor's
    /// initial state. The set is expected to keep at least one rule; the
    /// presentation boundary enforces that (see
    /// [`Session::can_remove_rule`](crate::Session::can_remove_rule)).
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: vec![Rule::blank(RuleId(1))],
            else_replacement: String::new(),
            next_id: 2,
        }
    }

    pub(crate) fn from_parts(rules: Vec<Rule>, else_replacement: String, next_id: u64) -> Self {
        Self {
            rules,
            else_replacement,
            next_id,
        }
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The current position of a rule, if present.
    #[must_use]
    pub fn position(&self, id: RuleId) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }

    /// The fallback replacement applied when no rule matches.
    #[must_use]
    pub fn else_replacement(&self) -> &str {
        &self.else_replacement
    }

    /// Append a new rule with a freshly minted id, one blank condition,
    /// empty replacement, and `MatchType::All`. Never fails.
    #[must_use]
    pub fn add_rule(mut self) -> Self {
        let id = RuleId(self.next_id);
        self.next_id += 1;
        self.rules.push(Rule::blank(id));
        self
    }

    /// Remove the rule with the given id; unchanged if absent. The "keep
    /// at least one rule" policy lives at the presentation boundary, not
    /// here.
    #[must_use]
    pub fn remove_rule(mut self, id: RuleId) -> Self {
        self.rules.retain(|r| r.id != id);
        self
    }

    /// Append a blank condition to the named rule; unchanged if absent.
    #[must_use]
    pub fn add_condition(mut self, id: RuleId) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
            rule.conditions.push(Condition::blank());
        }
        self
    }

    /// Remove the condition at `index` from the named rule; unknown id or
    /// out-of-range index leaves the set unchanged.
    #[must_use]
    pub fn remove_condition(mut self, id: RuleId, index: usize) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
            if index < rule.conditions.len() {
                rule.conditions.remove(index);
            }
        }
        self
    }

    /// Apply one attribute edit to the condition at `index` within the
    /// named rule, leaving every other attribute, condition, and rule
    /// untouched. Unknown id or index is a no-op.
    ///
    /// Changing the field to a *different* identifier clears the selected
    /// operator, since the old choice may not exist in the new field
    /// type's operator set; the value is kept.
    #[must_use]
    pub fn update_condition(mut self, id: RuleId, index: usize, edit: ConditionEdit) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
            if let Some(condition) = rule.conditions.get_mut(index) {
                match edit {
                    ConditionEdit::Field(field) => {
                        if condition.field != field {
                            condition.operator.clear();
                        }
                        condition.field = field;
                    }
                    ConditionEdit::Operator(operator) => condition.operator = operator,
                    ConditionEdit::Value(value) => condition.value = value,
                }
            }
        }
        self
    }

    /// Set the replacement or match type of the named rule; unchanged if
    /// the id is absent.
    #[must_use]
    pub fn update_rule(mut self, id: RuleId, edit: RuleEdit) -> Self {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
            match edit {
                RuleEdit::Replacement(replacement) => rule.replacement = replacement,
                RuleEdit::MatchType(match_type) => rule.match_type = match_type,
            }
        }
        self
    }

    /// Relocate the rule at `source` to `destination`, shifting the rules
    /// in between. Either index out of range leaves the set unchanged.
    #[must_use]
    pub fn move_rule(mut self, source: usize, destination: usize) -> Self {
        if source < self.rules.len() && destination < self.rules.len() {
            let rule = self.rules.remove(source);
            self.rules.insert(destination, rule);
        }
        self
    }

    /// Set the fallback replacement.
    #[must_use]
    pub fn set_else_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.else_replacement = replacement.into();
        self
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: usize = self.rules.iter().map(|r| r.conditions.len()).sum();
        write!(
            f,
            "RuleSet({} rules, {} conditions)",
            self.rules.len(),
            conditions,
        )
    }
}
