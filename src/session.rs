use std::mem;

use crate::formula;
use crate::types::{
    ConditionEdit, FieldCatalog, FunctionCatalog, RuleEdit, RuleId, RuleSet, Validation,
};

/// The single owner of all live editor state: the rule set, the formula
/// text, its derived [`Validation`], and the unsaved-changes flag.
///
/// Every mutation routes through the pure [`RuleSet`] and formula
/// operations and replaces the owned state wholesale; the validation is
/// re-derived synchronously on every formula change, so it can never be
/// stale. There is no observer machinery and nothing asynchronous here.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) fields: FieldCatalog,
    pub(crate) functions: FunctionCatalog,
    pub(crate) rules: RuleSet,
    pub(crate) formula: String,
    pub(crate) validation: Validation,
    pub(crate) dirty: bool,
}

impl Session {
    /// A fresh session over the given catalogs: one blank rule, empty
    /// formula, untouched validation, nothing to save.
    #[must_use]
    pub fn new(fields: FieldCatalog, functions: FunctionCatalog) -> Self {
        let validation = formula::validate("", &fields, &functions);
        Self {
            fields,
            functions,
            rules: RuleSet::new(),
            formula: String::new(),
            validation,
            dirty: false,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &FieldCatalog {
        &self.fields
    }

    #[must_use]
    pub fn functions(&self) -> &FunctionCatalog {
        &self.functions
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    #[must_use]
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Whether any edit has happened since the last [`mark_saved`](Self::mark_saved).
    /// Backs the embedding shell's before-unload prompt.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn apply(&mut self, op: impl FnOnce(RuleSet) -> RuleSet) {
        self.rules = op(mem::take(&mut self.rules));
        self.dirty = true;
    }

    pub fn add_rule(&mut self) {
        self.apply(RuleSet::add_rule);
    }

    /// Whether rule deletion is currently allowed. The editor never drops
    /// the last remaining rule, mirroring the delete affordance only
    /// appearing when more than one rule exists.
    #[must_use]
    pub fn can_remove_rule(&self) -> bool {
        self.rules.len() > 1
    }

    /// Remove a rule, unless it is the last one (then a no-op).
    pub fn remove_rule(&mut self, id: RuleId) {
        if self.can_remove_rule() {
            self.apply(|rules| rules.remove_rule(id));
        }
    }

    pub fn add_condition(&mut self, id: RuleId) {
        self.apply(|rules| rules.add_condition(id));
    }

    /// Whether the named rule currently has a condition to spare. The
    /// delete affordance only appears once a rule has more than one.
    #[must_use]
    pub fn can_remove_condition(&self, id: RuleId) -> bool {
        self.rules.get(id).is_some_and(|r| r.conditions.len() > 1)
    }

    /// Remove a condition, unless it is the rule's last one (then a no-op).
    pub fn remove_condition(&mut self, id: RuleId, index: usize) {
        if self.can_remove_condition(id) {
            self.apply(|rules| rules.remove_condition(id, index));
        }
    }

    pub fn update_condition(&mut self, id: RuleId, index: usize, edit: ConditionEdit) {
        self.apply(|rules| rules.update_condition(id, index, edit));
    }

    pub fn update_rule(&mut self, id: RuleId, edit: RuleEdit) {
        self.apply(|rules| rules.update_rule(id, edit));
    }

    pub fn move_rule(&mut self, source: usize, destination: usize) {
        self.apply(|rules| rules.move_rule(source, destination));
    }

    /// Complete a drag: `None` means the drop landed outside any target
    /// and the order is left untouched.
    pub fn finish_drag(&mut self, source: usize, destination: Option<usize>) {
        if let Some(destination) = destination {
            self.move_rule(source, destination);
        }
    }

    pub fn set_else_replacement(&mut self, replacement: impl Into<String>) {
        self.apply(|rules| rules.set_else_replacement(replacement.into()));
    }

    /// Replace the formula text and re-derive its validation. Runs on
    /// every keystroke; no debouncing.
    pub fn set_formula(&mut self, text: impl Into<String>) {
        self.formula = text.into();
        self.validation = formula::validate(&self.formula, &self.fields, &self.functions);
        self.dirty = true;
    }

    /// Splice `snippet` into the formula over the caret span
    /// `[start, end)` (character offsets), returning the caret position
    /// just after the insertion. Used when a function example or field
    /// token is clicked into the editor.
    pub fn insert_snippet(&mut self, start: usize, end: usize, snippet: &str) -> usize {
        let (text, caret) = formula::copy_to_formula(&self.formula, start, end, snippet);
        self.set_formula(text);
        caret
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FieldCatalog::standard(), FunctionCatalog::standard())
    }
}

#[cfg(feature = "draft-cache")]
impl Session {
    /// Serialize the current draft (rules, else replacement, formula) to
    /// a byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::SerializeError) if
    /// encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::snapshot::SerializeError> {
        crate::snapshot::encode(self)
    }

    /// Restore a session from bytes previously produced by
    /// [`to_bytes`](Self::to_bytes), against the given catalogs. The
    /// formula validation is re-derived and the session starts clean.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::DeserializeError) on
    /// format, integrity, or validation failure.
    pub fn from_bytes(
        bytes: &[u8],
        fields: FieldCatalog,
        functions: FunctionCatalog,
    ) -> Result<Self, crate::snapshot::DeserializeError> {
        let (rules, formula_text) = crate::snapshot::decode(bytes)?;
        let validation = formula::validate(&formula_text, &fields, &functions);
        Ok(Self {
            fields,
            functions,
            rules,
            formula: formula_text,
            validation,
            dirty: false,
        })
    }

    /// Serialize the current draft and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::SerializeError) on
    /// encoding or I/O failure.
    pub fn to_draft_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), crate::snapshot::SerializeError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and restore the session it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::DeserializeError) on
    /// I/O, format, integrity, or validation failure.
    pub fn from_draft_file(
        path: impl AsRef<std::path::Path>,
        fields: FieldCatalog,
        functions: FunctionCatalog,
    ) -> Result<Self, crate::snapshot::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, fields, functions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_clean() {
        let session = Session::default();
        assert_eq!(session.rules().len(), 1);
        assert!(session.formula().is_empty());
        assert!(!session.validation().is_valid());
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn mutations_mark_dirty_and_save_clears() {
        let mut session = Session::default();
        session.add_rule();
        assert!(session.has_unsaved_changes());
        session.mark_saved();
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn last_rule_cannot_be_removed() {
        let mut session = Session::default();
        let id = session.rules().rules()[0].id;
        assert!(!session.can_remove_rule());
        session.remove_rule(id);
        assert_eq!(session.rules().len(), 1);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn second_rule_unlocks_removal() {
        let mut session = Session::default();
        session.add_rule();
        assert!(session.can_remove_rule());
        let second = session.rules().rules()[1].id;
        session.remove_rule(second);
        assert_eq!(session.rules().len(), 1);
    }

    #[test]
    fn formula_change_revalidates_immediately() {
        let mut session = Session::default();
        session.set_formula("SUM([Revenue])");
        assert!(session.validation().is_valid());
        assert_eq!(session.validation().preview(), Some("SUM(100)"));

        session.set_formula("SUM([Revenue]");
        assert!(!session.validation().is_valid());
    }

    #[test]
    fn cancelled_drag_changes_nothing() {
        let mut session = Session::default();
        session.add_rule();
        session.mark_saved();
        let before = session.rules().clone();

        session.finish_drag(0, None);
        assert_eq!(session.rules(), &before);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn completed_drag_reorders() {
        let mut session = Session::default();
        session.add_rule();
        let ids: Vec<RuleId> = session.rules().rules().iter().map(|r| r.id).collect();

        session.finish_drag(0, Some(1));
        let after: Vec<RuleId> = session.rules().rules().iter().map(|r| r.id).collect();
        assert_eq!(after, vec![ids[1], ids[0]]);
    }

    #[test]
    fn insert_snippet_splices_and_revalidates() {
        let mut session = Session::default();
        session.set_formula("SUM()");
        let caret = session.insert_snippet(4, 4, "[Revenue]");
        assert_eq!(session.formula(), "SUM([Revenue])");
        assert_eq!(caret, 13);
        assert!(session.validation().is_valid());
    }

    #[test]
    fn else_replacement_flows_through() {
        let mut session = Session::default();
        session.set_else_replacement("Unknown");
        assert_eq!(session.rules().else_replacement(), "Unknown");
        assert!(session.has_unsaved_changes());
    }
}
