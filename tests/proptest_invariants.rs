
use colauto::{
    copy_to_formula, format_preview, validate, ConditionEdit, FieldCatalog, FunctionCatalog,
};
use proptest::prelude::*;
use strategies::arb_formula;
use strategies::arb_ruleset;

fn count(text: &str, ch: char) -> usize {
    text.chars().filter(|&c| c == ch).count()
}

// ---------------------------------------------------------------------------
// Invariant 1: Rule lifecycle
//
// add_rule grows the set by exactly one blank rule with a unique id;
// remove_rule shrinks by one when the id is present and is otherwise a
// no-op. The set never ends up with duplicate ids.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn add_rule_appends_unique_blank(rules in arb_ruleset()) {
        let before = rules.len();
        let existing: Vec<_> = rules.rules().iter().map(|r| r.id).collect();

        let rules = rules.add_rule();
        prop_assert_eq!(rules.len(), before + 1);

        let new_rule = rules.rules().last().unwrap();
        prop_assert!(!existing.contains(&new_rule.id), "id reuse: {}", new_rule.id);
        prop_assert_eq!(new_rule.conditions.len(), 1);
        prop_assert!(!new_rule.conditions[0].is_set());
        prop_assert!(new_rule.replacement.is_empty());
    }

    #[test]
    fn ids_stay_unique(rules in arb_ruleset()) {
        let mut ids: Vec<_> = rules.rules().iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn remove_present_then_absent(rules in arb_ruleset(), pos in 0usize..8) {
        let rules = rules.add_rule(); // guarantee a removable rule
        let before = rules.len();
        let id = rules.rules()[pos % before].id;

        let rules = rules.remove_rule(id);
        prop_assert_eq!(rules.len(), before - 1);
        prop_assert!(rules.get(id).is_none());

        let again = rules.clone().remove_rule(id);
        prop_assert_eq!(again, rules);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Reordering
//
// A move followed by the inverse move restores the original order; moves
// never change the set of ids.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn move_roundtrip(rules in arb_ruleset(), source in 0usize..8, dest in 0usize..8) {
        let len = rules.len();
        let (source, dest) = (source % len, dest % len);
        let before = rules.clone();

        let rules = rules.move_rule(source, dest).move_rule(dest, source);
        prop_assert_eq!(rules, before);
    }

    #[test]
    fn move_preserves_ids(rules in arb_ruleset(), source in 0usize..16, dest in 0usize..16) {
        let mut before: Vec<_> = rules.rules().iter().map(|r| r.id).collect();
        let rules = rules.move_rule(source, dest);
        let mut after: Vec<_> = rules.rules().iter().map(|r| r.id).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Targeted updates
//
// update_condition changes exactly the addressed condition; every other
// condition and rule compares equal to its pre-update value.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn update_condition_is_surgical(
        rules in arb_ruleset(),
        pos in 0usize..8,
        value in "[a-zA-Z0-9 ]{0,12}",
    ) {
        let before = rules.clone();
        let rule_pos = pos % rules.len();
        let id = rules.rules()[rule_pos].id;

        let rules = rules.update_condition(id, 0, ConditionEdit::Value(value.clone()));

        for (i, rule) in rules.rules().iter().enumerate() {
            if i == rule_pos {
                prop_assert_eq!(&rule.conditions[0].value, &value);
                prop_assert_eq!(&rule.conditions[0].field, &before.rules()[i].conditions[0].field);
                prop_assert_eq!(&rule.conditions[1..], &before.rules()[i].conditions[1..]);
            } else {
                prop_assert_eq!(rule, &before.rules()[i]);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Validation shape
//
// validate never panics; valid results always carry a preview over
// balanced text, invalid results never carry one.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn validation_shape(formula in arb_formula()) {
        let fields = FieldCatalog::standard();
        let functions = FunctionCatalog::standard();
        let v = validate(&formula, &fields, &functions);

        if v.is_valid() {
            prop_assert!(v.preview().is_some());
            prop_assert_eq!(count(&formula, '['), count(&formula, ']'));
            prop_assert_eq!(count(&formula, '('), count(&formula, ')'));
        } else {
            prop_assert!(v.preview().is_none());
        }
    }

    #[test]
    fn validation_never_panics_on_arbitrary_text(formula in "\\PC{0,40}") {
        let fields = FieldCatalog::standard();
        let functions = FunctionCatalog::standard();
        let _ = validate(&formula, &fields, &functions);
    }

    #[test]
    fn format_preview_is_normalized(formula in arb_formula()) {
        let formatted = format_preview(&formula);
        prop_assert!(!formatted.contains("  "), "double space in {formatted:?}");
        prop_assert_eq!(formatted.trim(), formatted.as_str());
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Caret splicing
//
// The result has the expected character length and the caret lands just
// after the inserted text.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn caret_splice_arithmetic(
        text in "[a-zA-Z\\[\\]()+ ]{0,20}",
        start in 0usize..24,
        end in 0usize..24,
        insert in "[a-zA-Z0-9\\[\\]]{0,10}",
    ) {
        let len = text.chars().count();
        let (new_text, caret) = copy_to_formula(&text, start, end, &insert);

        let start_c = start.min(len);
        let end_c = end.clamp(start_c, len);
        let insert_len = insert.chars().count();

        prop_assert_eq!(new_text.chars().count(), len - (end_c - start_c) + insert_len);
        prop_assert_eq!(caret, start_c + insert_len);
        prop_assert!(new_text.contains(&insert));
    }
}

// ---------------------------------------------------------------------------
// Sanity: edit histories keep the editor invariant
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn edit_history_keeps_editor_invariants(rules in arb_ruleset()) {
        prop_assert!(!rules.is_empty());
        for rule in rules.rules() {
            prop_assert!(!rule.conditions.is_empty(), "rule {} lost all conditions", rule.id);
        }
    }
}
