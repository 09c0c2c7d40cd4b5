use colauto::{
    rule_digest, ConditionEdit, FieldCatalog, FunctionCatalog, MatchType, RuleEdit, Session,
};

fn main() {
    let mut session = Session::new(FieldCatalog::standard(), FunctionCatalog::standard());

    // Rule 1: if Company Name contains "Gandalf" -> "Minas Tirith"
    let first = session.rules().rules()[0].id;
    session.update_condition(first, 0, ConditionEdit::Field("company_name".to_owned()));
    session.update_condition(first, 0, ConditionEdit::Operator("contains".to_owned()));
    session.update_condition(first, 0, ConditionEdit::Value("Gandalf".to_owned()));
    session.update_rule(first, RuleEdit::Replacement("Minas Tirith".to_owned()));

    // Rule 2: else if Revenue > 1000 AND Country equals "Gondor" -> "Enterprise"
    session.add_rule();
    let second = session.rules().rules()[1].id;
    session.update_condition(second, 0, ConditionEdit::Field("revenue".to_owned()));
    session.update_condition(second, 0, ConditionEdit::Operator("greater_than".to_owned()));
    session.update_condition(second, 0, ConditionEdit::Value("1000".to_owned()));
    session.add_condition(second);
    session.update_condition(second, 1, ConditionEdit::Field("country".to_owned()));
    session.update_condition(second, 1, ConditionEdit::Operator("equals".to_owned()));
    session.update_condition(second, 1, ConditionEdit::Value("Gondor".to_owned()));
    session.update_rule(second, RuleEdit::MatchType(MatchType::All));
    session.update_rule(second, RuleEdit::Replacement("Enterprise".to_owned()));

    session.set_else_replacement("Unknown");

    println!("{}", session.rules());
    for (i, rule) in session.rules().rules().iter().enumerate() {
        let digest = rule_digest(rule, session.fields());
        let kind = if i == 0 { "If" } else { "Else if" };
        println!("\n{kind} ({})", digest.heading);
        for line in &digest.lines {
            println!("  - {line}");
        }
        if let Some(replacement) = &digest.replacement {
            println!("  => {replacement}");
        }
    }
    println!("\nElse => {}", session.rules().else_replacement());
}
