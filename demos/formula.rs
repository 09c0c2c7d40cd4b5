use colauto::{format_preview, validate, FieldCatalog, FunctionCatalog};

fn main() {
    let fields = FieldCatalog::standard();
    let functions = FunctionCatalog::standard();

    let formulas = [
        "SUM([Revenue])",
        "[Revenue] + [Employees]",
        "IF([Revenue]>100,[Revenue],0)",
        "[Company Name]",
        "SUM([Revenue]",
        "",
    ];

    for formula in formulas {
        let v = validate(formula, &fields, &functions);
        println!("formula: {formula:?}");
        println!("  valid: {}", v.is_valid());
        if let Some(message) = v.message() {
            println!("  note:  {message}");
        }
        if let Some(preview) = v.preview() {
            println!("  preview: {}", format_preview(preview));
        }
        println!();
    }
}
