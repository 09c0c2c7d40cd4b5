/// A documented argument of a formula function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    pub name: String,
    pub arg_type: String,
    pub description: String,
}

/// A formula building block: name, helper text, and the example snippet
/// inserted into the editor via
/// [`copy_to_formula`](crate::copy_to_formula).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub description: String,
    pub syntax: String,
    pub example: String,
    pub arguments: Vec<FunctionArgument>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        syntax: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            syntax: syntax.into(),
            example: example.into(),
            arguments: Vec::new(),
        }
    }
}

/// Ordered, read-only catalog of the functions the formula language
/// recognizes. Only the names feed validation; the rest is helper text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCatalog {
    functions: Vec<Function>,
}

impl FunctionCatalog {
    #[must_use]
    pub fn new(functions: Vec<Function>) -> Self {
        Self { functions }
    }

    /// The built-in aggregate/conditional function set.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Function::new(
                "SUM",
                "Adds up all values in the specified column",
                "SUM([Column])",
                "SUM([Revenue])",
            ),
            Function::new(
                "AVG",
                "Calculates the average of values in the specified column",
                "AVG([Column])",
                "AVG([Price])",
            ),
            Function::new(
                "COUNT",
                "Counts the number of non-empty values",
                "COUNT([Column])",
                "COUNT([Orders])",
            ),
            Function::new(
                "MIN",
                "Finds the minimum value in the specified column",
                "MIN([Column])",
                "MIN([Price])",
            ),
            Function::new(
                "MAX",
                "Finds the maximum value in the specified column",
                "MAX([Column])",
                "MAX([Price])",
            ),
            Function::new(
                "IF",
                "Conditional logic in formulas",
                "IF(condition, value_if_true, value_if_false)",
                "IF([Status]='Active', [Price] * 1.2, [Price])",
            ),
        ])
    }

    /// Look up a function by name (case-sensitive, as in formula text).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
