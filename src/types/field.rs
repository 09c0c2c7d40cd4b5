use std::fmt;

/// The two column types the editor distinguishes. A field's type decides
/// which operator set a condition on it may use and which sample value the
/// formula preview substitutes for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Number,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Number => write!(f, "number"),
        }
    }
}

/// A column available to conditions and formulas.
///
/// `value` is the identifier stored inside a [`Condition`](super::Condition);
/// `label` is the display name and, wrapped in square brackets, the formula
/// token (`[Revenue]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub value: String,
    pub label: String,
    pub field_type: FieldType,
    pub description: Option<String>,
    pub example: Option<String>,
}

impl Field {
    pub fn new(value: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            field_type,
            description: None,
            example: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// The bracketed token this field appears as inside formula text.
    #[must_use]
    pub fn token(&self) -> String {
        format!("[{}]", self.label)
    }
}

/// Ordered, read-only catalog of the fields a document exposes.
///
/// Consumed by the rule model (operator-set selection) and the formula
/// checker (column tokens, preview samples). Not user-editable at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The built-in company-data catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Field::new("company_name", "Company Name", FieldType::Text)
                .with_description("The official name of the company")
                .with_example("Acme Corp"),
            Field::new("email", "Email", FieldType::Text)
                .with_description("The email address of the company"),
            Field::new("revenue", "Revenue", FieldType::Number)
                .with_description("The total revenue of the company"),
            Field::new("employees", "Employees", FieldType::Number)
                .with_description("The total number of employees"),
            Field::new("industry", "Industry", FieldType::Text)
                .with_description("The industry the company belongs to"),
            Field::new("country", "Country", FieldType::Text)
                .with_description("The country the company is located in"),
        ])
    }

    /// Look up a field by its identifier.
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.value == value)
    }

    /// Look up a field by its display label (the inner text of a formula token).
    #[must_use]
    pub fn by_label(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// The type of the named field. Unrecognized identifiers fall back to
    /// [`FieldType::Text`] rather than failing.
    #[must_use]
    pub fn field_type_of(&self, value: &str) -> FieldType {
        self.get(value).map(|f| f.field_type).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
