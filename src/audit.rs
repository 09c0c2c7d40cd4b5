//! Data model behind the audit-log view: entries, the built-in sample
//! log, and the filter-option catalogs the view's selects are populated
//! from. Rendering and filtering live with the presentation layer.

/// The actor recorded on an audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditUser {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// One audit-log line: who did what to which target, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,
    pub user: AuditUser,
    pub action: String,
    pub target: String,
    pub date: String,
}

/// A value/label pair for a filter select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for the date-range filter, in display order.
pub const DATE_RANGES: &[(&str, &str)] = &[
    ("today", "Today"),
    ("yesterday", "Yesterday"),
    ("week", "Last 7 days"),
    ("month", "Last 30 days"),
    ("year", "Last year"),
];

/// Options for the event-kind filter, in display order.
pub const EVENT_KINDS: &[(&str, &str)] = &[
    ("all", "All events"),
    ("view", "View"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("create", "Create"),
];

/// The built-in demo log shown before any backend is wired up.
#[must_use]
pub fn sample_log() -> Vec<AuditEntry> {
    vec![
        AuditEntry {
            id: "1".to_owned(),
            user: AuditUser {
                name: "Albert Flores".to_owned(),
                email: "chambers@acmelabs.com".to_owned(),
                avatar: Some("AF".to_owned()),
            },
            action: "Edited".to_owned(),
            target: "Private page".to_owned(),
            date: "2022/11/05 11:23 PM".to_owned(),
        },
        AuditEntry {
            id: "2".to_owned(),
            user: AuditUser {
                name: "Kristin Watson".to_owned(),
                email: "jackson.graham@gmail.com".to_owned(),
                avatar: Some("KW".to_owned()),
            },
            action: "Viewed".to_owned(),
            target: "Secret Project Q4".to_owned(),
            date: "2022/11/05 11:22 PM".to_owned(),
        },
    ]
}

/// Derive the user-filter options from a log: an "All users" entry
/// followed by one option per distinct user email, in first-seen order.
/// Option values are emails; labels are display names.
#[must_use]
pub fn user_options(entries: &[AuditEntry]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("all", "All users")];
    for entry in entries {
        if !options.iter().any(|o| o.value == entry.user.email) {
            options.push(SelectOption::new(&entry.user.email, &entry.user.name));
        }
    }
    options
}
