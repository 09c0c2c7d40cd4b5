use std::fmt;
use std::str::FromStr;

use super::condition::Condition;

/// Stable identity of a rule, minted by the owning
/// [`RuleSet`](super::RuleSet) and never reused. Survives reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) u64);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a rule combines its conditions: `All` is logical AND, `Any` is
/// logical OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    #[default]
    All,
    Any,
}

impl MatchType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::All => "all",
            MatchType::Any => "any",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MatchType::All),
            "any" => Ok(MatchType::Any),
            _ => Err(()),
        }
    }
}

/// One automation rule: an ordered, non-empty list of conditions combined
/// by [`MatchType`], plus the replacement applied when the rule matches.
///
/// Created via [`RuleSet::add_rule`](super::RuleSet::add_rule); rule order
/// within the set is evaluation order (first match wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    pub conditions: Vec<Condition>,
    pub match_type: MatchType,
    pub replacement: String,
}

impl Rule {
    /// A new rule with a single blank condition, as "add rule" creates it.
    pub(crate) fn blank(id: RuleId) -> Self {
        Self {
            id,
            conditions: vec![Condition::blank()],
            match_type: MatchType::All,
            replacement: String::new(),
        }
    }
}

/// One attribute update applied to a rule via
/// [`RuleSet::update_rule`](super::RuleSet::update_rule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEdit {
    Replacement(String),
    MatchType(MatchType),
}
