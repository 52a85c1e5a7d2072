//! Domain models for Perso

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix of group keys that hold exactly one forced-singleton transaction
pub const SINGLE_PREFIX: &str = "single_";

/// A pending transaction awaiting review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Merchant/description text as imported
    pub label: String,
    /// Negative = expense, positive = income
    pub amount: f64,
    pub date: NaiveDate,
    /// Set by the user to keep this transaction out of any group
    #[serde(default)]
    pub is_manually_ungrouped: bool,
}

impl Transaction {
    pub fn new(id: i64, label: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id,
            label: label.into(),
            amount,
            date,
            is_manually_ungrouped: false,
        }
    }
}

/// Identity of a review group
///
/// Derived from the label (and amount, for cheques) or from the id for
/// forced singletons. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Key for a transaction kept out of every group
    pub fn single(id: i64) -> Self {
        Self(format!("{SINGLE_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `single_` keys.
    ///
    /// A label that normalizes to something starting with `single_` is also
    /// reported as single; labels never do in practice.
    pub fn is_single(&self) -> bool {
        self.0.starts_with(SINGLE_PREFIX)
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transaction annotated with its group key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub group_key: GroupKey,
}

/// Summary of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group_key: GroupKey,
    /// Number of member transactions
    pub count: usize,
    /// Latest date among members
    pub max_date: NaiveDate,
    /// Largest absolute amount among members
    pub max_amount: f64,
    pub is_single: bool,
}

/// Ordering applied to groups within the grouped/singleton partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Largest groups first
    #[default]
    Count,
    /// Most recent latest-date first
    DateRecent,
    /// Oldest latest-date first
    DateOld,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

impl SortStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::DateRecent => "date_recent",
            Self::DateOld => "date_old",
            Self::AmountDesc => "amount_desc",
            Self::AmountAsc => "amount_asc",
        }
    }

    /// Human-readable label shown on the review screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::Count => "Gros groupes (Défaut)",
            Self::DateRecent => "Plus récentes",
            Self::DateOld => "Plus anciennes",
            Self::AmountDesc => "Montant (Décroissant)",
            Self::AmountAsc => "Montant (Croissant)",
        }
    }

    pub fn all() -> &'static [SortStrategy] {
        &[
            Self::Count,
            Self::DateRecent,
            Self::DateOld,
            Self::AmountDesc,
            Self::AmountAsc,
        ]
    }

    /// Parse a strategy name, falling back to `Count` for unknown values
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "date_recent" => Ok(Self::DateRecent),
            "date_old" => Ok(Self::DateOld),
            "amount_desc" => Ok(Self::AmountDesc),
            "amount_asc" => Ok(Self::AmountAsc),
            _ => Err(format!("Unknown sort strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
