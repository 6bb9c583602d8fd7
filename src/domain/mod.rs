/// Domain model for account activity
///
/// Transactions, the activity criteria bound from request parameters, and
/// the reference data the activity view is rendered with.
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ALL: &str = "All";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type")]
pub enum TransactionType {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub posted_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Raw request parameters, before any validation.
///
/// Wire names follow the activity form's field names (`id`,
/// `transactionType`, `Month`). Everything is optional at this layer so
/// deserialization never rejects a request; the controller owns the policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityCriteria {
    pub id: Option<String>,
    #[serde(rename = "transactionType")]
    pub transaction_type: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("transactionType must be one of All, Credit, Debit (got {0:?})")]
    UnknownType(String),
    #[error("Month must be All or a month name (got {0:?})")]
    UnknownMonth(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl TypeFilter {
    /// Absent and `All` both mean "do not restrict".
    pub fn parse(raw: Option<&str>) -> Result<Self, CriteriaError> {
        match raw {
            None => Ok(Self::All),
            Some(s) if s == ALL => Ok(Self::All),
            Some("Credit") => Ok(Self::Credit),
            Some("Debit") => Ok(Self::Debit),
            Some(other) => Err(CriteriaError::UnknownType(other.to_string())),
        }
    }

    pub fn as_transaction_type(self) -> Option<TransactionType> {
        match self {
            Self::All => None,
            Self::Credit => Some(TransactionType::Credit),
            Self::Debit => Some(TransactionType::Debit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    /// Calendar month, 1-based. Matches the month across all years; the
    /// month picker exposes bare month names with no year.
    In(u32),
}

impl MonthFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, CriteriaError> {
        match raw {
            None => Ok(Self::All),
            Some(s) if s == ALL => Ok(Self::All),
            Some(name) => MONTH_NAMES
                .iter()
                .position(|m| *m == name)
                .map(|idx| Self::In(idx as u32 + 1))
                .ok_or_else(|| CriteriaError::UnknownMonth(name.to_string())),
        }
    }
}

/// Validated filter extracted from [`ActivityCriteria`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub type_filter: TypeFilter,
    pub month: MonthFilter,
}

impl ActivityFilter {
    pub fn from_criteria(criteria: &ActivityCriteria) -> Result<Self, CriteriaError> {
        Ok(Self {
            type_filter: TypeFilter::parse(criteria.transaction_type.as_deref())?,
            month: MonthFilter::parse(criteria.month.as_deref())?,
        })
    }

    /// Filter semantics shared by every store backend: type and month
    /// restrictions compose with AND.
    pub fn matches(&self, tx: &Transaction) -> bool {
        let type_ok = match self.type_filter.as_transaction_type() {
            None => true,
            Some(ty) => tx.transaction_type == ty,
        };
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::In(month) => tx.posted_on.month() == month,
        };
        type_ok && month_ok
    }
}

/// Month picker options: "All" followed by the twelve months, 13 entries.
pub fn month_options() -> Vec<String> {
    std::iter::once(ALL)
        .chain(MONTH_NAMES)
        .map(str::to_string)
        .collect()
}

/// Transaction type options: "All", "Credit", "Debit".
pub fn type_options() -> Vec<String> {
    vec![ALL.to_string(), "Credit".to_string(), "Debit".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tx(ty: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: 1,
            account_id: 12345,
            transaction_type: ty,
            amount: Decimal::new(1000, 2),
            description: None,
            posted_on: date.parse().unwrap(),
        }
    }

    #[test]
    fn month_options_has_thirteen_entries_all_first() {
        let months = month_options();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0], "All");
        assert_eq!(months[1], "January");
        assert_eq!(months[12], "December");
    }

    #[test]
    fn type_options_has_three_entries() {
        assert_eq!(type_options(), vec!["All", "Credit", "Debit"]);
    }

    #[test]
    fn type_filter_parses_known_values() {
        assert_eq!(TypeFilter::parse(None).unwrap(), TypeFilter::All);
        assert_eq!(TypeFilter::parse(Some("All")).unwrap(), TypeFilter::All);
        assert_eq!(TypeFilter::parse(Some("Credit")).unwrap(), TypeFilter::Credit);
        assert_eq!(TypeFilter::parse(Some("Debit")).unwrap(), TypeFilter::Debit);
    }

    #[test]
    fn type_filter_rejects_unknown_values() {
        assert_eq!(
            TypeFilter::parse(Some("Transfer")),
            Err(CriteriaError::UnknownType("Transfer".to_string()))
        );
        // option values are case-sensitive
        assert!(TypeFilter::parse(Some("credit")).is_err());
    }

    #[test]
    fn month_filter_parses_names_one_based() {
        assert_eq!(MonthFilter::parse(None).unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse(Some("All")).unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse(Some("January")).unwrap(), MonthFilter::In(1));
        assert_eq!(MonthFilter::parse(Some("December")).unwrap(), MonthFilter::In(12));
    }

    #[test]
    fn month_filter_rejects_unknown_names() {
        assert_eq!(
            MonthFilter::parse(Some("Smarch")),
            Err(CriteriaError::UnknownMonth("Smarch".to_string()))
        );
    }

    #[test]
    fn filter_composes_type_and_month() {
        let filter = ActivityFilter {
            type_filter: TypeFilter::Debit,
            month: MonthFilter::In(12),
        };
        assert!(filter.matches(&tx(TransactionType::Debit, "2025-12-18")));
        assert!(!filter.matches(&tx(TransactionType::Credit, "2025-12-18")));
        assert!(!filter.matches(&tx(TransactionType::Debit, "2025-11-18")));
    }

    #[test]
    fn month_filter_matches_across_years() {
        let filter = ActivityFilter {
            type_filter: TypeFilter::All,
            month: MonthFilter::In(12),
        };
        assert!(filter.matches(&tx(TransactionType::Debit, "2024-12-01")));
        assert!(filter.matches(&tx(TransactionType::Debit, "2025-12-01")));
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = ActivityFilter::default();
        assert!(filter.matches(&tx(TransactionType::Credit, "2025-03-09")));
        assert!(filter.matches(&tx(TransactionType::Debit, "2025-07-01")));
    }
}
